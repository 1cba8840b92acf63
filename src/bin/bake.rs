// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! CLI entry point for the bake pipeline: reads a project, its maps and
//! prefabs, and writes atlases, binary layer data, and a manifest.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wang_terrain::bake::{run_bake, BakeInputs};
use wang_terrain::log::Log;

#[derive(Debug, Parser)]
#[command(name = "wang-bake", about = "Bake a Wang-tile terrain project into atlases and binary map data")]
struct Args {
    /// Path to the project metadata JSON file.
    #[arg(long)]
    project: PathBuf,
    /// Directory containing tileset images referenced by the project.
    #[arg(long)]
    tilesets: PathBuf,
    /// Directory containing saved map JSON files.
    #[arg(long)]
    maps: PathBuf,
    /// Directory containing saved prefab JSON files.
    #[arg(long)]
    prefabs: PathBuf,
    /// Directory to write atlases, binary data, and the manifest into.
    #[arg(long)]
    output: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let inputs = BakeInputs {
        project_path: &args.project,
        tilesets_dir: &args.tilesets,
        maps_dir: &args.maps,
        prefabs_dir: &args.prefabs,
        output_dir: &args.output,
    };

    match run_bake(&inputs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Log::err(format!("bake failed: {e}"));
            ExitCode::FAILURE
        }
    }
}
