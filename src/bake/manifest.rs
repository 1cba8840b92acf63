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

//! The bake manifest: a host-agnostic text description of what a bake
//! produced, so a runtime can locate atlases and per-map/prefab data files
//! without re-deriving layout decisions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestAtlas {
    pub file: String,
    pub columns: u32,
    pub tiles_per_file: u32,
    pub tile_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub name: String,
    pub slug: String,
    pub width: i32,
    pub height: i32,
    pub anchor: Option<(i32, i32)>,
    pub layer_count: usize,
    pub data_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub atlases: Vec<ManifestAtlas>,
    pub maps: Vec<ManifestEntry>,
    pub prefabs: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the manifest as pretty-printed JSON text.
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(self).expect("Manifest always serializes")
    }

    pub fn from_text(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_text() {
        let mut manifest = Manifest::new();
        manifest.atlases.push(ManifestAtlas {
            file: "tileset-0.png".into(),
            columns: 16,
            tiles_per_file: 256,
            tile_count: 100,
        });
        manifest.maps.push(ManifestEntry {
            name: "Overworld".into(),
            slug: "overworld".into(),
            width: 10,
            height: 10,
            anchor: None,
            layer_count: 9,
            data_file: "data/maps/overworld.bin".into(),
        });
        let text = manifest.to_text();
        let back = Manifest::from_text(&text).unwrap();
        assert_eq!(manifest, back);
    }
}
