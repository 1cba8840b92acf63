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

//! Wang-tile terrain autotiling.
//!
//! Given a set of colored terrain tiles (a [`wang_set::WangSet`]), this
//! crate resolves which concrete tile variant belongs at each map position
//! so that adjacent tiles' edges or corners agree, paints and floods terrain
//! with a cascading color-distance model, procedurally generates base
//! fills, and bakes the result into deduplicated atlases and compact binary
//! map data.
//!
//! The pipeline, roughly:
//! - [`wang_id`] / [`variant`]: the pattern model and its symmetry expansion.
//! - [`distance`]: all-pairs color reachability, via Floyd–Warshall.
//! - [`resolver`]: best-match variant selection for a desired pattern.
//! - [`map`] / [`painter`]: the live grid and the paint/flood-fill algorithms.
//! - [`generator`]: procedural base fills (noise, voronoi, zones).
//! - [`prefab`] / [`schema`]: the on-disk map/prefab/project formats.
//! - [`bake`]: dedup, atlas packing, and binary serialization for a runtime.

pub mod bake;
pub mod color;
pub mod distance;
pub mod error;
pub mod generator;
pub mod log;
pub mod map;
pub mod noise;
pub mod offset;
pub mod painter;
pub mod prefab;
pub mod probability;
pub mod resolver;
pub mod rng;
pub mod schema;
pub mod variant;
pub mod wang_id;
pub mod wang_set;

pub use color::{Color, ColorId, TileRef};
pub use map::{AutotileMap, Cell};
pub use wang_id::WangId;
pub use wang_set::{WangSet, WangSetType};
