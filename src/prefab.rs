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

//! The saved-map and prefab container formats: raw color/tile data persisted
//! to disk, distinct from the resolved `AutotileMap`/`Cell` used at runtime.
//! Resolved tile ids are never stored — they are always re-derived from
//! colors by the painter.

use crate::color::ColorId;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

/// Number of layers every saved map has, fixed by the format.
pub const NUM_MAP_LAYERS: usize = 9;
/// Number of layers every prefab has, fixed by the format.
pub const NUM_PREFAB_LAYERS: usize = 5;

/// A single placed tile inside a prefab layer. Prefab cells carry raw tile
/// references — unlike map layers, they are never autotile-resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefabTile {
    pub x: i32,
    pub y: i32,
    pub tile_id: u32,
    pub tileset_index: usize,
}

/// A reusable, pre-arranged tile stamp with a fixed number of layers and an
/// anchor defining its placement origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefab {
    pub name: String,
    pub layers: Vec<Vec<PrefabTile>>,
    pub anchor_x: i32,
    pub anchor_y: i32,
}

impl Prefab {
    /// Validate the layer count against [`NUM_PREFAB_LAYERS`].
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.layers.len() != NUM_PREFAB_LAYERS {
            return Err(SchemaError::WrongPrefabLayerCount {
                expected: NUM_PREFAB_LAYERS,
                found: self.layers.len(),
            });
        }
        Ok(())
    }
}

/// A prefab instance placed on a map at `(x, y)`, anchored by the prefab's
/// own `(anchorX, anchorY)`, stamped starting at the map's `layer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPrefab {
    pub prefab_name: String,
    pub x: i32,
    pub y: i32,
    pub layer: usize,
}

/// Persistent container for a map: its dimensions, its fixed number of color
/// layers, and the prefabs placed on top of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMap {
    pub name: String,
    pub wang_set_name: String,
    pub width: i32,
    pub height: i32,
    pub layers: Vec<Vec<ColorId>>,
    #[serde(default)]
    pub placed_prefabs: Vec<PlacedPrefab>,
}

impl SavedMap {
    /// Validate the layer count and the size of every layer against
    /// `width * height`.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.layers.len() != NUM_MAP_LAYERS {
            return Err(SchemaError::WrongMapLayerCount {
                expected: NUM_MAP_LAYERS,
                found: self.layers.len(),
            });
        }
        let expected_len = (self.width.max(0) as usize) * (self.height.max(0) as usize);
        for layer in &self.layers {
            if layer.len() != expected_len {
                return Err(SchemaError::MissingField("layer cell count must equal width*height"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_map() -> SavedMap {
        SavedMap {
            name: "Overworld".into(),
            wang_set_name: "GrassDirt".into(),
            width: 2,
            height: 2,
            layers: vec![vec![0; 4]; NUM_MAP_LAYERS],
            placed_prefabs: Vec::new(),
        }
    }

    #[test]
    fn valid_map_passes_validation() {
        assert!(valid_map().validate().is_ok());
    }

    #[test]
    fn wrong_layer_count_is_rejected() {
        let mut map = valid_map();
        map.layers.pop();
        assert_eq!(
            map.validate(),
            Err(SchemaError::WrongMapLayerCount { expected: NUM_MAP_LAYERS, found: NUM_MAP_LAYERS - 1 })
        );
    }

    #[test]
    fn mismatched_layer_length_is_rejected() {
        let mut map = valid_map();
        map.layers[0].push(0);
        assert!(map.validate().is_err());
    }

    #[test]
    fn prefab_with_wrong_layer_count_is_rejected() {
        let prefab = Prefab {
            name: "Well".into(),
            layers: vec![Vec::new(); NUM_PREFAB_LAYERS - 1],
            anchor_x: 0,
            anchor_y: 0,
        };
        assert!(prefab.validate().is_err());
    }

    #[test]
    fn saved_map_roundtrips_through_json() {
        let map = valid_map();
        let json = serde_json::to_string(&map).unwrap();
        let back: SavedMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
