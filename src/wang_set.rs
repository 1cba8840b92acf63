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

//! The Wang-set registry: colors, the base tile-mapping table, the expanded
//! variant list, and the color-distance matrices.

use crate::color::{Color, ColorId};
use crate::offset::SLOT_COUNT;
use crate::variant::{TransformationConfig, Variant};
use crate::wang_id::WangId;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// An immutable image descriptor for a tileset. `tileId = row*columns + col`,
/// addressed row-major left-to-right, top-to-bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetDef {
    /// Path to the source image, relative to the project file.
    pub tileset_image: String,
    /// Width of one tile in pixels.
    pub tile_width: u32,
    /// Height of one tile in pixels.
    pub tile_height: u32,
    /// Number of tile columns in the image.
    pub columns: u32,
    /// Total number of tiles in the image.
    pub tile_count: u32,
}

impl TilesetDef {
    /// Row/column of `tile_id` within this tileset.
    pub fn row_col(&self, tile_id: u32) -> (u32, u32) {
        if self.columns == 0 {
            return (0, 0);
        }
        (tile_id / self.columns, tile_id % self.columns)
    }
}

/// The kind of a Wang set, determining which of the 8 slots are "active".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WangSetType {
    /// Labels live at tile corners (odd slots).
    Corner,
    /// Labels live at tile edges (even slots).
    Edge,
    /// All 8 slots are active.
    Mixed,
}

impl WangSetType {
    /// True if `slot` is active for this Wang-set type.
    pub fn slot_active(self, slot: usize) -> bool {
        match self {
            WangSetType::Corner => crate::offset::is_corner_slot(slot),
            WangSetType::Edge => crate::offset::is_edge_slot(slot),
            WangSetType::Mixed => true,
        }
    }

    /// Iterator over the active slot indices for this type.
    pub fn active_slots(self) -> impl Iterator<Item = usize> {
        (0..SLOT_COUNT).filter(move |&s| self.slot_active(s))
    }
}

/// Key identifying a base tile mapping: `(tileset_index, tile_id)`.
pub type TileKey = (usize, u32);

/// A Wang-set: colors, the base tile→pattern table, the expanded variant
/// list, and the color-distance matrices. Built once at load time and
/// treated as immutable thereafter, safe to share by reference across map
/// instances.
#[derive(Debug, Clone)]
pub struct WangSet {
    name: String,
    set_type: WangSetType,
    colors: FxHashMap<ColorId, Color>,
    color_order: Vec<ColorId>,
    mappings: FxHashMap<TileKey, WangId>,
    mapping_order: Vec<TileKey>,
    variants: Vec<Variant>,
    distances: Vec<Vec<i32>>,
    next_hop: Vec<Vec<i32>>,
    transformation_config: TransformationConfig,
}

impl WangSet {
    /// Create an empty Wang set of the given name and type.
    pub fn new(name: impl Into<String>, set_type: WangSetType) -> Self {
        Self {
            name: name.into(),
            set_type,
            colors: FxHashMap::default(),
            color_order: Vec::new(),
            mappings: FxHashMap::default(),
            mapping_order: Vec::new(),
            variants: Vec::new(),
            distances: Vec::new(),
            next_hop: Vec::new(),
            transformation_config: TransformationConfig::ALL,
        }
    }

    /// The set's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The set's type (corner/edge/mixed).
    pub fn set_type(&self) -> WangSetType {
        self.set_type
    }

    /// Register a color. Colors must be registered before any tile mapping
    /// that references their id.
    pub fn add_color(&mut self, color: Color) {
        if !self.colors.contains_key(&color.id) {
            self.color_order.push(color.id);
        }
        self.colors.insert(color.id, color);
    }

    /// Look up a color by id.
    pub fn get_color(&self, id: ColorId) -> Option<&Color> {
        self.colors.get(&id)
    }

    /// All registered colors, in registration order.
    pub fn colors(&self) -> impl Iterator<Item = &Color> {
        self.color_order.iter().filter_map(|id| self.colors.get(id))
    }

    /// The longest finite shortest path between any two colors, or 0 if
    /// fewer than two colors are reachable from each other.
    pub fn max_color_distance(&self) -> i32 {
        self.distances
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .filter(|&d| d >= 0)
            .max()
            .unwrap_or(0)
    }

    /// Add or overwrite a base tile-mapping entry.
    pub fn add_tile_mapping(&mut self, tileset_index: usize, tile_id: u32, wang_id: WangId) {
        let key = (tileset_index, tile_id);
        if !self.mappings.contains_key(&key) {
            self.mapping_order.push(key);
        }
        self.mappings.insert(key, wang_id);
    }

    /// Iterate all base tile mappings in insertion order.
    pub fn tile_mappings(&self) -> impl Iterator<Item = (TileKey, &WangId)> {
        self.mapping_order
            .iter()
            .filter_map(|k| self.mappings.get(k).map(|w| (*k, w)))
    }

    /// Set the expanded variant list (see the variant generator).
    pub fn set_variants(&mut self, variants: Vec<Variant>) {
        self.variants = variants;
    }

    /// All variants, in the order they were set.
    pub fn all_variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Set the transformation config this set's variants were expanded
    /// under; the resolver reads `prefer_untransformed` from it when
    /// computing the transform-penalty scoring term.
    pub fn set_transformation_config(&mut self, config: TransformationConfig) {
        self.transformation_config = config;
    }

    /// The transformation config this set's variants were expanded under.
    pub fn transformation_config(&self) -> TransformationConfig {
        self.transformation_config
    }

    /// Install the distance matrix. Indexed by color id (1-based; index 0 is
    /// unused padding so `colors[id]` works directly).
    pub fn set_distance_matrix(&mut self, d: Vec<Vec<i32>>) {
        self.distances = d;
    }

    /// Install the next-hop matrix, same indexing convention as the distance
    /// matrix.
    pub fn set_next_hop_matrix(&mut self, h: Vec<Vec<i32>>) {
        self.next_hop = h;
    }

    /// Shortest-path distance between two colors. `0` for `a == b`, `-1` if
    /// unreachable.
    pub fn color_distance(&self, a: ColorId, b: ColorId) -> i32 {
        if a == b {
            return 0;
        }
        self.distances
            .get(a as usize)
            .and_then(|row| row.get(b as usize))
            .copied()
            .unwrap_or(-1)
    }

    /// The immediate next-hop color on a shortest path from `a` to `b`.
    /// Returns `a` when `a == b`, and `-1` cast to `ColorId`'s underlying
    /// meaning is avoided by returning `None` when unreachable.
    pub fn next_hop_color(&self, a: ColorId, b: ColorId) -> Option<ColorId> {
        if a == b {
            return Some(a);
        }
        self.next_hop
            .get(a as usize)
            .and_then(|row| row.get(b as usize))
            .copied()
            .filter(|&h| h >= 0)
            .map(|h| h as ColorId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_type_active_slots() {
        assert!(WangSetType::Corner.slot_active(1));
        assert!(!WangSetType::Corner.slot_active(0));
        assert!(WangSetType::Edge.slot_active(0));
        assert!(!WangSetType::Edge.slot_active(1));
        assert_eq!(WangSetType::Mixed.active_slots().count(), SLOT_COUNT);
    }

    #[test]
    fn tileset_row_col() {
        let ts = TilesetDef {
            tileset_image: "grass.png".into(),
            tile_width: 16,
            tile_height: 16,
            columns: 4,
            tile_count: 16,
        };
        assert_eq!(ts.row_col(5), (1, 1));
        assert_eq!(ts.row_col(0), (0, 0));
    }

    #[test]
    fn color_distance_self_is_zero() {
        let set = WangSet::new("Test", WangSetType::Corner);
        assert_eq!(set.color_distance(1, 1), 0);
    }

    #[test]
    fn tile_mappings_preserve_insertion_order() {
        let mut set = WangSet::new("Test", WangSetType::Corner);
        set.add_tile_mapping(0, 3, WangId::EMPTY);
        set.add_tile_mapping(0, 1, WangId::EMPTY);
        let keys: Vec<_> = set.tile_mappings().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![(0, 3), (0, 1)]);
    }
}
