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

//! Content-addressed deduplication of resolved cells into compact baked ids.

use crate::bake::atlas::TILE_SIZE;
use crate::map::Cell;
use fxhash::FxHashMap;

/// The sprite identity a cell is deduplicated by: which source tile, under
/// which orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RegistryKey {
    tileset_index: usize,
    tile_id: i32,
    flip_h: bool,
    flip_v: bool,
    flip_d: bool,
}

/// One unique (sprite, orientation) pair and everything the atlas renderer
/// needs to copy its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub baked_id: u32,
    pub tileset_index: usize,
    pub tile_id: i32,
    pub flip_h: bool,
    pub flip_v: bool,
    pub flip_d: bool,
    pub source_width: u32,
    pub source_height: u32,
}

/// Deduplicates resolved [`Cell`]s into a dense, positive `bakedId` space.
/// `0` is reserved for the empty cell and is never allocated.
#[derive(Debug, Default)]
pub struct TileRegistry {
    by_key: FxHashMap<RegistryKey, u32>,
    entries: Vec<RegistryEntry>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self { by_key: FxHashMap::default(), entries: Vec::new() }
    }

    /// Register `cell`'s sprite identity, returning its baked id. Empty cells
    /// always map to `0`. Repeated registration of an identical identity
    /// returns the same id.
    pub fn register(&mut self, cell: &Cell) -> u32 {
        if cell.is_empty() {
            return 0;
        }
        let key = RegistryKey {
            tileset_index: cell.tileset_index,
            tile_id: cell.tile_id,
            flip_h: cell.flip_h,
            flip_v: cell.flip_v,
            flip_d: cell.flip_d,
        };
        if let Some(&id) = self.by_key.get(&key) {
            return id;
        }
        let baked_id = self.entries.len() as u32 + 1;
        self.entries.push(RegistryEntry {
            baked_id,
            tileset_index: key.tileset_index,
            tile_id: key.tile_id,
            flip_h: key.flip_h,
            flip_v: key.flip_v,
            flip_d: key.flip_d,
            source_width: TILE_SIZE,
            source_height: TILE_SIZE,
        });
        self.by_key.insert(key, baked_id);
        baked_id
    }

    /// Number of unique non-empty cells registered so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in the order they were first registered (insertion order,
    /// which is the order used when packing atlas slots).
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn entry(&self, baked_id: u32) -> Option<&RegistryEntry> {
        if baked_id == 0 {
            return None;
        }
        self.entries.get(baked_id as usize - 1)
    }
}
