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

//! `AutotileMap`: two parallel grids (painted colors, resolved cells) plus
//! the `Cell` draw unit the resolver and bake pipeline both consume.

use crate::color::ColorId;

/// The resolved draw unit at a map position. `tile_id < 0` means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub tile_id: i32,
    pub tileset_index: usize,
    pub flip_h: bool,
    pub flip_v: bool,
    pub flip_d: bool,
}

impl Cell {
    /// The empty cell, drawn as nothing.
    pub const EMPTY: Cell = Cell {
        tile_id: -1,
        tileset_index: 0,
        flip_h: false,
        flip_v: false,
        flip_d: false,
    };

    pub fn is_empty(&self) -> bool {
        self.tile_id < 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// Two parallel row-major arrays of size `width*height`: painted colors and
/// resolved cells. Invariant: `colors[i] == 0 ⇒ cells[i]` is empty.
#[derive(Debug, Clone)]
pub struct AutotileMap {
    width: i32,
    height: i32,
    colors: Vec<ColorId>,
    cells: Vec<Cell>,
}

impl AutotileMap {
    /// Build an empty map of the given dimensions (all colors 0, all cells
    /// empty).
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            colors: vec![0; len],
            cells: vec![Cell::EMPTY; len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Painted color at `(x, y)`, or `0` ("empty") when out of bounds.
    pub fn color_at(&self, x: i32, y: i32) -> ColorId {
        if !self.in_bounds(x, y) {
            return 0;
        }
        self.colors[self.index(x, y)]
    }

    /// Overwrite the painted color at `(x, y)`. No-op out of bounds.
    pub fn set_color(&mut self, x: i32, y: i32, color: ColorId) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        self.colors[idx] = color;
        if color == 0 {
            self.cells[idx] = Cell::EMPTY;
        }
    }

    /// Resolved cell at `(x, y)`, or the empty cell when out of bounds.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        if !self.in_bounds(x, y) {
            return Cell::EMPTY;
        }
        self.cells[self.index(x, y)]
    }

    /// Overwrite the resolved cell at `(x, y)`. No-op out of bounds.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let w = self.width;
        let h = self.height;
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_all_empty() {
        let map = AutotileMap::new(3, 2);
        for (x, y) in map.positions() {
            assert_eq!(map.color_at(x, y), 0);
            assert!(map.cell_at(x, y).is_empty());
        }
    }

    #[test]
    fn out_of_bounds_reads_are_safe_defaults() {
        let map = AutotileMap::new(2, 2);
        assert_eq!(map.color_at(-1, 0), 0);
        assert_eq!(map.color_at(5, 5), 0);
        assert!(map.cell_at(-1, -1).is_empty());
    }

    #[test]
    fn setting_color_to_zero_clears_cell() {
        let mut map = AutotileMap::new(2, 2);
        map.set_cell(0, 0, Cell { tile_id: 3, ..Cell::EMPTY });
        map.set_color(0, 0, 0);
        assert!(map.cell_at(0, 0).is_empty());
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut map = AutotileMap::new(4, 4);
        map.set_color(2, 1, 7);
        assert_eq!(map.color_at(2, 1), 7);
        let cell = Cell { tile_id: 5, tileset_index: 1, flip_h: true, flip_v: false, flip_d: false };
        map.set_cell(2, 1, cell);
        assert_eq!(map.cell_at(2, 1), cell);
    }
}
