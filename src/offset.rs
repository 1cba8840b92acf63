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

//! Grid position arithmetic for the 2D tile grid: the four cardinal offsets,
//! the four diagonal offsets, and the bit indices used to read a tile's 8
//! surrounding peering slots out of a 3x3 neighborhood.

use nalgebra::Vector2;

/// A grid position. Plain alias kept distinct from `nalgebra::Vector2<i32>`
/// uses elsewhere so call sites read as grid coordinates.
pub type GridPos = Vector2<i32>;

/// Index into an 8-slot `WangId`, in compass order starting at the top and
/// proceeding clockwise: T, TR, R, BR, B, BL, L, TL.
pub const SLOT_COUNT: usize = 8;

/// Slot index for the top (north) edge.
pub const SLOT_T: usize = 0;
/// Slot index for the top-right (north-east) corner.
pub const SLOT_TR: usize = 1;
/// Slot index for the right (east) edge.
pub const SLOT_R: usize = 2;
/// Slot index for the bottom-right (south-east) corner.
pub const SLOT_BR: usize = 3;
/// Slot index for the bottom (south) edge.
pub const SLOT_B: usize = 4;
/// Slot index for the bottom-left (south-west) corner.
pub const SLOT_BL: usize = 5;
/// Slot index for the left (west) edge.
pub const SLOT_L: usize = 6;
/// Slot index for the top-left (north-west) corner.
pub const SLOT_TL: usize = 7;

/// True if `slot` is an edge slot (even index).
#[inline]
pub fn is_edge_slot(slot: usize) -> bool {
    slot % 2 == 0
}

/// True if `slot` is a corner slot (odd index).
#[inline]
pub fn is_corner_slot(slot: usize) -> bool {
    slot % 2 == 1
}

/// The `(dx, dy)` offset of a cardinal slot, used to find the neighbor cell
/// that a slot's value is read from. Indexed by slot (only even entries are
/// meaningful, but the table is dense for simplicity).
const CARDINAL_OFFSETS: [(i32, i32); SLOT_COUNT] = [
    (0, -1),  // T
    (1, -1),  // TR (unused as a cardinal lookup)
    (1, 0),   // R
    (1, 1),   // BR (unused)
    (0, 1),   // B
    (-1, 1),  // BL (unused)
    (-1, 0),  // L
    (-1, -1), // TL (unused)
];

/// The `(dx, dy)` offset for any of the 8 slots, cardinal or diagonal.
#[inline]
pub fn slot_offset(slot: usize) -> (i32, i32) {
    CARDINAL_OFFSETS[slot]
}

/// The position one step away from `pos` in the direction of `slot`.
#[inline]
pub fn neighbor(pos: GridPos, slot: usize) -> GridPos {
    let (dx, dy) = slot_offset(slot);
    GridPos::new(pos.x + dx, pos.y + dy)
}

/// All 8 neighbor positions of `pos`, in slot order (T, TR, R, BR, B, BL, L, TL).
pub fn neighbors8(pos: GridPos) -> [GridPos; SLOT_COUNT] {
    let mut out = [pos; SLOT_COUNT];
    for (slot, out_pos) in out.iter_mut().enumerate() {
        *out_pos = neighbor(pos, slot);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_slots_are_even() {
        assert!(is_edge_slot(SLOT_T));
        assert!(is_edge_slot(SLOT_R));
        assert!(is_edge_slot(SLOT_B));
        assert!(is_edge_slot(SLOT_L));
    }

    #[test]
    fn corner_slots_are_odd() {
        assert!(is_corner_slot(SLOT_TR));
        assert!(is_corner_slot(SLOT_BR));
        assert!(is_corner_slot(SLOT_BL));
        assert!(is_corner_slot(SLOT_TL));
    }

    #[test]
    fn neighbor_round_trips() {
        let origin = GridPos::new(5, 5);
        assert_eq!(neighbor(origin, SLOT_T), GridPos::new(5, 4));
        assert_eq!(neighbor(origin, SLOT_B), GridPos::new(5, 6));
        assert_eq!(neighbor(origin, SLOT_L), GridPos::new(4, 5));
        assert_eq!(neighbor(origin, SLOT_R), GridPos::new(6, 5));
    }
}
