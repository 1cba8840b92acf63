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

//! The terrain painter: paint-at-cell with cascade of intermediate-color
//! insertion, center-outward tile re-resolution, and 4-connected flood fill.

use crate::color::ColorId;
use crate::log::Log;
use crate::map::{AutotileMap, Cell};
use crate::offset::{SLOT_B, SLOT_BL, SLOT_BR, SLOT_COUNT, SLOT_L, SLOT_R, SLOT_T, SLOT_TL, SLOT_TR};
use crate::resolver::find_best_match;
use crate::wang_id::WangId;
use crate::wang_set::{WangSet, WangSetType};
use fxhash::FxHashSet;
use std::collections::VecDeque;

const CARDINAL_4: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Derive the `desiredWangId` for resolving the cell at `(x, y)`, per the
/// pattern type's per-slot rules. Out-of-bounds neighbors take the self
/// color (the painted color at `(x, y)` itself).
pub fn derive_desired_wang_id(map: &AutotileMap, set_type: WangSetType, x: i32, y: i32) -> WangId {
    let self_color = map.color_at(x, y);
    let at = |px: i32, py: i32| -> ColorId {
        if map.in_bounds(px, py) {
            map.color_at(px, py)
        } else {
            self_color
        }
    };

    let mut slots = [0u32; SLOT_COUNT];
    match set_type {
        WangSetType::Corner => {
            // The tile anchored at (x, y) samples the 2x2 block with itself
            // as the top-left corner — not the generic 8-neighborhood.
            slots[SLOT_TL] = at(x, y);
            slots[SLOT_TR] = at(x + 1, y);
            slots[SLOT_BR] = at(x + 1, y + 1);
            slots[SLOT_BL] = at(x, y + 1);
        }
        WangSetType::Edge => {
            slots[SLOT_T] = at(x, y - 1);
            slots[SLOT_R] = at(x + 1, y);
            slots[SLOT_B] = at(x, y + 1);
            slots[SLOT_L] = at(x - 1, y);
        }
        WangSetType::Mixed => {
            slots[SLOT_T] = at(x, y - 1);
            slots[SLOT_TR] = at(x + 1, y - 1);
            slots[SLOT_R] = at(x + 1, y);
            slots[SLOT_BR] = at(x + 1, y + 1);
            slots[SLOT_B] = at(x, y + 1);
            slots[SLOT_BL] = at(x - 1, y + 1);
            slots[SLOT_L] = at(x - 1, y);
            slots[SLOT_TL] = at(x - 1, y - 1);
        }
    }
    WangId::new(slots)
}

/// Phase 2: BFS the 8-neighborhood from `seed`, overwriting any neighbor
/// whose color is more than one hop from the current cell's color with the
/// next-hop color toward it. Returns every position whose color was
/// touched, including `seed` itself.
fn cascade_intermediates(
    map: &mut AutotileMap,
    wang_set: &WangSet,
    seed: (i32, i32),
) -> FxHashSet<(i32, i32)> {
    let mut changed = FxHashSet::default();
    let mut queued = FxHashSet::default();
    let mut queue = VecDeque::new();
    changed.insert(seed);
    queued.insert(seed);
    queue.push_back(seed);

    while let Some((cx, cy)) = queue.pop_front() {
        let cc = map.color_at(cx, cy);
        for slot in 0..SLOT_COUNT {
            let (nx, ny) = crate::offset::slot_offset(slot);
            let n = (cx + nx, cy + ny);
            if !map.in_bounds(n.0, n.1) {
                continue;
            }
            let nc = map.color_at(n.0, n.1);
            if nc == 0 {
                continue;
            }
            let distance = wang_set.color_distance(cc, nc);
            if distance > 1 {
                if let Some(hop) = wang_set.next_hop_color(cc, nc) {
                    map.set_color(n.0, n.1, hop);
                    changed.insert(n);
                    if queued.insert(n) {
                        queue.push_back(n);
                    }
                }
            }
            // distance == -1 (unreachable): leave the neighbor alone, the
            // resolver will report the mismatch.
        }
    }
    changed
}

/// Phase 3: expand `changed` by one 3x3 ring per cell, sort the result by
/// Manhattan distance from `center` (ties by `(x, y)`), and re-resolve every
/// cell's tile in that order. Returns the positions re-resolved.
fn reresolve_ring(
    map: &mut AutotileMap,
    wang_set: &WangSet,
    set_type: WangSetType,
    changed: &FxHashSet<(i32, i32)>,
    center: (i32, i32),
    parent_seed: u64,
) -> Vec<(i32, i32)> {
    let mut ring: FxHashSet<(i32, i32)> = FxHashSet::default();
    for &(cx, cy) in changed {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let n = (cx + dx, cy + dy);
                if map.in_bounds(n.0, n.1) {
                    ring.insert(n);
                }
            }
        }
    }

    let mut ordered: Vec<(i32, i32)> = ring.into_iter().collect();
    ordered.sort_by_key(|&(x, y)| ((x - center.0).abs() + (y - center.1).abs(), x, y));

    let mut gaps = 0usize;
    for &(x, y) in &ordered {
        let color = map.color_at(x, y);
        if color == 0 {
            map.set_cell(x, y, Cell::EMPTY);
            continue;
        }
        let desired = derive_desired_wang_id(map, set_type, x, y);
        match find_best_match(wang_set, &desired, set_type, parent_seed, x, y) {
            Some(cell) => map.set_cell(x, y, cell),
            None => {
                map.set_cell(x, y, Cell::EMPTY);
                gaps += 1;
            }
        }
    }
    if gaps > 0 {
        Log::warn(format!(
            "terrain paint left {gaps} cell(s) unresolved (no variant covers the desired pattern)"
        ));
    }

    ordered
}

/// `applyTerrainPaint`: paint `color` at `(x, y)`, cascade intermediate
/// colors through the 8-neighborhood so every adjacent pair stays within
/// color distance 1, then re-resolve tiles center-outward. Returns every
/// position whose tile was re-resolved.
pub fn apply_terrain_paint(
    map: &mut AutotileMap,
    wang_set: &WangSet,
    set_type: WangSetType,
    x: i32,
    y: i32,
    color: ColorId,
    parent_seed: u64,
) -> Vec<(i32, i32)> {
    map.set_color(x, y, color);
    let changed = cascade_intermediates(map, wang_set, (x, y));
    reresolve_ring(map, wang_set, set_type, &changed, (x, y), parent_seed)
}

/// `floodFillTerrain`: standard 4-connected flood fill of the region
/// containing `(x, y)` that shares its original color, recolored to
/// `color`, then handed to the painter's cascade/re-resolve passes with the
/// region's outermost ring as seeds.
pub fn flood_fill_terrain(
    map: &mut AutotileMap,
    wang_set: &WangSet,
    set_type: WangSetType,
    x: i32,
    y: i32,
    color: ColorId,
    parent_seed: u64,
) -> Vec<(i32, i32)> {
    let origin_color = map.color_at(x, y);
    if origin_color == color {
        return Vec::new();
    }

    let mut region: FxHashSet<(i32, i32)> = FxHashSet::default();
    let mut queue = VecDeque::new();
    region.insert((x, y));
    queue.push_back((x, y));
    while let Some((cx, cy)) = queue.pop_front() {
        for (dx, dy) in CARDINAL_4 {
            let n = (cx + dx, cy + dy);
            if map.in_bounds(n.0, n.1)
                && map.color_at(n.0, n.1) == origin_color
                && region.insert(n)
            {
                queue.push_back(n);
            }
        }
    }

    for &(px, py) in &region {
        map.set_color(px, py, color);
    }

    let mut seeds: Vec<(i32, i32)> = region
        .iter()
        .copied()
        .filter(|&(px, py)| {
            CARDINAL_4.iter().any(|&(dx, dy)| !region.contains(&(px + dx, py + dy)))
        })
        .collect();
    seeds.sort_unstable();

    let mut changed: FxHashSet<(i32, i32)> = FxHashSet::default();
    for &seed in &seeds {
        changed.extend(cascade_intermediates(map, wang_set, seed));
    }
    reresolve_ring(map, wang_set, set_type, &changed, (x, y), parent_seed)
}
