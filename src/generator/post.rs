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

//! Post-processing passes applied to a base-filled color array: border
//! smoothing (enforce the colorDistance<=1 adjacency invariant) and sprinkle
//! variety (controlled noise-driven substitution).

use crate::color::ColorId;
use crate::noise::Simplex2;
use crate::wang_set::WangSet;

/// Salt mixed into the sprinkle seed so its noise field decorrelates from
/// whatever base-fill noise used the same seed.
const SPRINKLE_SEED_SALT: u64 = 0x5350_524B; // "SPRK"

#[inline]
fn index(width: i32, x: i32, y: i32) -> usize {
    (y as usize) * (width as usize) + (x as usize)
}

fn in_bounds(width: i32, height: i32, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && x < width && y < height
}

/// Iterate to a fixed point: for every non-empty cell with a neighbor whose
/// `colorDistance` from it exceeds 1, replace the *neighbor* with the
/// next-hop color from the cell toward the neighbor.
pub fn smooth_borders(colors: &mut [ColorId], width: i32, height: i32, wang_set: &WangSet) {
    loop {
        let mut changed = false;
        for y in 0..height {
            for x in 0..width {
                let self_color = colors[index(width, x, y)];
                if self_color == 0 {
                    continue;
                }
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let (nx, ny) = (x + dx, y + dy);
                        if !in_bounds(width, height, nx, ny) {
                            continue;
                        }
                        let n_idx = index(width, nx, ny);
                        let neighbor_color = colors[n_idx];
                        if neighbor_color == 0 {
                            continue;
                        }
                        if wang_set.color_distance(self_color, neighbor_color) > 1 {
                            if let Some(hop) = wang_set.next_hop_color(self_color, neighbor_color) {
                                colors[n_idx] = hop;
                                changed = true;
                            }
                        }
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// Raster-scan substitution of a controlled fraction of cells with a
/// distance-1 alternative color, guarded by a safety check against every
/// non-empty 8-neighbor.
pub fn sprinkle_variety(colors: &mut [ColorId], width: i32, height: i32, wang_set: &WangSet, seed: u64, amount: f64) {
    if amount <= 0.0 {
        return;
    }
    let simplex = Simplex2::new(seed ^ SPRINKLE_SEED_SALT);
    let threshold = 1.0 - amount;

    for y in 0..height {
        for x in 0..width {
            let idx = index(width, x, y);
            let color = colors[idx];
            if color == 0 {
                continue;
            }
            let pick_trigger = simplex.sample01(x as f64 * 0.08, y as f64 * 0.08);
            if pick_trigger < threshold {
                continue;
            }

            let candidates: Vec<ColorId> = wang_set
                .colors()
                .map(|c| c.id)
                .filter(|&id| id != color && wang_set.color_distance(color, id) == 1)
                .collect();
            if candidates.is_empty() {
                continue;
            }
            let pick_sample = simplex.sample01(x as f64 * 0.08 + 1000.0, y as f64 * 0.08 + 1000.0);
            let candidate = candidates[(pick_sample * candidates.len() as f64) as usize % candidates.len()];

            let safe = (-1..=1).all(|dy| {
                (-1..=1).all(|dx| {
                    if dx == 0 && dy == 0 {
                        return true;
                    }
                    let (nx, ny) = (x + dx, y + dy);
                    if !in_bounds(width, height, nx, ny) {
                        return true;
                    }
                    let neighbor_color = colors[index(width, nx, ny)];
                    neighbor_color == 0
                        || candidate == neighbor_color
                        || wang_set.color_distance(candidate, neighbor_color) == 1
                })
            });
            if safe {
                colors[idx] = candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::distance::floyd_warshall;
    use crate::wang_set::WangSetType;

    fn chain_set() -> WangSet {
        // Grass(1) - Dirt(2) - Sand(3), a chain: distance(Grass,Sand) = 2.
        let mut set = WangSet::new("Chain", WangSetType::Corner);
        set.add_color(Color::new(1, "Grass", "#4caf50"));
        set.add_color(Color::new(2, "Dirt", "#8a5a2b"));
        set.add_color(Color::new(3, "Sand", "#d2b48c"));
        let dm = floyd_warshall(3, |a, b| (a == 1 && b == 2) || (a == 2 && b == 3));
        set.set_distance_matrix(dm.distance);
        set.set_next_hop_matrix(dm.next_hop);
        set
    }

    #[test]
    fn smoothing_removes_direct_adjacency_of_distant_colors() {
        let set = chain_set();
        let width = 3;
        let height = 1;
        let mut colors = vec![1, 3, 1]; // Grass, Sand, Grass: Grass-Sand is distance 2
        smooth_borders(&mut colors, width, height, &set);
        for &c in &colors {
            assert_ne!(c, 0);
        }
        // Every adjacent pair must now be within colorDistance 1.
        for x in 0..width - 1 {
            let a = colors[index(width, x, 0)];
            let b = colors[index(width, x + 1, 0)];
            assert!(set.color_distance(a, b) <= 1, "adjacent {a} and {b} still far apart");
        }
    }

    #[test]
    fn smoothing_is_a_no_op_on_already_valid_field() {
        let set = chain_set();
        let mut colors = vec![1, 2, 2, 3];
        let before = colors.clone();
        smooth_borders(&mut colors, 4, 1, &set);
        assert_eq!(colors, before);
    }

    #[test]
    fn sprinkle_with_zero_amount_is_a_no_op() {
        let set = chain_set();
        let mut colors = vec![1; 16];
        let before = colors.clone();
        sprinkle_variety(&mut colors, 4, 4, &set, 5, 0.0);
        assert_eq!(colors, before);
    }

    #[test]
    fn sprinkle_never_breaks_the_distance_one_invariant() {
        let set = chain_set();
        let mut colors = vec![2; 100]; // 10x10 all Dirt
        sprinkle_variety(&mut colors, 10, 10, &set, 123, 0.5);
        for y in 0..10 {
            for x in 0..10 {
                let c = colors[index(10, x, y)];
                for dy in -1..=1i32 {
                    for dx in -1..=1i32 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let (nx, ny) = (x + dx, y + dy);
                        if nx < 0 || ny < 0 || nx >= 10 || ny >= 10 {
                            continue;
                        }
                        let nc = colors[index(10, nx, ny)];
                        assert!(set.color_distance(c, nc) <= 1);
                    }
                }
            }
        }
    }
}
