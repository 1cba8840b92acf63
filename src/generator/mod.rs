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

//! Procedural base-fill algorithms: noise, voronoi, and five-quadrant zones.
//! Every algorithm here produces a plain color array — resolving that array
//! into concrete tiles is the painter's job, run separately by the caller.

pub mod post;

use crate::color::ColorId;
use crate::noise::Simplex2;
use crate::rng::SeededRng;
use rand::Rng;

/// A weighted biome used by the noise and voronoi fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biome {
    pub color: ColorId,
    pub weight: f64,
}

/// Default octave weights for the base-fill noise sample.
pub const DEFAULT_OCTAVE_WEIGHTS: [f64; 3] = [1.0, 0.5, 0.25];
/// Default noise scale.
pub const DEFAULT_SCALE: f64 = 0.05;
/// Default total voronoi seed-point count.
pub const DEFAULT_POINT_COUNT: usize = 30;
/// Default sprinkle amount.
pub const DEFAULT_SPRINKLE_AMOUNT: f64 = 0.15;

#[inline]
fn index(width: i32, x: i32, y: i32) -> usize {
    (y as usize) * (width as usize) + (x as usize)
}

/// Multi-octave simplex noise thresholded into biomes whose widths are
/// proportional to their configured weights.
pub fn generate_noise(width: i32, height: i32, biomes: &[Biome], seed: u64, scale: f64) -> Vec<ColorId> {
    let simplex = Simplex2::new(seed);
    let total_weight: f64 = biomes.iter().map(|b| b.weight).sum();
    let mut out = vec![0; (width.max(0) as usize) * (height.max(0) as usize)];
    if biomes.is_empty() || total_weight <= 0.0 {
        return out;
    }
    for y in 0..height {
        for x in 0..width {
            let sample = simplex.octaves01(x as f64, y as f64, scale, &DEFAULT_OCTAVE_WEIGHTS);
            out[index(width, x, y)] = biome_for_threshold(biomes, total_weight, sample);
        }
    }
    out
}

/// Pick the biome whose cumulative-weight segment of `[0, 1)` contains
/// `sample`. The last biome absorbs any floating-point overshoot at 1.0.
fn biome_for_threshold(biomes: &[Biome], total_weight: f64, sample: f64) -> ColorId {
    let mut cumulative = 0.0;
    let target = sample * total_weight;
    for biome in biomes {
        cumulative += biome.weight;
        if target < cumulative {
            return biome.color;
        }
    }
    biomes.last().map(|b| b.color).unwrap_or(0)
}

/// Scatter seed points with per-biome counts proportional to weight (minimum
/// 1 per biome, total approximately `point_count`); each cell takes the
/// color of its nearest point by squared Euclidean distance.
pub fn generate_voronoi(
    width: i32,
    height: i32,
    biomes: &[Biome],
    seed: u64,
    point_count: usize,
) -> Vec<ColorId> {
    let mut out = vec![0; (width.max(0) as usize) * (height.max(0) as usize)];
    if biomes.is_empty() || width <= 0 || height <= 0 {
        return out;
    }

    let mut rng = SeededRng::new(seed);
    let total_weight: f64 = biomes.iter().map(|b| b.weight.max(0.0)).sum();
    let mut points: Vec<(f64, f64, ColorId)> = Vec::new();
    for biome in biomes {
        let share = if total_weight > 0.0 {
            (biome.weight.max(0.0) / total_weight) * point_count as f64
        } else {
            0.0
        };
        let count = (share.round() as usize).max(1);
        for _ in 0..count {
            let px = rng.gen_range(0..width) as f64;
            let py = rng.gen_range(0..height) as f64;
            points.push((px, py, biome.color));
        }
    }

    for y in 0..height {
        for x in 0..width {
            let mut best_dist = f64::MAX;
            let mut best_color = 0;
            for &(px, py, color) in &points {
                let dx = x as f64 - px;
                let dy = y as f64 - py;
                let d = dx * dx + dy * dy;
                if d < best_dist {
                    best_dist = d;
                    best_color = color;
                }
            }
            out[index(width, x, y)] = best_color;
        }
    }
    out
}

/// Five-quadrant zone fill: a center diamond plus NW/NE/SW/SE quadrants,
/// boundaries perturbed by simplex noise so edges read as organic rather
/// than geometric.
pub fn generate_zones(
    width: i32,
    height: i32,
    center: ColorId,
    nw: ColorId,
    ne: ColorId,
    sw: ColorId,
    se: ColorId,
    seed: u64,
    boundary_noise: f64,
) -> Vec<ColorId> {
    let mut out = vec![0; (width.max(0) as usize) * (height.max(0) as usize)];
    if width <= 0 || height <= 0 {
        return out;
    }
    let simplex = Simplex2::new(seed);
    let mid_x = width as f64 / 2.0;
    let mid_y = height as f64 / 2.0;
    let half_x = mid_x.max(1.0);
    let half_y = mid_y.max(1.0);

    for y in 0..height {
        for x in 0..width {
            let nx = (x as f64 - mid_x) / half_x;
            let ny = (y as f64 - mid_y) / half_y;

            let center_perturb = simplex.sample(nx * 2.0, ny * 2.0) * boundary_noise * 0.4;
            let color = if nx.abs() + ny.abs() + center_perturb < 0.8 {
                center
            } else {
                // Independent wavy boundaries: the horizontal split line
                // wobbles along x, the vertical split line wobbles along y.
                let h_perturb = simplex.sample(x as f64 * 0.05, 777.0) * boundary_noise;
                let v_perturb = simplex.sample(777.0, y as f64 * 0.05) * boundary_noise;
                let is_top = ny < h_perturb;
                let is_left = nx < v_perturb;
                match (is_top, is_left) {
                    (true, true) => nw,
                    (true, false) => ne,
                    (false, true) => sw,
                    (false, false) => se,
                }
            };
            out[index(width, x, y)] = color;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIOMES: [Biome; 2] = [Biome { color: 1, weight: 1.0 }, Biome { color: 2, weight: 1.0 }];

    #[test]
    fn noise_is_deterministic() {
        let a = generate_noise(16, 16, &BIOMES, 7, DEFAULT_SCALE);
        let b = generate_noise(16, 16, &BIOMES, 7, DEFAULT_SCALE);
        assert_eq!(a, b);
    }

    #[test]
    fn noise_uses_only_configured_colors() {
        let out = generate_noise(20, 20, &BIOMES, 42, DEFAULT_SCALE);
        assert!(out.iter().all(|&c| c == 1 || c == 2));
    }

    #[test]
    fn voronoi_is_deterministic() {
        let a = generate_voronoi(24, 24, &BIOMES, 3, DEFAULT_POINT_COUNT);
        let b = generate_voronoi(24, 24, &BIOMES, 3, DEFAULT_POINT_COUNT);
        assert_eq!(a, b);
    }

    #[test]
    fn voronoi_covers_every_cell() {
        let out = generate_voronoi(10, 10, &BIOMES, 1, DEFAULT_POINT_COUNT);
        assert!(out.iter().all(|&c| c != 0));
    }

    #[test]
    fn zones_are_deterministic() {
        let a = generate_zones(30, 30, 1, 2, 3, 4, 5, 9, 0.3);
        let b = generate_zones(30, 30, 1, 2, 3, 4, 5, 9, 0.3);
        assert_eq!(a, b);
    }

    #[test]
    fn zones_center_is_the_configured_color() {
        let out = generate_zones(30, 30, 9, 2, 3, 4, 5, 11, 0.1);
        // Small boundary_noise keeps the exact center well inside the diamond.
        assert_eq!(out[index(30, 15, 15)], 9);
    }
}
