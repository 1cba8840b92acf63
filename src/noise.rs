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

//! Deterministic 2D simplex noise, seeded through [`SeededRng`] so that the
//! permutation table (and therefore every sample) is fixed for a given seed.

use crate::rng::SeededRng;
use rand::Rng;

const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (-std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
    (-std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
];

const F2: f64 = 0.36602540378443864676; // 0.5 * (sqrt(3) - 1)
const G2: f64 = 0.21132486540518711775; // (3 - sqrt(3)) / 6

/// A seeded 2D simplex noise sampler. Construction shuffles a 256-entry
/// permutation table with [`SeededRng`] (Fisher-Yates), so two samplers built
/// from the same seed produce identical output for every coordinate.
#[derive(Debug, Clone)]
pub struct Simplex2 {
    perm: [u8; 512],
}

impl Simplex2 {
    /// Build a sampler whose permutation table is deterministically shuffled
    /// from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut table: [u8; 256] = [0; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut rng = SeededRng::new(seed);
        for i in (1..table.len()).rev() {
            let j = rng.gen_range(0..=i);
            table.swap(i, j);
        }
        let mut perm = [0u8; 512];
        for i in 0..512 {
            perm[i] = table[i % 256];
        }
        Self { perm }
    }

    fn grad(&self, hash: i64, x: f64, y: f64) -> f64 {
        let idx = (self.perm[(hash & 255) as usize] % 8) as usize;
        let (gx, gy) = GRADIENTS[idx];
        gx * x + gy * y
    }

    /// Sample noise at `(x, y)`. The result is in the approximate range
    /// `[-1.0, 1.0]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0_origin = i - t;
        let y0_origin = j - t;
        let x0 = x - x0_origin;
        let y0 = y - y0_origin;

        let (i1, j1) = if x0 > y0 { (1i64, 0i64) } else { (0i64, 1i64) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64) & 255;
        let jj = (j as i64) & 255;

        let mut n0 = 0.0;
        let mut t0 = 0.5 - x0 * x0 - y0 * y0;
        if t0 > 0.0 {
            t0 *= t0;
            let gi0 = self.perm[(ii + self.perm[jj as usize] as i64) as usize] as i64;
            n0 = t0 * t0 * self.grad(gi0, x0, y0);
        }

        let mut n1 = 0.0;
        let mut t1 = 0.5 - x1 * x1 - y1 * y1;
        if t1 > 0.0 {
            t1 *= t1;
            let gi1 =
                self.perm[(ii + i1 + self.perm[(jj + j1) as usize] as i64) as usize] as i64;
            n1 = t1 * t1 * self.grad(gi1, x1, y1);
        }

        let mut n2 = 0.0;
        let mut t2 = 0.5 - x2 * x2 - y2 * y2;
        if t2 > 0.0 {
            t2 *= t2;
            let gi2 = self.perm[(ii + 1 + self.perm[(jj + 1) as usize] as i64) as usize] as i64;
            n2 = t2 * t2 * self.grad(gi2, x2, y2);
        }

        70.0 * (n0 + n1 + n2)
    }

    /// Sample noise normalized into `[0.0, 1.0)`.
    pub fn sample01(&self, x: f64, y: f64) -> f64 {
        ((self.sample(x, y) + 1.0) * 0.5).clamp(0.0, 0.999_999_999)
    }

    /// Multi-octave sum at `(x, y)` using the given octave weights (default:
    /// `[1.0, 0.5, 0.25]` at doublings of `scale`), normalized into
    /// `[0.0, 1.0)`.
    pub fn octaves01(&self, x: f64, y: f64, scale: f64, weights: &[f64]) -> f64 {
        let mut total = 0.0;
        let mut weight_sum = 0.0;
        let mut freq = scale;
        for &w in weights {
            total += self.sample(x * freq, y * freq) * w;
            weight_sum += w;
            freq *= 2.0;
        }
        if weight_sum <= 0.0 {
            return 0.0;
        }
        ((total / weight_sum + 1.0) * 0.5).clamp(0.0, 0.999_999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_samples() {
        let a = Simplex2::new(123);
        let b = Simplex2::new(123);
        for i in 0..20 {
            let x = i as f64 * 0.37;
            let y = i as f64 * 1.91;
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = Simplex2::new(1);
        let b = Simplex2::new(2);
        let mut differences = 0;
        for i in 0..20 {
            let x = i as f64 * 0.37;
            let y = i as f64 * 1.91;
            if a.sample(x, y) != b.sample(x, y) {
                differences += 1;
            }
        }
        assert!(differences > 10, "expected most samples to differ");
    }

    #[test]
    fn samples_are_bounded() {
        let n = Simplex2::new(99);
        for i in 0..200 {
            let x = i as f64 * 0.1;
            let y = (i * 3) as f64 * 0.1;
            let v = n.sample(x, y);
            assert!((-1.2..=1.2).contains(&v), "sample out of range: {v}");
            let v01 = n.sample01(x, y);
            assert!((0.0..1.0).contains(&v01));
        }
    }

    #[test]
    fn octaves_are_normalized() {
        let n = Simplex2::new(5);
        for i in 0..50 {
            let v = n.octaves01(i as f64 * 0.05, i as f64 * 0.07, 0.05, &[1.0, 0.5, 0.25]);
            assert!((0.0..1.0).contains(&v));
        }
    }
}
