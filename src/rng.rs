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

//! A small deterministic pseudo-random generator. The resolver's tie-break,
//! the procedural generator's point scatter, and the simplex permutation
//! shuffle all need a sequence that is fixed forever given the same seed,
//! independent of whatever algorithm the `rand` crate happens to ship; this
//! xorshift* generator is that fixed sequence, exposed through `rand::RngCore`
//! so it drops into every `R: Rng` bound used elsewhere in this crate.

use rand::{Error, RngCore};

/// A 64-bit xorshift* pseudo-random generator with a fixed, documented
/// transition function. Never reseed this type's internals without bumping
/// a version marker anywhere the exact sequence is relied upon (see the
/// fixed reference vectors in the tests below).
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a 64-bit seed. A seed of 0 is remapped to a
    /// fixed non-zero constant since an all-zero xorshift state never changes.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9E3779B97F4A7C15 } else { seed },
        }
    }

    /// Advance the internal state and return the next raw 64-bit word.
    fn next_u64_raw(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64_raw() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_raw()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_u64_raw().to_le_bytes());
        }
        let rem = chunks.into_remainder();
        if !rem.is_empty() {
            let bytes = self.next_u64_raw().to_le_bytes();
            rem.copy_from_slice(&bytes[..rem.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Derive a child seed from a parent seed plus a position, for use where a
/// deterministic-per-cell `SeededRng` is needed (e.g. the resolver's
/// probability-weighted tie-break, fed by the surrounding cell coordinates).
/// Mixes with the same xorshift step so the derived stream is as
/// well-distributed as the parent.
pub fn derive_seed(parent: u64, x: i32, y: i32) -> u64 {
    let mut s = parent
        ^ (x as u32 as u64).wrapping_mul(0x9E3779B97F4A7C15)
        ^ (y as u32 as u64).wrapping_mul(0xC2B2AE3D27D4EB4F);
    s ^= s >> 33;
    s = s.wrapping_mul(0xFF51AFD7ED558CCD);
    s ^= s >> 33;
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRng::new(1);
        let mut b = SeededRng::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn zero_seed_is_not_degenerate() {
        let mut rng = SeededRng::new(0);
        let first = rng.next_u64();
        assert_ne!(first, 0);
        assert_ne!(rng.next_u64(), first);
    }

    #[test]
    fn derive_seed_is_deterministic_and_position_sensitive() {
        assert_eq!(derive_seed(7, 1, 2), derive_seed(7, 1, 2));
        assert_ne!(derive_seed(7, 1, 2), derive_seed(7, 2, 1));
    }

    #[test]
    fn fixed_reference_vector() {
        // Locks the exact transition function; changing it would silently
        // break every caller that relies on reproducing a seeded sequence.
        let mut rng = SeededRng::new(1);
        let first = rng.next_u64_raw();
        let second = rng.next_u64_raw();
        assert_eq!(first, 13473309256371520605);
        assert_eq!(second, 205591708820793437);
    }
}
