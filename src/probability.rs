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

use rand::Rng;

/// A set of values of type `V` where each value is associated with a frequency
/// so that a value can be chosen from the set at random with the probability of
/// each value weighted by its frequency.
#[derive(Debug, Clone)]
pub struct ProbabilitySet<V> {
    total: f32,
    content: Vec<(f32, V)>,
}

impl<V> Default for ProbabilitySet<V> {
    fn default() -> Self {
        Self {
            total: 0.0,
            content: Vec::default(),
        }
    }
}

impl<V> ProbabilitySet<V> {
    /// Iterate through all the items in the set and their frequencies.
    pub fn iter(&self) -> impl Iterator<Item = (f32, &V)> {
        self.content.iter().map(|(f, v)| (*f, v))
    }
    /// The number of elements in the set.
    pub fn len(&self) -> usize {
        self.content.len()
    }
    /// True if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
    /// Remove the content of the set.
    pub fn clear(&mut self) {
        self.total = 0.0;
        self.content.clear();
    }
    /// Add a value and give it a frequency. Frequencies of zero or less are ignored.
    pub fn add(&mut self, frequency: f32, value: V) {
        if frequency > 0.0 {
            self.total += frequency;
            self.content.push((frequency, value));
        }
    }
    /// The sum of the frequencies of all the elements of the set.
    pub fn total_frequency(&self) -> f32 {
        self.total
    }
    /// Choose a value from the set using the given random number generator.
    /// The probability of each element being chosen is its frequency divided
    /// by the sum of the frequencies of all elements.
    pub fn get_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&V> {
        if self.total <= 0.0 {
            return None;
        }
        let mut p = rng.gen_range(0.0..self.total);
        for (f, v) in self.iter() {
            if p < f {
                return Some(v);
            }
            p -= f;
        }
        self.iter().next().map(|v| v.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;
    use fxhash::FxHashMap;

    #[test]
    fn empty_set_returns_none() {
        let set = ProbabilitySet::<u32>::default();
        assert_eq!(set.get_random(&mut SeededRng::new(0)), None);
    }

    #[test]
    fn single_value_always_wins() {
        let mut set = ProbabilitySet::<u32>::default();
        set.add(0.65, 27);
        let mut rng = SeededRng::new(0);
        for _ in 0..3 {
            assert_eq!(set.get_random(&mut rng), Some(&27));
        }
    }

    #[test]
    fn weighted_choice_respects_frequency_ratio() {
        let mut set = ProbabilitySet::<u32>::default();
        set.add(0.5, 1);
        set.add(1.0, 2);
        let mut rng = SeededRng::new(7);
        let mut counts = FxHashMap::<u32, usize>::default();
        for _ in 0..3000 {
            if let Some(v) = set.get_random(&mut rng) {
                *counts.entry(*v).or_default() += 1;
            }
        }
        let one = *counts.get(&1).unwrap_or(&0) as f64;
        let two = *counts.get(&2).unwrap_or(&0) as f64;
        let ratio = two / one;
        assert!((1.7..2.3).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn zero_frequency_is_ignored() {
        let mut set = ProbabilitySet::<u32>::default();
        set.add(0.0, 1);
        set.add(-1.0, 2);
        assert!(set.is_empty());
        assert_eq!(set.total_frequency(), 0.0);
    }
}
