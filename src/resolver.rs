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

//! The best-match resolver: scores every variant of a `WangSet` against a
//! desired pattern and picks the minimum-penalty one, tie-breaking with a
//! deterministic per-cell draw.

use crate::map::Cell;
use crate::probability::ProbabilitySet;
use crate::rng::SeededRng;
use crate::variant::Variant;
use crate::wang_id::WangId;
use crate::wang_set::{WangSet, WangSetType};

/// Cost assigned to a slot where the desired color is specific but the
/// variant's slot is a wildcard (the soft-mismatch case). Chosen to sit
/// below any real single-hop color mismatch distance so an exact match is
/// always preferred over a wildcard, but a wildcard is always preferred
/// over a color two or more hops away.
const WILDCARD_SLOT_PENALTY: i32 = 1;

/// Cost assigned per slot when the two colors have no path between them at
/// all (treating an unreachable pair as a large constant greater than any
/// real distance times slot-count).
fn unreachable_penalty(slot_count: i32) -> i32 {
    let max_real_distance = 8; // no WangSet has more than 8 slots of color variety to chain through
    max_real_distance * slot_count + 1
}

/// Score a single variant's pattern against `desired` under `set_type`.
/// Returns `(hardMismatches, softPenalty)`; the caller adds the transform
/// penalty separately since it depends on the WangSet's
/// `preferUntransformed` flag, not the pattern alone.
fn score_pattern(wang_set: &WangSet, desired: &WangId, candidate: &WangId, set_type: WangSetType) -> (u32, i32) {
    let mut hard = 0u32;
    let mut soft = 0i32;
    for slot in set_type.active_slots() {
        let v = desired.slot(slot);
        let w = candidate.slot(slot);
        if v == 0 {
            continue;
        }
        if w == 0 {
            soft += WILDCARD_SLOT_PENALTY;
        } else if w == v {
            // exact match, zero cost
        } else {
            hard += 1;
            let d = wang_set.color_distance(v, w);
            if d < 0 {
                soft += unreachable_penalty(crate::offset::SLOT_COUNT as i32);
            } else {
                soft += d;
            }
        }
    }
    (hard, soft)
}

/// True if the desired pattern names two distinct non-zero colors with a
/// finite distance between them, or names fewer than two distinct colors
/// (trivially satisfiable). False means every pair of colors present in the
/// desired pattern is mutually unreachable, so no WangSet tile could ever
/// legally cover this pattern.
fn any_color_pair_in_desired_is_reachable(wang_set: &WangSet, desired: &WangId, set_type: WangSetType) -> bool {
    let colors: Vec<u32> = {
        let mut cs: Vec<u32> = set_type
            .active_slots()
            .map(|s| desired.slot(s))
            .filter(|&c| c != 0)
            .collect();
        cs.sort_unstable();
        cs.dedup();
        cs
    };
    if colors.len() < 2 {
        return true;
    }
    colors
        .iter()
        .enumerate()
        .any(|(i, &a)| colors[i + 1..].iter().any(|&b| wang_set.color_distance(a, b) >= 0))
}

/// Find the best-matching variant for `desired` and convert it into a
/// concrete `Cell`. Returns `None` when no variant has a finite score (no
/// reachable color pair covers the desired pattern) — a resolution gap,
/// which the caller should log and treat as an empty cell.
///
/// `seed_x`/`seed_y` are the map coordinates of the cell being resolved and
/// `parent_seed` is the map's generation/session seed; together they drive
/// the deterministic tie-break so repeated resolves of the same cell always
/// pick the same variant.
pub fn find_best_match(
    wang_set: &WangSet,
    desired: &WangId,
    set_type: WangSetType,
    parent_seed: u64,
    seed_x: i32,
    seed_y: i32,
) -> Option<Cell> {
    let prefer_untransformed = wang_set.transformation_config().prefer_untransformed;

    let mut best_score: Option<(u32, i32)> = None;
    let mut best_variants: Vec<&Variant> = Vec::new();

    for variant in wang_set.all_variants() {
        let (hard, soft) = score_pattern(wang_set, desired, &variant.wang_id, set_type);
        let transform_penalty = if prefer_untransformed {
            variant.transform.flip_count() as i32
        } else {
            0
        };
        let score = (hard, soft + transform_penalty);
        match best_score {
            None => {
                best_score = Some(score);
                best_variants.clear();
                best_variants.push(variant);
            }
            Some(current_best) => {
                if score < current_best {
                    best_score = Some(score);
                    best_variants.clear();
                    best_variants.push(variant);
                } else if score == current_best {
                    best_variants.push(variant);
                }
            }
        }
    }

    let (hard, _) = best_score?;
    if hard > 0 && !any_color_pair_in_desired_is_reachable(wang_set, desired, set_type) {
        // No variant achieves zero hard mismatches, and the desired pattern
        // itself names colors that can never sit next to one another: a
        // genuine resolution gap, not just a missing tile.
        return None;
    }

    let winner = if best_variants.len() == 1 {
        best_variants[0]
    } else {
        pick_by_probability(wang_set, &best_variants, parent_seed, seed_x, seed_y)
    };

    Some(Cell {
        tile_id: winner.source_tile.1 as i32,
        tileset_index: winner.source_tile.0,
        flip_h: winner.transform.flip_h,
        flip_v: winner.transform.flip_v,
        flip_d: winner.transform.flip_d,
    })
}

/// Weight a variant by the product of `color.probability` over its
/// pattern's non-zero slots. Flips and rotations permute slot positions
/// without changing the multiset of slot values, so this is equal to the
/// same product computed against the un-transformed base tile.
fn variant_weight(wang_set: &WangSet, variant: &Variant) -> f32 {
    variant
        .wang_id
        .0
        .iter()
        .filter(|&&c| c != 0)
        .map(|&c| wang_set.get_color(c).map(|color| color.probability).unwrap_or(1.0))
        .product()
}

fn pick_by_probability<'a>(
    wang_set: &WangSet,
    variants: &[&'a Variant],
    parent_seed: u64,
    x: i32,
    y: i32,
) -> &'a Variant {
    let mut set = ProbabilitySet::default();
    for (i, variant) in variants.iter().enumerate() {
        let weight = variant_weight(wang_set, variant).max(f32::EPSILON);
        set.add(weight, i);
    }
    let mut rng = SeededRng::new(crate::rng::derive_seed(parent_seed, x, y));
    let idx = *set.get_random(&mut rng).unwrap_or(&0);
    variants[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::variant::{generate_variants, TransformationConfig};

    fn pattern(t: u32, tr: u32, r: u32, br: u32, b: u32, bl: u32, l: u32, tl: u32) -> WangId {
        WangId::new([t, tr, r, br, b, bl, l, tl])
    }

    fn corner_set() -> WangSet {
        // Two colors, 4 base tiles covering all corner combinations with
        // a direct Floyd-Warshall-style adjacency of colorDistance<=1.
        let mut set = WangSet::new("Test", WangSetType::Corner);
        set.add_color(Color::new(1, "Grass", "#00ff00"));
        set.add_color(Color::new(2, "Dirt", "#8a5a2b"));
        let bases = [
            (0u32, pattern(0, 1, 0, 1, 0, 1, 0, 1)), // all grass
            (1u32, pattern(0, 1, 0, 1, 0, 2, 0, 2)), // dirt on left
            (2u32, pattern(0, 2, 0, 2, 0, 2, 0, 2)), // all dirt
        ];
        let mut mappings = Vec::new();
        for (id, p) in bases {
            set.add_tile_mapping(0, id, p);
            mappings.push(((0usize, id), p));
        }
        let variants = generate_variants(mappings, TransformationConfig::NONE);
        set.set_variants(variants);
        let dm = crate::distance::floyd_warshall(2, |a, b| a != b);
        set.set_distance_matrix(dm.distance);
        set.set_next_hop_matrix(dm.next_hop);
        set
    }

    #[test]
    fn exact_match_has_zero_score() {
        let set = corner_set();
        let desired = pattern(0, 1, 0, 1, 0, 1, 0, 1);
        let cell = find_best_match(&set, &desired, WangSetType::Corner, 0, 0, 0).unwrap();
        assert_eq!(cell.tile_id, 0);
    }

    #[test]
    fn deterministic_across_repeated_calls() {
        let set = corner_set();
        let desired = pattern(0, 1, 0, 1, 0, 2, 0, 2);
        let a = find_best_match(&set, &desired, WangSetType::Corner, 42, 3, 5);
        let b = find_best_match(&set, &desired, WangSetType::Corner, 42, 3, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_desired_pattern_resolves_to_some_variant() {
        let set = corner_set();
        let desired = WangId::EMPTY;
        assert!(find_best_match(&set, &desired, WangSetType::Corner, 0, 0, 0).is_some());
    }

    #[test]
    fn reachable_color_mismatch_still_counts_as_a_hard_mismatch() {
        let set = corner_set();
        let desired = pattern(0, 1, 0, 1, 0, 1, 0, 1);
        let candidate = pattern(0, 2, 0, 1, 0, 1, 0, 1);
        let (hard, soft) = score_pattern(&set, &desired, &candidate, WangSetType::Corner);
        assert_eq!(hard, 1);
        assert_eq!(soft, 1);
    }

    #[test]
    fn zero_hard_wildcard_variant_outranks_a_reachable_mismatch_variant() {
        let set = corner_set();
        let desired = pattern(0, 1, 0, 1, 0, 1, 0, 1);
        let all_wildcards = pattern(0, 0, 0, 0, 0, 0, 0, 0);
        let one_wrong_color = pattern(0, 2, 0, 1, 0, 1, 0, 1);

        let wildcard_score = score_pattern(&set, &desired, &all_wildcards, WangSetType::Corner);
        let mismatch_score = score_pattern(&set, &desired, &one_wrong_color, WangSetType::Corner);

        assert_eq!(wildcard_score.0, 0);
        assert!(mismatch_score.0 > 0);
        // Lexicographic ordering compares hardMismatches first: the all-wildcard
        // variant wins even though its raw soft-penalty total is larger.
        assert!(wildcard_score < mismatch_score);
    }
}
