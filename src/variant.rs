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

//! The variant generator: expands each base tile mapping under the allowed
//! subset of the D4 symmetry group, exporting every orientation as the
//! `(flipH, flipV, flipD)` triple a sprite atlas sampler expects, and
//! deduplicating by resulting `WangId`.

use crate::wang_id::WangId;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Which symmetry operations are permitted when expanding a base tile into
/// variants, plus the tie-break preference at dedup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationConfig {
    /// Allow 90/180/270 degree rotations.
    pub allow_rotate: bool,
    /// Allow horizontal mirroring.
    pub allow_flip_h: bool,
    /// Allow vertical mirroring.
    pub allow_flip_v: bool,
    /// When two ops tie on flip-bit count at dedup time, prefer the
    /// identity transform.
    pub prefer_untransformed: bool,
}

impl TransformationConfig {
    /// No transformations permitted; only the identity variant is produced.
    pub const NONE: TransformationConfig = TransformationConfig {
        allow_rotate: false,
        allow_flip_h: false,
        allow_flip_v: false,
        prefer_untransformed: false,
    };

    /// All transformations permitted (the full 8-element D4 group, modulo
    /// dedup when the base pattern has internal symmetry).
    pub const ALL: TransformationConfig = TransformationConfig {
        allow_rotate: true,
        allow_flip_h: true,
        allow_flip_v: true,
        prefer_untransformed: false,
    };
}

/// The exported rendering primitive: an atlas sampler applies `flipD`
/// (transpose) first, then `flipH`, then `flipV`. Every one of the 8 D4
/// elements corresponds to exactly one `(flip_d, flip_h, flip_v)` triple
/// under this fixed composition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub flip_h: bool,
    pub flip_v: bool,
    pub flip_d: bool,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform {
        flip_h: false,
        flip_v: false,
        flip_d: false,
    };

    /// Number of true flip bits, used both as the canonicalization key
    /// (fewest true bits wins a dedup collision) and, when
    /// `preferUntransformed` is set, as the transform penalty term in the
    /// resolver's scoring tuple.
    pub fn flip_count(&self) -> u32 {
        self.flip_h as u32 + self.flip_v as u32 + self.flip_d as u32
    }

    fn apply(&self, base: WangId) -> WangId {
        let mut w = base;
        if self.flip_d {
            w = w.transpose();
        }
        if self.flip_h {
            w = w.flip_h();
        }
        if self.flip_v {
            w = w.flip_v();
        }
        w
    }
}

/// One expanded entry: the resulting pattern, which base tile it came from,
/// and the transform that produced it from that base tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    /// The pattern this variant matches against, post-transform.
    pub wang_id: WangId,
    /// `(tileset_index, tile_id)` of the base tile this variant was derived
    /// from.
    pub source_tile: (usize, u32),
    /// The `(flipH, flipV, flipD)` triple that produced `wang_id` from the
    /// base tile.
    pub transform: Transform,
}

/// The generation algorithm composes the group from three primary
/// generators — `rotate90` (0..=3 applications), `flipH`, `flipV` — applied
/// in that order, each independently gated by its own config flag. The
/// result is re-expressed as the fixed `(flipD, flipH, flipV)` render
/// triple every downstream consumer (atlas sampler, dedup) expects; this
/// table is the closed-form solution of that re-expression (16 raw
/// generator combinations double-cover the 8-element group).
fn raw_combo_to_triple(rotation: u8, raw_flip_h: bool, raw_flip_v: bool) -> Transform {
    let (flip_d, flip_h, flip_v) = match (rotation, raw_flip_h, raw_flip_v) {
        (0, false, false) => (false, false, false),
        (0, false, true) => (false, false, true),
        (0, true, false) => (false, true, false),
        (0, true, true) => (false, true, true),
        (1, false, false) => (true, true, false),
        (1, false, true) => (true, true, true),
        (1, true, false) => (true, false, false),
        (1, true, true) => (true, false, true),
        (2, false, false) => (false, true, true),
        (2, false, true) => (false, true, false),
        (2, true, false) => (false, false, true),
        (2, true, true) => (false, false, false),
        (3, false, false) => (true, false, true),
        (3, false, true) => (true, false, false),
        (3, true, false) => (true, true, true),
        (3, true, true) => (true, true, false),
        _ => unreachable!("rotation is taken mod 4"),
    };
    Transform { flip_h, flip_v, flip_d }
}

/// The transforms `config` allows, deduplicated to the distinct render
/// triples they produce (the 16 raw generator combinations double-cover the
/// 8-element group, so naive enumeration would apply some triples twice).
fn allowed_transforms(config: TransformationConfig) -> Vec<Transform> {
    let rotations: &[u8] = if config.allow_rotate { &[0, 1, 2, 3] } else { &[0] };
    let flips_h: &[bool] = if config.allow_flip_h { &[false, true] } else { &[false] };
    let flips_v: &[bool] = if config.allow_flip_v { &[false, true] } else { &[false] };

    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for &r in rotations {
        for &fh in flips_h {
            for &fv in flips_v {
                let t = raw_combo_to_triple(r, fh, fv);
                if seen.insert(t) {
                    out.push(t);
                }
            }
        }
    }
    out
}

/// Expand `(source_tile, base_wang_id)` pairs into the full variant list,
/// restricted to the operations `config` allows, deduplicated by resulting
/// `WangId`. On a collision the variant with fewer true flip bits is kept;
/// if `config.prefer_untransformed` is set the identity transform always
/// wins regardless of bit count.
pub fn generate_variants(
    mappings: impl IntoIterator<Item = ((usize, u32), WangId)>,
    config: TransformationConfig,
) -> Vec<Variant> {
    let allowed = allowed_transforms(config);

    let mut by_pattern: std::collections::HashMap<WangId, Variant, fxhash::FxBuildHasher> =
        Default::default();
    for (source_tile, base) in mappings {
        for &transform in &allowed {
            let wang_id = transform.apply(base);
            let candidate = Variant { wang_id, source_tile, transform };
            match by_pattern.get(&wang_id) {
                None => {
                    by_pattern.insert(wang_id, candidate);
                }
                Some(existing) => {
                    let candidate_wins = if config.prefer_untransformed
                        && (candidate.transform == Transform::IDENTITY)
                            != (existing.transform == Transform::IDENTITY)
                    {
                        candidate.transform == Transform::IDENTITY
                    } else {
                        candidate.transform.flip_count() < existing.transform.flip_count()
                    };
                    if candidate_wins {
                        by_pattern.insert(wang_id, candidate);
                    }
                }
            }
        }
    }

    let mut out: Vec<Variant> = by_pattern.into_values().collect();
    out.sort_by_key(|v| (v.source_tile, v.wang_id.0));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(t: u32, tr: u32, r: u32, br: u32, b: u32, bl: u32, l: u32, tl: u32) -> WangId {
        WangId::new([t, tr, r, br, b, bl, l, tl])
    }

    #[test]
    fn no_transforms_yields_single_variant() {
        let base = pattern(1, 0, 2, 0, 1, 0, 2, 0);
        let variants = generate_variants([((0, 0), base)], TransformationConfig::NONE);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].transform, Transform::IDENTITY);
        assert_eq!(variants[0].wang_id, base);
    }

    #[test]
    fn fully_asymmetric_tile_yields_eight_variants() {
        let base = pattern(1, 2, 3, 4, 5, 6, 7, 8);
        let variants = generate_variants([((0, 0), base)], TransformationConfig::ALL);
        assert_eq!(variants.len(), 8);
        let unique: FxHashSet<_> = variants.iter().map(|v| v.wang_id).collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn symmetric_tile_dedups_and_keeps_identity() {
        // Uniform pattern is invariant under every transform in D4.
        let base = pattern(1, 1, 1, 1, 1, 1, 1, 1);
        let variants = generate_variants([((0, 0), base)], TransformationConfig::ALL);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].transform, Transform::IDENTITY);
    }

    #[test]
    fn flip_h_only_respects_config() {
        let base = pattern(1, 2, 3, 4, 5, 6, 7, 8);
        let config = TransformationConfig {
            allow_rotate: false,
            allow_flip_h: true,
            allow_flip_v: false,
            prefer_untransformed: false,
        };
        let variants = generate_variants([((0, 0), base)], config);
        assert_eq!(variants.len(), 2);
        assert!(variants.iter().all(|v| !v.transform.flip_v && !v.transform.flip_d));
    }

    #[test]
    fn sixteen_tile_corner_set_flip_h_only() {
        // 16 base tiles covering every combination of two colors at
        // the 4 corners, allowFlipH only. Every base either yields 2
        // variants (identity + flipH) or 1 (already left-right symmetric),
        // and the total distinct-by-pattern variant count is 16.
        let colors = [1u32, 2u32];
        let mut mappings = Vec::new();
        let mut tile_id = 0u32;
        for &tl in &colors {
            for &tr in &colors {
                for &br in &colors {
                    for &bl in &colors {
                        mappings.push(((0, tile_id), pattern(0, tr, 0, br, 0, bl, 0, tl)));
                        tile_id += 1;
                    }
                }
            }
        }
        let config = TransformationConfig {
            allow_rotate: false,
            allow_flip_h: true,
            allow_flip_v: false,
            prefer_untransformed: false,
        };
        let variants = generate_variants(mappings, config);
        let unique: FxHashSet<_> = variants.iter().map(|v| v.wang_id).collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn transform_flip_count_matches_true_bits() {
        assert_eq!(Transform::IDENTITY.flip_count(), 0);
        assert_eq!(
            Transform { flip_h: true, flip_v: false, flip_d: true }.flip_count(),
            2
        );
    }

    #[test]
    fn prefer_untransformed_breaks_ties_to_identity() {
        let base = pattern(1, 1, 1, 1, 1, 1, 1, 1);
        let config = TransformationConfig {
            allow_rotate: true,
            allow_flip_h: true,
            allow_flip_v: true,
            prefer_untransformed: true,
        };
        let variants = generate_variants([((0, 0), base)], config);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].transform, Transform::IDENTITY);
    }
}
