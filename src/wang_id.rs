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

//! `WangId`: an immutable 8-slot corner/edge pattern plus the symmetry
//! operations (rotate, flip, transpose) used by the variant generator and
//! the best-match resolver.

use crate::color::ColorId;
use crate::offset::{SLOT_BL, SLOT_BR, SLOT_COUNT, SLOT_L, SLOT_R, SLOT_T, SLOT_TL, SLOT_TR};
use serde::{Deserialize, Serialize};

/// An ordered 8-slot pattern indexed 0..7 in compass order (T, TR, R, BR, B,
/// BL, L, TL). Even indices are edges, odd indices are corners. `0` means
/// wildcard/don't-care; positive values are color ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WangId(pub [ColorId; SLOT_COUNT]);

impl WangId {
    /// The all-wildcard pattern.
    pub const EMPTY: WangId = WangId([0; SLOT_COUNT]);

    /// Build a `WangId` from its 8 slot values, in compass order.
    pub fn new(slots: [ColorId; SLOT_COUNT]) -> Self {
        Self(slots)
    }

    /// Value at `slot` (0..8).
    #[inline]
    pub fn slot(&self, slot: usize) -> ColorId {
        self.0[slot]
    }

    /// Mutable access to the value at `slot`.
    #[inline]
    pub fn slot_mut(&mut self, slot: usize) -> &mut ColorId {
        &mut self.0[slot]
    }

    /// `matches` checks that for every index, either side is wildcard or the
    /// values agree. Used for wildcard matching during surroundings derivation.
    pub fn matches(&self, other: &WangId) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| *a == 0 || *b == 0 || a == b)
    }

    /// Rotate the pattern 90 degrees clockwise: cyclically shift slot values
    /// by +2 (mod 8).
    pub fn rotate90(&self) -> WangId {
        let mut out = WangId::EMPTY;
        for slot in 0..SLOT_COUNT {
            out.0[(slot + 2) % SLOT_COUNT] = self.0[slot];
        }
        out
    }

    /// Mirror across the vertical axis: swap {TR<->TL, R<->L, BR<->BL}.
    pub fn flip_h(&self) -> WangId {
        let mut out = *self;
        out.0.swap(SLOT_TR, SLOT_TL);
        out.0.swap(SLOT_R, SLOT_L);
        out.0.swap(SLOT_BR, SLOT_BL);
        out
    }

    /// Mirror across the horizontal axis: swap {T<->B, TR<->BR, TL<->BL}.
    pub fn flip_v(&self) -> WangId {
        let mut out = *self;
        out.0.swap(SLOT_T, crate::offset::SLOT_B);
        out.0.swap(SLOT_TR, SLOT_BR);
        out.0.swap(SLOT_TL, SLOT_BL);
        out
    }

    /// Anti-diagonal transpose: swap {T<->L, TR<->BL, R<->B}; TL and BR are
    /// fixed points of this reflection.
    pub fn transpose(&self) -> WangId {
        let mut out = *self;
        out.0.swap(SLOT_T, SLOT_L);
        out.0.swap(SLOT_TR, SLOT_BL);
        out.0.swap(SLOT_R, crate::offset::SLOT_B);
        out
    }
}
