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

use serde::{Deserialize, Serialize};

/// A terrain color id. `0` means "empty/erase"; colors are otherwise dense
/// and 1-based.
pub type ColorId = u32;

/// A reference to a tile within a particular tileset, used as a color's
/// representative tile for UI display and flood-fill seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRef {
    /// Index of the tileset within the project's tileset list.
    pub tileset_index: usize,
    /// Tile id within that tileset (row-major).
    pub tile_id: u32,
}

/// A named terrain color. The color id is the only thing the resolver cares
/// about; `swatch` is advisory display data for a UI layered on top of this
/// crate and must never be used to drive resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    /// Dense, 1-based identifier. `0` is reserved for "empty".
    pub id: ColorId,
    /// Display name.
    pub name: String,
    /// Hex swatch string (e.g. `"#7fae5c"`), UI-only.
    pub swatch: String,
    /// Relative placement probability; used by the resolver's tie-break to
    /// weight variants whose base tile carries this color. Defaults to 1.0.
    #[serde(default = "default_probability")]
    pub probability: f32,
    /// Optional representative tile, used by UI and flood-fill seeding.
    #[serde(default)]
    pub tile: Option<TileRef>,
}

fn default_probability() -> f32 {
    1.0
}

impl Color {
    /// Construct a color with default probability and no representative tile.
    pub fn new(id: ColorId, name: impl Into<String>, swatch: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            swatch: swatch.into(),
            probability: default_probability(),
            tile: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_probability_is_one() {
        let c = Color::new(1, "Grass", "#5cae7f");
        assert_eq!(c.probability, 1.0);
        assert!(c.tile.is_none());
    }

    #[test]
    fn roundtrips_through_json() {
        let c = Color::new(2, "Dirt", "#8a5a2b");
        let json = serde_json::to_string(&c).unwrap();
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
