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

//! Atlas layout and rendering: packing deduplicated tiles from the
//! [`crate::bake::registry::TileRegistry`] into one or more square,
//! power-of-two texture sheets.

use crate::bake::registry::RegistryEntry;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

/// Fixed pixel size of one tile in the destination atlas. Source tiles
/// whose tileset declares a different `tileWidth`/`tileHeight` are cropped
/// (if larger) or letterboxed with transparency (if smaller), anchored at
/// the tile's top-left corner; see [`render_atlas_file`].
pub const TILE_SIZE: u32 = 16;
/// Largest edge length an atlas file may have, in pixels.
pub const MAX_ATLAS_PX: u32 = 2048;

/// The packing for a single atlas file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileLayout {
    /// Tile columns (and rows — files are always square).
    pub columns: u32,
    /// Edge length of the file in pixels (`columns * TILE_SIZE`).
    pub pixel_size: u32,
    /// Capacity of this file (`columns * columns`).
    pub tiles_per_file: u32,
    /// How many of the registry's tiles actually land in this file.
    pub tile_count: usize,
}

/// The full packing plan across every atlas file a bake produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasLayout {
    pub files: Vec<FileLayout>,
}

impl AtlasLayout {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

fn smallest_pow2_cols_for(tile_count: usize) -> u32 {
    let mut cols: u32 = 1;
    while (cols as u64) * (cols as u64) < tile_count as u64 {
        cols *= 2;
    }
    cols
}

/// Compute how `tile_count` unique tiles pack into one or more square atlas
/// files.
pub fn compute_atlas_layout(tile_count: usize) -> AtlasLayout {
    let max_cols = MAX_ATLAS_PX / TILE_SIZE;
    let max_per_file = (max_cols as usize) * (max_cols as usize);

    if tile_count <= max_per_file {
        let cols = smallest_pow2_cols_for(tile_count);
        return AtlasLayout {
            files: vec![FileLayout {
                columns: cols,
                pixel_size: cols * TILE_SIZE,
                tiles_per_file: cols * cols,
                tile_count,
            }],
        };
    }

    let file_count = tile_count.div_ceil(max_per_file);
    let mut files = Vec::with_capacity(file_count);
    for i in 0..file_count {
        let remaining = tile_count - i * max_per_file;
        if remaining >= max_per_file {
            files.push(FileLayout {
                columns: max_cols,
                pixel_size: max_cols * TILE_SIZE,
                tiles_per_file: max_cols * max_cols,
                tile_count: max_per_file,
            });
        } else {
            let cols = smallest_pow2_cols_for(remaining);
            files.push(FileLayout {
                columns: cols,
                pixel_size: cols * TILE_SIZE,
                tiles_per_file: cols * cols,
                tile_count: remaining,
            });
        }
    }
    AtlasLayout { files }
}

/// A loaded source tileset image plus the geometry needed to locate tiles
/// within it: column count (tiles per row) and the tileset's own declared
/// tile size, which may differ from [`TILE_SIZE`].
pub struct SourceTileset {
    pub image: DynamicImage,
    pub columns: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

/// Render one atlas file's pixels. `entries` must be exactly the slice of
/// registry entries assigned to this file, in insertion order. `sources` is
/// indexed by `tileset_index`.
///
/// Each source tile is addressed at its tileset's own pitch
/// (`tile_width`/`tile_height`), then copied into a fixed `TILE_SIZE`×
/// `TILE_SIZE` destination slot anchored at the tile's top-left corner:
/// larger source tiles are cropped, smaller ones are letterboxed with
/// transparency. Flips are applied to the destination slot, after cropping.
pub fn render_atlas_file(entries: &[RegistryEntry], layout: &FileLayout, sources: &[SourceTileset]) -> RgbaImage {
    let mut out = RgbaImage::new(layout.pixel_size, layout.pixel_size);
    for (i, entry) in entries.iter().enumerate() {
        let slot_x = (i as u32 % layout.columns) * TILE_SIZE;
        let slot_y = (i as u32 / layout.columns) * TILE_SIZE;
        let Some(source) = sources.get(entry.tileset_index) else {
            continue;
        };
        let src_cols = source.columns.max(1);
        let tile_w = source.tile_width.max(1);
        let tile_h = source.tile_height.max(1);
        let tile_col = entry.tile_id as u32 % src_cols;
        let tile_row = entry.tile_id as u32 / src_cols;
        let origin_x = tile_col * tile_w;
        let origin_y = tile_row * tile_h;

        for py in 0..TILE_SIZE {
            for px in 0..TILE_SIZE {
                let (mut sx, mut sy) = (px, py);
                if entry.flip_d {
                    std::mem::swap(&mut sx, &mut sy);
                }
                if entry.flip_h {
                    sx = TILE_SIZE - 1 - sx;
                }
                if entry.flip_v {
                    sy = TILE_SIZE - 1 - sy;
                }
                let in_tile_bounds = sx < tile_w && sy < tile_h;
                let src_x = origin_x + sx;
                let src_y = origin_y + sy;
                let pixel = if in_tile_bounds && src_x < source.image.width() && src_y < source.image.height() {
                    source.image.get_pixel(src_x, src_y)
                } else {
                    Rgba([0, 0, 0, 0])
                };
                out.put_pixel(slot_x + px, slot_y + py, pixel);
            }
        }
    }
    out
}

/// Split a registry's entries across the files of a computed [`AtlasLayout`].
pub fn partition_entries<'a>(entries: &'a [RegistryEntry], layout: &AtlasLayout) -> Vec<&'a [RegistryEntry]> {
    let mut out = Vec::with_capacity(layout.files.len());
    let mut offset = 0;
    for file in &layout.files {
        let end = (offset + file.tile_count).min(entries.len());
        out.push(&entries[offset..end]);
        offset = end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tile_packs_into_the_smallest_file() {
        let layout = compute_atlas_layout(1);
        assert_eq!(layout.files.len(), 1);
        let f = layout.files[0];
        assert_eq!((f.pixel_size, f.columns, f.tiles_per_file, f.tile_count), (16, 1, 1, 1));
    }

    #[test]
    fn hundred_tiles_pack_into_a_256px_sheet() {
        let layout = compute_atlas_layout(100);
        assert_eq!(layout.files.len(), 1);
        let f = layout.files[0];
        assert_eq!((f.pixel_size, f.columns, f.tiles_per_file), (256, 16, 256));
    }

    #[test]
    fn seventeen_thousand_tiles_overflow_into_two_files() {
        let layout = compute_atlas_layout(17000);
        assert_eq!(layout.file_count(), 2);
        let first = layout.files[0];
        assert_eq!(first.columns, 128);
        assert_eq!(first.tile_count, 16384);
        let second = layout.files[1];
        assert_eq!(second.tile_count, 17000 - 16384);
    }

    #[test]
    fn partition_splits_entries_in_insertion_order() {
        let layout = compute_atlas_layout(17000);
        let entries: Vec<RegistryEntry> = (0..17000u32)
            .map(|i| RegistryEntry {
                baked_id: i + 1,
                tileset_index: 0,
                tile_id: 0,
                flip_h: false,
                flip_v: false,
                flip_d: false,
                source_width: TILE_SIZE,
                source_height: TILE_SIZE,
            })
            .collect();
        let parts = partition_entries(&entries, &layout);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 16384);
        assert_eq!(parts[1].len(), 616);
    }

    fn single_entry() -> RegistryEntry {
        RegistryEntry {
            baked_id: 1,
            tileset_index: 0,
            tile_id: 0,
            flip_h: false,
            flip_v: false,
            flip_d: false,
            source_width: TILE_SIZE,
            source_height: TILE_SIZE,
        }
    }

    #[test]
    fn oversized_source_tile_is_cropped_from_its_top_left_corner() {
        let mut img = RgbaImage::new(32, 32);
        for y in 0..32 {
            for x in 0..32 {
                img.put_pixel(x, y, Rgba([x as u8, y as u8, 0, 255]));
            }
        }
        let sources = [SourceTileset { image: DynamicImage::from(img), columns: 1, tile_width: 32, tile_height: 32 }];
        let layout = compute_atlas_layout(1).files[0];
        let out = render_atlas_file(&[single_entry()], &layout, &sources);

        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                assert_eq!(out.get_pixel(x, y), &Rgba([x as u8, y as u8, 0, 255]));
            }
        }
    }

    #[test]
    fn undersized_source_tile_is_letterboxed_with_transparency() {
        let mut img = RgbaImage::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                img.put_pixel(x, y, Rgba([10, 20, 30, 255]));
            }
        }
        let sources = [SourceTileset { image: DynamicImage::from(img), columns: 1, tile_width: 8, tile_height: 8 }];
        let layout = compute_atlas_layout(1).files[0];
        let out = render_atlas_file(&[single_entry()], &layout, &sources);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(out.get_pixel(x, y), &Rgba([10, 20, 30, 255]));
            }
        }
        for y in 8..TILE_SIZE {
            for x in 8..TILE_SIZE {
                assert_eq!(out.get_pixel(x, y), &Rgba([0, 0, 0, 0]));
            }
        }
    }
}
