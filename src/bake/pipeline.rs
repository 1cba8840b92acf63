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

//! End-to-end orchestration of the bake pipeline: load project metadata,
//! resolve every map's painted colors into concrete cells, stamp prefabs,
//! deduplicate into the tile registry, pack atlases, and write the binary
//! layer files plus manifest.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bake::atlas::{compute_atlas_layout, partition_entries, render_atlas_file, SourceTileset, TILE_SIZE};
use crate::bake::manifest::{Manifest, ManifestAtlas, ManifestEntry};
use crate::bake::registry::TileRegistry;
use crate::bake::serialize::encode_layers;
use crate::bake::slug::sanitize_slug;
use crate::error::{BakeError, SchemaError};
use crate::log::Log;
use crate::map::{AutotileMap, Cell};
use crate::painter::derive_desired_wang_id;
use crate::prefab::{Prefab, SavedMap, NUM_PREFAB_LAYERS};
use crate::resolver::find_best_match;
use crate::schema::{load_project_metadata, validate_map_references};

/// Filesystem locations the bake pipeline reads from and writes to.
pub struct BakeInputs<'a> {
    pub project_path: &'a Path,
    pub tilesets_dir: &'a Path,
    pub maps_dir: &'a Path,
    pub prefabs_dir: &'a Path,
    pub output_dir: &'a Path,
}

fn read_to_string(path: &Path) -> Result<String, BakeError> {
    fs::read_to_string(path).map_err(|e| BakeError::Io { path: path.to_path_buf(), source: e })
}

fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, BakeError> {
    let mut out = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| BakeError::Io { path: dir.to_path_buf(), source: e })?;
    for entry in entries {
        let entry = entry.map_err(|e| BakeError::Io { path: dir.to_path_buf(), source: e })?;
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "json") {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn write_output(output_dir: &Path, rel_path: &str, bytes: &[u8]) -> Result<(), BakeError> {
    let full_path = output_dir.join(rel_path);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).map_err(|e| BakeError::Io { path: parent.to_path_buf(), source: e })?;
    }
    fs::write(&full_path, bytes).map_err(|e| BakeError::Io { path: full_path, source: e })
}

/// Resolve every non-empty color cell of one saved map layer into a baked
/// tile id, registering new (sprite, orientation) pairs as they're found.
fn bake_map_layer(layer_colors: &[u32], width: i32, height: i32, wang_set: &crate::wang_set::WangSet, registry: &mut TileRegistry) -> Vec<u32> {
    let mut autotile_map = AutotileMap::new(width, height);
    for (idx, &color) in layer_colors.iter().enumerate() {
        if color == 0 {
            continue;
        }
        let x = (idx as i32) % width;
        let y = (idx as i32) / width;
        autotile_map.set_color(x, y, color);
    }

    let mut baked = vec![0u32; layer_colors.len()];
    for (x, y) in autotile_map.positions() {
        if autotile_map.color_at(x, y) == 0 {
            continue;
        }
        let desired = derive_desired_wang_id(&autotile_map, wang_set.set_type(), x, y);
        let cell = find_best_match(wang_set, &desired, wang_set.set_type(), 0, x, y).unwrap_or(Cell::EMPTY);
        baked[(y * width + x) as usize] = registry.register(&cell);
    }
    baked
}

fn stamp_prefabs_onto_map(
    map: &SavedMap,
    prefabs: &HashMap<String, Prefab>,
    baked_layers: &mut [Vec<u32>],
    registry: &mut TileRegistry,
) {
    for placed in &map.placed_prefabs {
        let Some(prefab) = prefabs.get(&placed.prefab_name) else {
            Log::warn(format!(
                "map '{}' references unknown prefab '{}', skipping placement",
                map.name, placed.prefab_name
            ));
            continue;
        };
        for (i, layer) in prefab.layers.iter().enumerate() {
            let target_layer = placed.layer + i;
            if target_layer >= baked_layers.len() {
                continue;
            }
            for tile in layer {
                let tx = placed.x + (tile.x - prefab.anchor_x);
                let ty = placed.y + (tile.y - prefab.anchor_y);
                if tx < 0 || ty < 0 || tx >= map.width || ty >= map.height {
                    continue;
                }
                let cell = Cell {
                    tile_id: tile.tile_id as i32,
                    tileset_index: tile.tileset_index,
                    flip_h: false,
                    flip_v: false,
                    flip_d: false,
                };
                let idx = (ty * map.width + tx) as usize;
                baked_layers[target_layer][idx] = registry.register(&cell);
            }
        }
    }
}

/// Bake a standalone prefab's own layers into a binary blob sized to its
/// tiles' bounding box, with `0` (empty) everywhere a layer has no tile.
fn bake_prefab(prefab: &Prefab, registry: &mut TileRegistry) -> (Vec<Vec<u32>>, i32, i32) {
    let width = prefab.layers.iter().flatten().map(|t| t.x + 1).max().unwrap_or(1).max(1);
    let height = prefab.layers.iter().flatten().map(|t| t.y + 1).max().unwrap_or(1).max(1);
    let mut baked_layers = vec![vec![0u32; (width * height) as usize]; NUM_PREFAB_LAYERS];
    for (i, layer) in prefab.layers.iter().enumerate() {
        for tile in layer {
            if tile.x < 0 || tile.y < 0 || tile.x >= width || tile.y >= height {
                continue;
            }
            let cell = Cell {
                tile_id: tile.tile_id as i32,
                tileset_index: tile.tileset_index,
                flip_h: false,
                flip_v: false,
                flip_d: false,
            };
            let idx = (tile.y * width + tile.x) as usize;
            baked_layers[i][idx] = registry.register(&cell);
        }
    }
    (baked_layers, width, height)
}

/// Run the full bake: load, resolve, stamp, dedup, pack, and write. Returns
/// `Ok(())` on success; any fatal error short-circuits with a [`BakeError`].
pub fn run_bake(inputs: &BakeInputs) -> Result<(), BakeError> {
    let project_text = read_to_string(inputs.project_path)?;
    let project = load_project_metadata(&project_text)?;

    let prefab_paths = list_json_files(inputs.prefabs_dir)?;
    let mut prefabs: HashMap<String, Prefab> = HashMap::new();
    for path in &prefab_paths {
        let text = read_to_string(path)?;
        let prefab: Prefab = serde_json::from_str(&text).map_err(SchemaError::from)?;
        prefab.validate()?;
        prefabs.insert(prefab.name.clone(), prefab);
    }

    let mut registry = TileRegistry::new();
    let mut manifest = Manifest::new();

    let map_paths = list_json_files(inputs.maps_dir)?;
    for path in &map_paths {
        let text = read_to_string(path)?;
        let map: SavedMap = serde_json::from_str(&text).map_err(SchemaError::from)?;
        map.validate()?;
        validate_map_references(&map, &project)?;
        let wang_set = project.wang_set(&map.wang_set_name).expect("validated by validate_map_references");

        let mut baked_layers: Vec<Vec<u32>> = Vec::with_capacity(map.layers.len());
        for layer_colors in &map.layers {
            baked_layers.push(bake_map_layer(layer_colors, map.width, map.height, wang_set, &mut registry));
        }
        stamp_prefabs_onto_map(&map, &prefabs, &mut baked_layers, &mut registry);

        let bytes = encode_layers(&baked_layers, map.width, map.height);
        let slug = sanitize_slug(&map.name);
        let rel_path = format!("data/maps/{slug}.bin");
        write_output(inputs.output_dir, &rel_path, &bytes)?;
        manifest.maps.push(ManifestEntry {
            name: map.name.clone(),
            slug,
            width: map.width,
            height: map.height,
            anchor: None,
            layer_count: baked_layers.len(),
            data_file: rel_path,
        });
    }

    let mut sorted_prefabs: Vec<&Prefab> = prefabs.values().collect();
    sorted_prefabs.sort_by(|a, b| a.name.cmp(&b.name));
    for prefab in sorted_prefabs {
        let (baked_layers, width, height) = bake_prefab(prefab, &mut registry);
        let bytes = encode_layers(&baked_layers, width, height);
        let slug = sanitize_slug(&prefab.name);
        let rel_path = format!("data/prefabs/{slug}.bin");
        write_output(inputs.output_dir, &rel_path, &bytes)?;
        manifest.prefabs.push(ManifestEntry {
            name: prefab.name.clone(),
            slug,
            width,
            height,
            anchor: Some((prefab.anchor_x, prefab.anchor_y)),
            layer_count: NUM_PREFAB_LAYERS,
            data_file: rel_path,
        });
    }

    let layout = compute_atlas_layout(registry.len());
    let entries = registry.entries();
    let parts = partition_entries(entries, &layout);

    let mut sources: Vec<SourceTileset> = Vec::with_capacity(project.tilesets.len());
    for tileset in &project.tilesets {
        if tileset.tile_width != TILE_SIZE || tileset.tile_height != TILE_SIZE {
            Log::warn(format!(
                "tileset '{}' declares {}x{} tiles, not the atlas's fixed {TILE_SIZE}x{TILE_SIZE}; \
                 tiles will be cropped or letterboxed from their top-left corner",
                tileset.tileset_image, tileset.tile_width, tileset.tile_height
            ));
        }
        let path = inputs.tilesets_dir.join(&tileset.tileset_image);
        let image = image::open(&path).map_err(|e| BakeError::Io {
            path: path.clone(),
            source: std::io::Error::other(e.to_string()),
        })?;
        sources.push(SourceTileset {
            image,
            columns: tileset.columns.max(1),
            tile_width: tileset.tile_width,
            tile_height: tileset.tile_height,
        });
    }

    for (i, (file_layout, file_entries)) in layout.files.iter().zip(parts.iter()).enumerate() {
        let image = render_atlas_file(file_entries, file_layout, &sources);
        let file_name = format!("tileset-{i}.png");
        let out_path = inputs.output_dir.join(&file_name);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BakeError::Io { path: parent.to_path_buf(), source: e })?;
        }
        image.save(&out_path).map_err(|e| BakeError::Encode(e.to_string()))?;
        manifest.atlases.push(ManifestAtlas {
            file: file_name,
            columns: file_layout.columns,
            tiles_per_file: file_layout.tiles_per_file,
            tile_count: file_layout.tile_count,
        });
    }

    let manifest_path = inputs.output_dir.join("manifest.json");
    fs::write(&manifest_path, manifest.to_text()).map_err(|e| BakeError::Io { path: manifest_path, source: e })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::distance::floyd_warshall;
    use crate::wang_set::{WangSet, WangSetType};

    fn grass_dirt_corner_set() -> WangSet {
        let mut set = WangSet::new("GrassDirt", WangSetType::Corner);
        set.add_color(Color::new(1, "Grass", "#4caf50"));
        set.add_color(Color::new(2, "Dirt", "#8a5a2b"));
        for combo in 0u32..16 {
            let slot = |bit: u32| if combo & (1 << bit) != 0 { 2 } else { 1 };
            let wang_id = crate::wang_id::WangId::new([0, slot(0), 0, slot(1), 0, slot(2), 0, slot(3)]);
            set.add_tile_mapping(0, combo, wang_id);
        }
        let dm = floyd_warshall(2, |a, b| a != b);
        set.set_distance_matrix(dm.distance);
        set.set_next_hop_matrix(dm.next_hop);
        set.set_variants(crate::variant::generate_variants(
            set.tile_mappings().map(|(k, w)| (k, *w)).collect::<Vec<_>>(),
            crate::variant::TransformationConfig::NONE,
        ));
        set
    }

    #[test]
    fn bake_round_trip_recovers_the_resolved_cell_at_every_painted_position() {
        let wang_set = grass_dirt_corner_set();
        let mut registry = TileRegistry::new();
        let width = 10;
        let height = 10;
        let mut colors = vec![1u32; (width * height) as usize];
        colors[33] = 2;
        colors[57] = 2;

        let baked = bake_map_layer(&colors, width, height, &wang_set, &mut registry);
        let bytes = encode_layers(&[baked.clone()], width, height);
        assert_eq!(bytes.len(), width as usize * height as usize * 2);

        let decoded = crate::bake::serialize::decode_layers(&bytes, width, height, 1);
        assert_eq!(decoded[0], baked);

        for &baked_id in &baked {
            assert!(registry.entry(baked_id).is_some(), "every painted cell must resolve to a registered tile");
        }
        assert!(registry.len() <= 10);
    }
}
