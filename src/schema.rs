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

//! Parsing and structural validation of the project metadata file: tileset
//! descriptors, the global transformation config, and every [`WangSet`]
//! with its colors and base tile mappings.

use crate::color::{Color, TileRef};
use crate::error::{ReferentialError, SchemaError};
use crate::prefab::SavedMap;
use crate::variant::{generate_variants, TransformationConfig};
use crate::wang_id::WangId;
use crate::wang_set::{TilesetDef, WangSet, WangSetType};
use fxhash::FxHashMap;
use serde::Deserialize;

/// The only project-metadata schema version this crate reads.
pub const SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectMetadataRaw {
    version: u32,
    tilesets: Vec<TilesetDef>,
    #[serde(default)]
    transformations: Option<TransformationConfig>,
    wangsets: Vec<WangSetRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WangSetRaw {
    name: String,
    #[serde(rename = "type")]
    set_type: String,
    colors: Vec<ColorRaw>,
    wangtiles: Vec<WangTileRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColorRaw {
    name: String,
    color: String,
    #[serde(default)]
    probability: Option<f32>,
    #[serde(default)]
    tile: Option<u32>,
    #[serde(default)]
    tileset: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WangTileRaw {
    tileid: u32,
    wangid: Vec<i64>,
    #[serde(default)]
    #[allow(dead_code)]
    probability: Option<f32>,
    #[serde(default)]
    tileset: Option<usize>,
    #[serde(default)]
    #[allow(dead_code)]
    animation: Option<serde_json::Value>,
}

fn parse_wang_set_type(raw: &str) -> Result<WangSetType, SchemaError> {
    match raw {
        "corner" => Ok(WangSetType::Corner),
        "edge" => Ok(WangSetType::Edge),
        "mixed" => Ok(WangSetType::Mixed),
        other => Err(SchemaError::UnknownWangSetType(other.to_string())),
    }
}

/// Loaded project metadata: tileset descriptors plus every fully-built,
/// variant-expanded [`WangSet`], keyed by name.
#[derive(Debug)]
pub struct ProjectMetadata {
    pub tilesets: Vec<TilesetDef>,
    pub transformations: TransformationConfig,
    pub wang_sets: FxHashMap<String, WangSet>,
}

impl ProjectMetadata {
    pub fn wang_set(&self, name: &str) -> Option<&WangSet> {
        self.wang_sets.get(name)
    }
}

/// Parse and validate a project metadata JSON document, building every
/// WangSet's variant list and distance matrices in the process.
pub fn load_project_metadata(text: &str) -> Result<ProjectMetadata, SchemaError> {
    let raw: ProjectMetadataRaw = serde_json::from_str(text)?;
    if raw.version != SCHEMA_VERSION {
        return Err(SchemaError::UnsupportedVersion { expected: SCHEMA_VERSION, found: raw.version });
    }

    let transformations = raw.transformations.unwrap_or(TransformationConfig::ALL);
    let mut wang_sets = FxHashMap::default();

    for raw_set in raw.wangsets {
        let set_type = parse_wang_set_type(&raw_set.set_type)?;
        let mut set = WangSet::new(raw_set.name.clone(), set_type);
        set.set_transformation_config(transformations);

        let color_count = raw_set.colors.len();
        for (i, c) in raw_set.colors.iter().enumerate() {
            let id = (i + 1) as u32;
            let mut color = Color::new(id, c.name.clone(), c.color.clone());
            if let Some(p) = c.probability {
                color.probability = p;
            }
            if let Some(tile_id) = c.tile {
                color.tile = Some(TileRef { tileset_index: c.tileset.unwrap_or(0), tile_id });
            }
            set.add_color(color);
        }

        let mut mappings = Vec::with_capacity(raw_set.wangtiles.len());
        for wt in &raw_set.wangtiles {
            if wt.wangid.len() != 8 {
                return Err(SchemaError::WrongWangIdLength(wt.wangid.len()));
            }
            let mut slots = [0u32; 8];
            for (slot, &value) in wt.wangid.iter().enumerate() {
                if value < 0 || value > color_count as i64 {
                    return Err(SchemaError::ColorIdOutOfRange(value));
                }
                slots[slot] = value as u32;
            }
            let wang_id = WangId::new(slots);
            let tileset_index = wt.tileset.unwrap_or(0);
            set.add_tile_mapping(tileset_index, wt.tileid, wang_id);
            mappings.push(((tileset_index, wt.tileid), wang_id));
        }

        let variants = generate_variants(mappings, transformations);
        set.set_variants(variants);

        let colors: Vec<u32> = set.colors().map(|c| c.id).collect();
        let max_id = colors.iter().copied().max().unwrap_or(0) as usize;
        let mut adjacency = vec![vec![false; max_id + 1]; max_id + 1];
        for wang_id in set.all_variants().iter().map(|v| v.wang_id) {
            for a in set_type.active_slots() {
                let ca = wang_id.slot(a);
                if ca == 0 {
                    continue;
                }
                for b in set_type.active_slots() {
                    let cb = wang_id.slot(b);
                    if cb == 0 || ca == cb {
                        continue;
                    }
                    adjacency[ca as usize][cb as usize] = true;
                }
            }
        }
        let dm = crate::distance::floyd_warshall(max_id, |a, b| {
            (a as usize) <= max_id && (b as usize) <= max_id && adjacency[a as usize][b as usize]
        });
        set.set_distance_matrix(dm.distance);
        set.set_next_hop_matrix(dm.next_hop);

        wang_sets.insert(raw_set.name, set);
    }

    Ok(ProjectMetadata { tilesets: raw.tilesets, transformations, wang_sets })
}

/// Validate a loaded map's referential integrity against `project`. An
/// unknown WangSet is fatal; the caller should treat `Err` as "skip this
/// map, it cannot be resolved".
pub fn validate_map_references(map: &SavedMap, project: &ProjectMetadata) -> Result<(), ReferentialError> {
    if !project.wang_sets.contains_key(&map.wang_set_name) {
        return Err(ReferentialError::UnknownWangSet(map.wang_set_name.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project_json() -> &'static str {
        r##"{
            "version": 2,
            "tilesets": [{"tilesetImage":"grass.png","tileWidth":16,"tileHeight":16,"columns":4,"tileCount":16}],
            "wangsets": [{
                "name": "GrassDirt",
                "type": "corner",
                "colors": [
                    {"name":"Grass","color":"#4caf50"},
                    {"name":"Dirt","color":"#8a5a2b"}
                ],
                "wangtiles": [
                    {"tileid": 0, "wangid": [0,0,0,0,0,0,0,0]},
                    {"tileid": 1, "wangid": [0,0,0,2,0,0,0,0]}
                ]
            }]
        }"##
    }

    #[test]
    fn loads_a_valid_project() {
        let project = load_project_metadata(sample_project_json()).unwrap();
        assert_eq!(project.tilesets.len(), 1);
        let set = project.wang_set("GrassDirt").unwrap();
        assert_eq!(set.set_type(), WangSetType::Corner);
        assert_eq!(set.colors().count(), 2);
        assert!(set.all_variants().len() >= 2);
    }

    #[test]
    fn rejects_wrong_version() {
        let json = sample_project_json().replace("\"version\": 2", "\"version\": 1");
        let err = load_project_metadata(&json).unwrap_err();
        assert_eq!(err, SchemaError::UnsupportedVersion { expected: 2, found: 1 });
    }

    #[test]
    fn rejects_unknown_wangset_type() {
        let json = sample_project_json().replace("\"corner\"", "\"triangle\"");
        let err = load_project_metadata(&json).unwrap_err();
        assert_eq!(err, SchemaError::UnknownWangSetType("triangle".to_string()));
    }

    #[test]
    fn rejects_short_wangid() {
        let json = sample_project_json().replace("[0,0,0,0,0,0,0,0]", "[0,0,0]");
        let err = load_project_metadata(&json).unwrap_err();
        assert_eq!(err, SchemaError::WrongWangIdLength(3));
    }

    #[test]
    fn rejects_out_of_range_color_id() {
        let json = sample_project_json().replace("[0,0,0,2,0,0,0,0]", "[0,0,0,9,0,0,0,0]");
        let err = load_project_metadata(&json).unwrap_err();
        assert_eq!(err, SchemaError::ColorIdOutOfRange(9));
    }

    #[test]
    fn unknown_wangset_reference_is_a_referential_error() {
        let project = load_project_metadata(sample_project_json()).unwrap();
        let map = SavedMap {
            name: "Level1".into(),
            wang_set_name: "NoSuchSet".into(),
            width: 1,
            height: 1,
            layers: vec![vec![0]; crate::prefab::NUM_MAP_LAYERS],
            placed_prefabs: Vec::new(),
        };
        let err = validate_map_references(&map, &project).unwrap_err();
        assert_eq!(err, ReferentialError::UnknownWangSet("NoSuchSet".to_string()));
    }
}
