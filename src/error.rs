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

//! The error taxonomy: schema, referential, and I/O errors. Resolution gaps
//! are not represented here — they are not fatal and are reported through
//! [`crate::log::Log`] instead, recorded as an empty cell and logged once
//! per painted cell-group.

use std::fmt;
use std::path::PathBuf;

/// A project metadata/map/prefab file that failed structural validation.
/// Fatal at load.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The file's `version` field did not match the version this crate reads.
    UnsupportedVersion { expected: u32, found: u32 },
    /// A required field was absent.
    MissingField(&'static str),
    /// A `wangid` array did not have exactly 8 entries.
    WrongWangIdLength(usize),
    /// A color id fell outside the valid positive range.
    ColorIdOutOfRange(i64),
    /// A `type` field held something other than `corner`/`edge`/`mixed`.
    UnknownWangSetType(String),
    /// A map's layer count did not equal `NUM_MAP_LAYERS`.
    WrongMapLayerCount { expected: usize, found: usize },
    /// A prefab's layer count did not equal `NUM_PREFAB_LAYERS`.
    WrongPrefabLayerCount { expected: usize, found: usize },
    /// The input was not well-formed JSON, or a field had the wrong shape.
    Malformed(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::UnsupportedVersion { expected, found } => {
                write!(f, "unsupported schema version: expected {expected}, found {found}")
            }
            SchemaError::MissingField(name) => write!(f, "missing required field: {name}"),
            SchemaError::WrongWangIdLength(len) => {
                write!(f, "wangid must have exactly 8 entries, found {len}")
            }
            SchemaError::ColorIdOutOfRange(id) => write!(f, "color id out of range: {id}"),
            SchemaError::UnknownWangSetType(found) => {
                write!(f, "unknown wang-set type: {found}")
            }
            SchemaError::WrongMapLayerCount { expected, found } => {
                write!(f, "map must have {expected} layers, found {found}")
            }
            SchemaError::WrongPrefabLayerCount { expected, found } => {
                write!(f, "prefab must have {expected} layers, found {found}")
            }
            SchemaError::Malformed(reason) => write!(f, "malformed input: {reason}"),
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Malformed(e.to_string())
    }
}

/// A reference to something that does not exist. Whether this is fatal
/// depends on what referenced what: an unknown WangSet is fatal for that
/// map, an unknown prefab is a recoverable warning.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferentialError {
    /// A map named a WangSet that isn't in the loaded project metadata.
    UnknownWangSet(String),
    /// A `PlacedPrefab` named a prefab that isn't in the loaded prefab set.
    UnknownPrefab(String),
}

impl fmt::Display for ReferentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferentialError::UnknownWangSet(name) => write!(f, "unknown wang-set: {name}"),
            ReferentialError::UnknownPrefab(name) => write!(f, "unknown prefab: {name}"),
        }
    }
}

impl std::error::Error for ReferentialError {}

/// Fatal failure of the bake pipeline: I/O, schema, or unrecoverable
/// referential failure (unknown WangSet). Unknown-prefab referential errors
/// are warnings, not `BakeError`s — see [`ReferentialError`].
#[derive(Debug)]
pub enum BakeError {
    /// Reading or writing a file failed.
    Io { path: PathBuf, source: std::io::Error },
    /// A metadata/map/prefab file failed structural validation.
    Schema(SchemaError),
    /// A map referenced a WangSet that does not exist.
    Referential(ReferentialError),
    /// Encoding an atlas PNG failed.
    Encode(String),
}

impl fmt::Display for BakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BakeError::Io { path, source } => write!(f, "I/O error at {}: {source}", path.display()),
            BakeError::Schema(e) => write!(f, "schema error: {e}"),
            BakeError::Referential(e) => write!(f, "referential error: {e}"),
            BakeError::Encode(msg) => write!(f, "atlas encode error: {msg}"),
        }
    }
}

impl std::error::Error for BakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BakeError::Io { source, .. } => Some(source),
            BakeError::Schema(e) => Some(e),
            BakeError::Referential(e) => Some(e),
            BakeError::Encode(_) => None,
        }
    }
}

impl From<SchemaError> for BakeError {
    fn from(e: SchemaError) -> Self {
        BakeError::Schema(e)
    }
}

impl From<ReferentialError> for BakeError {
    fn from(e: ReferentialError) -> Self {
        BakeError::Referential(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_messages_are_human_readable() {
        let e = SchemaError::WrongWangIdLength(5);
        assert_eq!(e.to_string(), "wangid must have exactly 8 entries, found 5");
    }

    #[test]
    fn bake_error_wraps_schema_error() {
        let e: BakeError = SchemaError::MissingField("name").into();
        assert!(e.to_string().contains("missing required field"));
    }
}
