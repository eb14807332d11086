//! Loading and writing YAML documents.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::error::{MergeError, MergeResult};

/// A parsed input document together with the file it came from.
///
/// The merger takes documents by value and moves their sections into the
/// accumulator, so a document is consumed by being merged.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    source: PathBuf,
    root: Mapping,
}

impl Document {
    /// Read and parse a YAML file.
    pub fn load(path: impl AsRef<Path>) -> MergeResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MergeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::parse(path, &text)?;
        debug!(path = %path.display(), keys = doc.root.len(), "loaded document");
        Ok(doc)
    }

    /// Parse YAML text. `source` is only used to label errors.
    ///
    /// Merge keys (`<<: *anchor`) are expanded before the document is
    /// returned, so inherited keys behave like ones written in place.
    pub fn parse(source: impl Into<PathBuf>, text: &str) -> MergeResult<Self> {
        let source = source.into();
        let mut value: Value = serde_yaml::from_str(text).map_err(|e| MergeError::Parse {
            path: source.clone(),
            source: e,
        })?;
        value.apply_merge().map_err(|e| MergeError::Parse {
            path: source.clone(),
            source: e,
        })?;
        match value {
            Value::Mapping(root) => Ok(Self { source, root }),
            other => Err(MergeError::NotAMapping {
                path: source,
                found: kind_of(&other),
            }),
        }
    }

    /// Wrap an already-built mapping.
    pub fn from_mapping(source: impl Into<PathBuf>, root: Mapping) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Detach a mapping-valued section. Absent and falsy sections (`null`,
    /// `''`, `[]`, `0`, `false`) are empty.
    pub(crate) fn take_mapping(&mut self, key: &str) -> MergeResult<Mapping> {
        take_mapping_from(&self.source, &mut self.root, key, key)
    }

    /// Detach a sequence-valued section. Absent and falsy sections are empty.
    pub(crate) fn take_sequence(&mut self, key: &str) -> MergeResult<Vec<Value>> {
        match self.root.remove(key) {
            Some(Value::Sequence(items)) => Ok(items),
            None => Ok(Vec::new()),
            Some(other) if !is_truthy(&other) => Ok(Vec::new()),
            Some(other) => Err(MergeError::InvalidSection {
                path: self.source.clone(),
                section: key.to_string(),
                expected: "a sequence",
                found: kind_of(&other),
            }),
        }
    }
}

/// Detach `key` from `map`, requiring a mapping. `label` names the section
/// in errors (e.g. `components.schemas`).
pub(crate) fn take_mapping_from(
    source: &Path,
    map: &mut Mapping,
    key: &str,
    label: &str,
) -> MergeResult<Mapping> {
    match map.remove(key) {
        Some(Value::Mapping(section)) => Ok(section),
        None => Ok(Mapping::new()),
        Some(other) if !is_truthy(&other) => Ok(Mapping::new()),
        Some(other) => Err(MergeError::InvalidSection {
            path: source.to_path_buf(),
            section: label.to_string(),
            expected: "a mapping",
            found: kind_of(&other),
        }),
    }
}

/// Serialize `doc` as YAML and write it to `path`.
///
/// Keys are written in insertion order. The file is only opened once
/// serialization has succeeded.
pub fn write_document(path: impl AsRef<Path>, doc: &Mapping) -> MergeResult<()> {
    let path = path.as_ref();
    let text = serde_yaml::to_string(doc)?;
    fs::write(path, text).map_err(|source| MergeError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote merged document");
    Ok(())
}

/// Whether `value` counts as present: `null`, `false`, zero, and empty
/// strings, sequences or mappings do not.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
