//! Error types for the merge crate.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading, merging, or writing documents.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The input file is missing or unreadable.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file is not valid YAML.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document root is something other than a mapping.
    #[error("{path}: document root must be a mapping, got {found}")]
    NotAMapping { path: PathBuf, found: &'static str },

    /// A section the merger reads has the wrong shape.
    #[error("{path}: `{section}` must be {expected}, got {found}")]
    InvalidSection {
        path: PathBuf,
        section: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The merged document could not be serialized.
    #[error("failed to serialize merged document: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The output file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
