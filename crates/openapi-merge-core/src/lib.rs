//! Merge engine for OpenAPI documents.
//!
//! Combines several OpenAPI YAML documents into one: `paths` and four
//! `components` sections are deep-merged in input order, tags are
//! deduplicated by name, and `servers` is only ever set from an explicit
//! override.
//!
//! # Key Types
//!
//! - [`Document`] -- A parsed input file
//! - [`SpecMerger`] -- The accumulator that inputs are merged into
//! - [`MergeOptions`] -- Fixed metadata and the optional default server
//! - [`deep_merge`] -- The recursive mapping merge rule

pub mod document;
pub mod error;
pub mod merge;
pub mod merger;
pub mod options;

pub use document::{write_document, Document};
pub use error::{MergeError, MergeResult};
pub use merge::deep_merge;
pub use merger::{
    merge_documents, merge_files, ComponentKind, MergeStats, MergeSummary, SpecMerger,
};
pub use options::{MergeOptions, DEFAULT_SERVER_ENV};
