//! The accumulator that input documents are merged into.
//!
//! A [`SpecMerger`] starts from a fixed skeleton (`openapi`, `info`, empty
//! `paths`, four empty `components` sections, empty `tags`) and only ever
//! populates it. Documents are merged strictly in the order they are given,
//! so later inputs win every conflict.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::document::{is_truthy, kind_of, take_mapping_from, write_document, Document};
use crate::error::{MergeError, MergeResult};
use crate::merge::deep_merge;
use crate::options::MergeOptions;

/// The `components` sections carried into the merged document.
///
/// Any other component kind in an input (`examples`, `headers`, ...) is
/// dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schemas,
    SecuritySchemes,
    Parameters,
    Responses,
}

impl ComponentKind {
    /// All kinds, in output order.
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Schemas,
        ComponentKind::SecuritySchemes,
        ComponentKind::Parameters,
        ComponentKind::Responses,
    ];

    /// The key used under `components`.
    pub fn key(self) -> &'static str {
        match self {
            ComponentKind::Schemas => "schemas",
            ComponentKind::SecuritySchemes => "securitySchemes",
            ComponentKind::Parameters => "parameters",
            ComponentKind::Responses => "responses",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Debug, Default)]
struct Components {
    schemas: Mapping,
    security_schemes: Mapping,
    parameters: Mapping,
    responses: Mapping,
}

impl Components {
    fn section_mut(&mut self, kind: ComponentKind) -> &mut Mapping {
        match kind {
            ComponentKind::Schemas => &mut self.schemas,
            ComponentKind::SecuritySchemes => &mut self.security_schemes,
            ComponentKind::Parameters => &mut self.parameters,
            ComponentKind::Responses => &mut self.responses,
        }
    }

    fn into_mapping(self) -> Mapping {
        let mut out = Mapping::new();
        out.insert(ComponentKind::Schemas.key().into(), Value::Mapping(self.schemas));
        out.insert(
            ComponentKind::SecuritySchemes.key().into(),
            Value::Mapping(self.security_schemes),
        );
        out.insert(ComponentKind::Parameters.key().into(), Value::Mapping(self.parameters));
        out.insert(ComponentKind::Responses.key().into(), Value::Mapping(self.responses));
        out
    }
}

/// Counters collected over one merge run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of documents merged.
    pub documents: usize,
    /// Tags appended to the output.
    pub tags_kept: usize,
    /// Tags skipped because their name was already seen, or was missing.
    pub tags_dropped: usize,
}

/// Accumulates input documents into one merged OpenAPI document.
#[derive(Clone, Debug)]
pub struct SpecMerger {
    options: MergeOptions,
    paths: Mapping,
    components: Components,
    tags: Vec<Value>,
    seen_tags: HashSet<Value>,
    stats: MergeStats,
}

impl Default for SpecMerger {
    fn default() -> Self {
        Self::new(MergeOptions::default())
    }
}

impl SpecMerger {
    /// Create an empty accumulator.
    pub fn new(options: MergeOptions) -> Self {
        Self {
            options,
            paths: Mapping::new(),
            components: Components::default(),
            tags: Vec::new(),
            seen_tags: HashSet::new(),
            stats: MergeStats::default(),
        }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    /// Merge one document into the accumulator.
    ///
    /// `paths` and each [`ComponentKind`] section are deep-merged, tags are
    /// appended by first-seen name, and `servers` is ignored. All sections
    /// are shape-checked before anything is merged, so a rejected document
    /// leaves the accumulator unchanged.
    pub fn merge(&mut self, mut doc: Document) -> MergeResult<()> {
        let source = doc.source().to_path_buf();

        let paths = doc.take_mapping("paths")?;
        let mut components = doc.take_mapping("components")?;
        let mut sections = Vec::with_capacity(ComponentKind::ALL.len());
        for kind in ComponentKind::ALL {
            let label = format!("components.{kind}");
            let section = take_mapping_from(&source, &mut components, kind.key(), &label)?;
            sections.push((kind, section));
        }
        let tags = doc.take_sequence("tags")?;
        if let Some((index, bad)) = tags.iter().enumerate().find(|(_, t)| !t.is_mapping()) {
            return Err(MergeError::InvalidSection {
                path: source,
                section: format!("tags[{index}]"),
                expected: "a mapping",
                found: kind_of(bad),
            });
        }

        debug!(source = %source.display(), paths = paths.len(), "merging document");
        deep_merge(&mut self.paths, paths);
        for (kind, section) in sections {
            deep_merge(self.components.section_mut(kind), section);
        }
        for tag in tags {
            self.push_tag(tag);
        }

        self.stats.documents += 1;
        Ok(())
    }

    /// Any present `name` counts, not only strings, so `name: 2024` is kept.
    fn push_tag(&mut self, tag: Value) {
        match tag.get("name").filter(|name| is_truthy(name)).cloned() {
            Some(name) if !self.seen_tags.contains(&name) => {
                self.seen_tags.insert(name);
                self.tags.push(tag);
                self.stats.tags_kept += 1;
            }
            name => {
                debug!(tag = ?name, "skipping tag");
                self.stats.tags_dropped += 1;
            }
        }
    }

    /// Consume the accumulator and produce the merged document.
    pub fn finish(self) -> Mapping {
        let mut info = Mapping::new();
        info.insert("title".into(), self.options.title.as_str().into());
        info.insert("version".into(), self.options.version.as_str().into());

        let mut out = Mapping::new();
        out.insert("openapi".into(), self.options.openapi_version.as_str().into());
        out.insert("info".into(), Value::Mapping(info));
        out.insert("paths".into(), Value::Mapping(self.paths));
        out.insert("components".into(), Value::Mapping(self.components.into_mapping()));
        out.insert("tags".into(), Value::Sequence(self.tags));

        if let Some(url) = self.options.server_url() {
            let mut server = Mapping::new();
            server.insert("url".into(), url.into());
            server.insert("description".into(), "Default".into());
            out.insert("servers".into(), Value::Sequence(vec![Value::Mapping(server)]));
        }
        out
    }
}

/// Load every file in `paths` in order and merge them.
///
/// Stops at the first file that cannot be read, parsed, or merged.
pub fn merge_documents<P: AsRef<Path>>(paths: &[P], options: MergeOptions) -> MergeResult<Mapping> {
    let mut merger = SpecMerger::new(options);
    for path in paths {
        merger.merge(Document::load(path)?)?;
    }
    let stats = merger.stats();
    debug!(
        documents = stats.documents,
        tags_kept = stats.tags_kept,
        tags_dropped = stats.tags_dropped,
        "merge complete"
    );
    Ok(merger.finish())
}

/// Outcome of [`merge_files`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeSummary {
    pub output: PathBuf,
    pub inputs: usize,
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {} from {} inputs", self.output.display(), self.inputs)
    }
}

/// Merge `inputs` and write the result to `output`.
///
/// Nothing is written unless every input merged cleanly.
pub fn merge_files<P: AsRef<Path>>(
    output: impl AsRef<Path>,
    inputs: &[P],
    options: MergeOptions,
) -> MergeResult<MergeSummary> {
    let output = output.as_ref();
    let merged = merge_documents(inputs, options)?;
    write_document(output, &merged)?;
    Ok(MergeSummary {
        output: output.to_path_buf(),
        inputs: inputs.len(),
    })
}
