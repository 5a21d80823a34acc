//! Discover and parse collection documents.

use super::front_matter::{RawFrontMatter, split_front_matter};
use super::model::ContentKind;
use super::source::ContentSource;
use crate::diagnostics::{BuildReport, Diagnostic, DiagnosticKind};
use crate::error::IndexError;

/// File-name convention of one collection: `<prefix>.<name>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPattern {
    pub kind: ContentKind,
    pub prefix: String,
    pub extension: String,
}

impl CollectionPattern {
    pub fn new(kind: ContentKind, prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            kind,
            prefix: prefix.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    /// Pattern with the kind's default prefix and the `mdx` extension.
    pub fn default_for(kind: ContentKind) -> Self {
        Self::new(kind, kind.default_prefix(), "mdx")
    }

    /// Whether a file name (no directories) belongs to this collection.
    pub fn matches(&self, file_name: &str) -> bool {
        self.stem(file_name).is_some()
    }

    /// File name with the extension removed, if it matches.
    ///
    /// `notes.entropy.mdx` -> `notes.entropy`
    pub fn stem<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let stem = file_name.strip_suffix(&self.extension)?.strip_suffix('.')?;
        let rest = stem.strip_prefix(&self.prefix)?.strip_prefix('.')?;
        (!rest.is_empty()).then_some(stem)
    }
}

/// A document that was read and split, not yet validated.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub kind: ContentKind,
    /// Root-relative path, `/`-separated.
    pub rel: String,
    /// Identifier for diagnostics.
    pub id: String,
    pub front_matter: RawFrontMatter,
    pub body: String,
}

impl RawDocument {
    /// File name component of `rel`.
    pub fn file_name(&self) -> &str {
        file_name(&self.rel)
    }
}

pub(crate) fn file_name(rel: &str) -> &str {
    rel.rsplit('/').next().unwrap_or(rel)
}

/// Load every document matching one of `patterns`, in corpus order.
///
/// Read and parse failures are recorded in `report` and the file is skipped.
/// Only a corpus-wide failure is returned as an error.
pub fn load(
    source: &dyn ContentSource,
    patterns: &[CollectionPattern],
    report: &mut BuildReport,
) -> Result<Vec<RawDocument>, IndexError> {
    let mut documents = Vec::new();

    for rel in source.list()? {
        let name = file_name(&rel);
        let Some(pattern) = patterns.iter().find(|p| p.matches(name)) else {
            continue;
        };
        let kind = pattern.kind;
        report.stats_mut(kind).discovered += 1;

        let id = source.file_id(&rel);
        let text = match source.read(&rel) {
            Ok(text) => text,
            Err(e) => {
                report.push(Diagnostic::new(
                    DiagnosticKind::Read,
                    id,
                    format!("failed to read file: {e}"),
                ));
                report.stats_mut(kind).rejected += 1;
                continue;
            }
        };

        match split_front_matter(&text) {
            Ok((front_matter, body)) => documents.push(RawDocument {
                kind,
                body: body.to_string(),
                rel,
                id,
                front_matter,
            }),
            Err(e) => {
                report.push(Diagnostic::new(DiagnosticKind::Parse, id, e.to_string()));
                report.stats_mut(kind).rejected += 1;
            }
        }
    }

    Ok(documents)
}
