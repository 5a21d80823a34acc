//! Turn raw documents into content indexes.
//!
//! Per collection: validate each document, derive body text and reading
//! time, reject every entry whose slug collides with another, then sort
//! newest first and build the derived maps. Nothing here fails per file;
//! problems land in the [`BuildReport`].

use super::ContentIndex;
use super::date::{compare_newest_first, parse_date};
use super::handle::Snapshot;
use crate::content::{
    CollectionPattern, ContentEntry, ContentKind, ContentSource, RawDocument, SearchIndexEntry,
    load,
};
use crate::diagnostics::{BuildReport, Diagnostic, DiagnosticKind, DuplicateSlug};
use crate::error::IndexError;
use crate::meta::validate;
use crate::search::{SearchIndex, SearchPolicy};
use crate::text::{DEFAULT_WORDS_PER_MINUTE, normalize, reading_time};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Settings that shape the built index.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Web path the corpus root is served under.
    pub public_prefix: String,
    pub words_per_minute: u32,
    pub search: SearchPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            public_prefix: "/routes".to_string(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            search: SearchPolicy::default(),
        }
    }
}

/// A validated entry before ordering.
struct Candidate {
    id: String,
    entry: ContentEntry,
    content: String,
    date_key: Option<i64>,
}

/// Load the whole corpus and build every collection.
///
/// Collections without a pattern come out empty. Fails only when the source
/// itself cannot be listed.
pub fn build_snapshot(
    source: &dyn ContentSource,
    patterns: &[CollectionPattern],
    options: &BuildOptions,
    generation: u64,
) -> Result<Snapshot, IndexError> {
    let mut report = BuildReport::default();
    let documents = load(source, patterns, &mut report)?;

    let mut build = |kind: ContentKind| match patterns.iter().find(|p| p.kind == kind) {
        Some(pattern) => {
            let docs: Vec<&RawDocument> = documents.iter().filter(|d| d.kind == kind).collect();
            build_collection(&docs, pattern, options, &mut report)
        }
        None => ContentIndex::empty(kind),
    };
    let notes = build(ContentKind::Note);
    let portfolio = build(ContentKind::Portfolio);

    Ok(Snapshot {
        generation,
        notes,
        portfolio,
        report,
    })
}

/// Build one collection from its documents, given in corpus order.
pub fn build_collection(
    documents: &[&RawDocument],
    pattern: &CollectionPattern,
    options: &BuildOptions,
    report: &mut BuildReport,
) -> ContentIndex {
    let kind = pattern.kind;

    let mut candidates = Vec::with_capacity(documents.len());
    for doc in documents {
        match validate(doc, pattern, &options.public_prefix) {
            Ok(validated) => {
                report.extend(validated.warnings);
                candidates.push(prepare(doc, validated.entry, options, report));
            }
            Err(errors) => {
                report.extend(errors);
                report.stats_mut(kind).rejected += 1;
            }
        }
    }

    let mut candidates = reject_duplicates(kind, candidates, report);
    candidates.sort_by(|a, b| compare_newest_first(a.date_key, b.date_key));
    report.stats_mut(kind).accepted = candidates.len();

    let mut entries = Vec::with_capacity(candidates.len());
    let mut search_entries = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let entry = Arc::new(candidate.entry);
        search_entries.push(SearchIndexEntry {
            entry: Arc::clone(&entry),
            content: candidate.content,
        });
        entries.push(entry);
    }

    ContentIndex::new(kind, entries, SearchIndex::new(search_entries, options.search))
}

/// Derive body text, reading time and the sort key.
fn prepare(
    doc: &RawDocument,
    mut entry: ContentEntry,
    options: &BuildOptions,
    report: &mut BuildReport,
) -> Candidate {
    let content = normalize(&doc.body);
    if entry.kind == ContentKind::Note {
        entry.reading_time_minutes = Some(reading_time(&content, options.words_per_minute));
    }

    let date_key = entry.date.as_deref().and_then(|date| {
        let parsed = parse_date(date);
        if parsed.is_none() {
            report.push(
                Diagnostic::new(
                    DiagnosticKind::Date,
                    doc.id.as_str(),
                    format!("unrecognized date `{date}`; sorted with undated entries"),
                )
                .with_field("date"),
            );
        }
        parsed
    });

    Candidate {
        id: doc.id.clone(),
        entry,
        content,
        date_key,
    }
}

/// Drop every candidate whose slug is shared with another one.
fn reject_duplicates(
    kind: ContentKind,
    candidates: Vec<Candidate>,
    report: &mut BuildReport,
) -> Vec<Candidate> {
    let mut owners: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();
    for c in &candidates {
        let files = owners.entry(c.entry.slug.as_str()).or_default();
        if files.is_empty() {
            order.push(c.entry.slug.as_str());
        }
        files.push(c.id.as_str());
    }

    let mut duplicates = Vec::new();
    for slug in order {
        let files = &owners[slug];
        if files.len() > 1 {
            duplicates.push(DuplicateSlug {
                kind,
                slug: slug.to_string(),
                files: files.iter().map(|f| f.to_string()).collect(),
            });
        }
    }
    if duplicates.is_empty() {
        return candidates;
    }

    let rejected: usize = duplicates.iter().map(|d| d.files.len()).sum();
    let taken: Vec<String> = duplicates.iter().map(|d| d.slug.clone()).collect();
    report.stats_mut(kind).rejected += rejected;
    report.duplicates.extend(duplicates);

    candidates
        .into_iter()
        .filter(|c| !taken.contains(&c.entry.slug))
        .collect()
}
