//! Fuzzy full-text search over titles and bodies.
//!
//! Each entry contributes two fields, its title and its normalized body.
//! A query is matched against both with a bounded edit distance; the field
//! scores are combined with per-field weights and a length norm so a hit in
//! a short title counts for more than the same hit in a long body.
//!
//! Scores follow the convention that 0 is a perfect match. Callers usually
//! want [`SearchHit::relevance`], which is `1 - score`.

mod matcher;

use crate::content::{ContentEntry, SearchIndexEntry};
use serde::Serialize;
use std::sync::Arc;

pub use matcher::best_match;

/// How queries are scored. Fixed for the lifetime of an index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchPolicy {
    pub title_weight: f64,
    pub content_weight: f64,
    /// Fraction of query characters that may be edited.
    pub threshold: f64,
    /// Shorter queries match nothing.
    pub min_match_len: usize,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            title_weight: 0.6,
            content_weight: 0.4,
            threshold: 0.15,
            min_match_len: 3,
        }
    }
}

impl SearchPolicy {
    /// Whether a non-blank query is below the minimum match length.
    /// Such a query is attempted but can never match.
    pub fn is_too_short(&self, query: &str) -> bool {
        let query = query.trim();
        !query.is_empty() && query.to_lowercase().chars().count() < self.min_match_len
    }
}

/// Per-query overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchOptions {
    pub limit: Option<usize>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub entry: Arc<ContentEntry>,
    pub score: f64,
    pub relevance: f64,
}

/// Outcome of a query.
///
/// `attempted` is false only when the query was blank, which lets callers
/// tell "nothing typed yet" apart from "nothing found".
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub attempted: bool,
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

// ============================================================================
// Index
// ============================================================================

/// A lowercased field ready for matching.
#[derive(Debug, Clone)]
struct Field {
    chars: Vec<char>,
    norm: f64,
}

impl Field {
    fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            chars: text.to_lowercase().chars().collect(),
            norm: field_norm(text.split_whitespace().count()),
        })
    }
}

#[derive(Debug, Clone)]
struct Document {
    title: Option<Field>,
    content: Option<Field>,
}

/// Search structure over one collection, in corpus order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    policy: SearchPolicy,
    entries: Vec<SearchIndexEntry>,
    documents: Vec<Document>,
}

impl SearchIndex {
    pub fn new(entries: Vec<SearchIndexEntry>, policy: SearchPolicy) -> Self {
        let documents = entries
            .iter()
            .map(|e| Document {
                title: e.entry.title.as_deref().and_then(Field::new),
                content: Field::new(&e.content),
            })
            .collect();
        Self {
            policy,
            entries,
            documents,
        }
    }

    /// The materialized search entries, for export.
    pub fn entries(&self) -> &[SearchIndexEntry] {
        &self.entries
    }

    /// Run a query. Best hits first; equal scores keep corpus order.
    pub fn search(&self, query: &str, options: &SearchOptions) -> SearchResults {
        let query = query.trim();
        if query.is_empty() {
            return SearchResults::default();
        }

        if self.policy.is_too_short(query) {
            return SearchResults {
                attempted: true,
                hits: Vec::new(),
            };
        }
        let pattern: Vec<char> = query.to_lowercase().chars().collect();

        let threshold = options.threshold.unwrap_or(self.policy.threshold).clamp(0.0, 1.0);
        let max_errors = (threshold * pattern.len() as f64).floor() as usize;
        let (title_weight, content_weight) = self.normalized_weights();

        let mut hits: Vec<SearchHit> = self
            .documents
            .iter()
            .zip(&self.entries)
            .filter_map(|(doc, e)| {
                let fields = [(&doc.title, title_weight), (&doc.content, content_weight)];
                let mut score = 1.0;
                let mut matched = false;
                for (field, weight) in fields {
                    let Some(field) = field else { continue };
                    let Some(errors) = best_match(&pattern, &field.chars, max_errors) else {
                        continue;
                    };
                    matched = true;
                    let field_score = errors as f64 / pattern.len() as f64;
                    let base = if field_score == 0.0 { f64::EPSILON } else { field_score };
                    score *= base.powf(weight * field.norm);
                }
                matched.then(|| SearchHit {
                    entry: Arc::clone(&e.entry),
                    score,
                    relevance: 1.0 - score,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        if let Some(limit) = options.limit {
            hits.truncate(limit);
        }

        SearchResults {
            attempted: true,
            hits,
        }
    }

    /// Field weights scaled to sum to 1.
    fn normalized_weights(&self) -> (f64, f64) {
        let total = self.policy.title_weight + self.policy.content_weight;
        if total <= 0.0 {
            return (0.5, 0.5);
        }
        (self.policy.title_weight / total, self.policy.content_weight / total)
    }
}

/// `1 / sqrt(tokens)`, rounded to three decimals.
fn field_norm(tokens: usize) -> f64 {
    let norm = 1.0 / (tokens.max(1) as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}
