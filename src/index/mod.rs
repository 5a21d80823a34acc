//! The built, immutable content index and its query surface.
//!
//! A [`ContentIndex`] covers one collection. Entries are stored once behind
//! `Arc` and shared by every derived map; the index is never mutated after
//! [`builder`] returns it. Two indexes (notes and portfolio) plus the build
//! report form a [`Snapshot`], published through an [`IndexHandle`].

mod builder;
mod date;
mod handle;
mod pagination;
mod related;
mod taxonomy;

pub use builder::{BuildOptions, build_collection, build_snapshot};
pub use date::{compare_newest_first, parse_date};
pub use handle::{IndexHandle, IndexUpdated, Snapshot};
pub use pagination::{DEFAULT_PER_PAGE, DEFAULT_WINDOW, Page, paginate, visible_pages};
pub use related::{DEFAULT_RELATED_LIMIT, related};
pub use taxonomy::{PREVIEW_LEN, Taxonomy, TaxonomySummary};

use crate::content::{ContentEntry, ContentKind, SearchIndexEntry};
use crate::search::{SearchIndex, SearchOptions, SearchResults};
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ContentIndex {
    kind: ContentKind,
    entries: Vec<Arc<ContentEntry>>,
    by_slug: FxHashMap<String, usize>,
    categories: Taxonomy,
    tags: Taxonomy,
    search: SearchIndex,
}

impl ContentIndex {
    /// Index over `entries`, which must already be in newest-first order
    /// with unique slugs.
    pub(crate) fn new(kind: ContentKind, entries: Vec<Arc<ContentEntry>>, search: SearchIndex) -> Self {
        let by_slug = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.slug.clone(), i))
            .collect();
        Self {
            kind,
            categories: Taxonomy::categories(&entries),
            tags: Taxonomy::tags(&entries),
            by_slug,
            entries,
            search,
        }
    }

    pub fn empty(kind: ContentKind) -> Self {
        Self::new(kind, Vec::new(), SearchIndex::default())
    }

    pub const fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by slug.
    pub fn get(&self, slug: &str) -> Option<&Arc<ContentEntry>> {
        self.by_slug.get(slug).map(|&i| &self.entries[i])
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[Arc<ContentEntry>] {
        &self.entries
    }

    pub fn by_category(&self, label: &str) -> Option<&[Arc<ContentEntry>]> {
        self.categories.by_label(label)
    }

    pub fn by_category_slug(&self, slug: &str) -> Option<&[Arc<ContentEntry>]> {
        self.categories.by_slug(slug)
    }

    pub fn by_tag(&self, label: &str) -> Option<&[Arc<ContentEntry>]> {
        self.tags.by_label(label)
    }

    pub fn by_tag_slug(&self, slug: &str) -> Option<&[Arc<ContentEntry>]> {
        self.tags.by_slug(slug)
    }

    pub fn category_label(&self, slug: &str) -> Option<&str> {
        self.categories.label(slug)
    }

    pub fn tag_label(&self, slug: &str) -> Option<&str> {
        self.tags.label(slug)
    }

    /// Distinct tag labels, sorted.
    pub fn tags(&self) -> Vec<&str> {
        self.tags.labels().collect()
    }

    /// Category summaries, largest first.
    pub fn categories(&self) -> Vec<TaxonomySummary> {
        self.categories.summaries()
    }

    /// Tag summaries, largest first.
    pub fn tag_summaries(&self) -> Vec<TaxonomySummary> {
        self.tags.summaries()
    }

    pub fn search(&self, query: &str, options: &SearchOptions) -> SearchResults {
        self.search.search(query, options)
    }

    /// Entries paired with their plain-text bodies.
    pub fn search_entries(&self) -> &[SearchIndexEntry] {
        self.search.entries()
    }

    /// Entries related to `entry`, best first.
    pub fn related(&self, entry: &ContentEntry, limit: usize) -> Vec<Arc<ContentEntry>> {
        related(&self.entries, entry, limit)
    }
}
