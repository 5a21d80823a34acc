//! `[reading]`, `[search]`, `[related]` and `[listing]` sections.
//!
//! Knobs for the derived data: reading speed, search scoring, related-list
//! length and pagination.

use super::defaults;
use crate::content::ContentKind;
use crate::search::{SearchOptions, SearchPolicy};
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[reading]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ReadingConfig {
    #[serde(default = "defaults::reading::words_per_minute")]
    #[educe(Default = defaults::reading::words_per_minute())]
    pub words_per_minute: u32,
}

/// `[search]` section.
///
/// # Example
/// ```toml
/// [search]
/// title_weight = 0.7
/// content_weight = 0.3
/// threshold = 0.2
/// limit = 20
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default = "defaults::search::title_weight")]
    #[educe(Default = defaults::search::title_weight())]
    pub title_weight: f64,

    #[serde(default = "defaults::search::content_weight")]
    #[educe(Default = defaults::search::content_weight())]
    pub content_weight: f64,

    /// Fraction of query characters that may be edited (0 = exact).
    #[serde(default = "defaults::search::threshold")]
    #[educe(Default = defaults::search::threshold())]
    pub threshold: f64,

    /// Queries shorter than this match nothing.
    #[serde(default = "defaults::search::min_match_len")]
    #[educe(Default = defaults::search::min_match_len())]
    pub min_match_len: usize,

    /// Cap on returned hits; unlimited when unset.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchConfig {
    pub const fn policy(&self) -> SearchPolicy {
        SearchPolicy {
            title_weight: self.title_weight,
            content_weight: self.content_weight,
            threshold: self.threshold,
            min_match_len: self.min_match_len,
        }
    }

    /// Query options, with `limit` overriding the configured cap.
    pub fn options(&self, limit: Option<usize>) -> SearchOptions {
        SearchOptions {
            limit: limit.or(self.limit),
            threshold: None,
        }
    }
}

/// `[related]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RelatedConfig {
    #[serde(default = "defaults::related::limit")]
    #[educe(Default = defaults::related::limit())]
    pub limit: usize,
}

/// `[listing]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    /// Notes per page.
    #[serde(default = "defaults::listing::per_page")]
    #[educe(Default = defaults::listing::per_page())]
    pub per_page: usize,

    /// Portfolio projects per page; a grid of two or three columns.
    #[serde(default = "defaults::listing::portfolio_per_page")]
    #[educe(Default = defaults::listing::portfolio_per_page())]
    pub portfolio_per_page: usize,

    /// Number of page links shown around the current page.
    #[serde(default = "defaults::listing::window")]
    #[educe(Default = defaults::listing::window())]
    pub window: usize,
}

impl ListingConfig {
    /// Page size for a collection.
    pub const fn page_size(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Note => self.per_page,
            ContentKind::Portfolio => self.portfolio_per_page,
        }
    }
}
