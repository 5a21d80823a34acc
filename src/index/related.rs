//! "Related content" ranking.

use crate::content::ContentEntry;
use crate::meta::slugify;
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::sync::Arc;

/// Default number of related entries shown under an article.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Up to `limit` entries related to `reference`, best first.
///
/// Same category ranks first, then more shared tags. Ties keep the order of
/// `entries` (newest first), so a reference without category or tags gets
/// the latest entries. The reference itself is never returned.
pub fn related(
    entries: &[Arc<ContentEntry>],
    reference: &ContentEntry,
    limit: usize,
) -> Vec<Arc<ContentEntry>> {
    // Symbol-only labels slugify to "" and never match anything.
    let category = reference.category().map(slugify).filter(|s| !s.is_empty());
    let tags: FxHashSet<String> = reference
        .tags()
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect();

    let mut scored: Vec<(bool, usize, &Arc<ContentEntry>)> = entries
        .iter()
        .filter(|e| e.slug != reference.slug)
        .map(|e| {
            let same_category = category.is_some() && e.category().map(slugify) == category;
            let shared = e
                .tags()
                .map(slugify)
                .collect::<FxHashSet<_>>()
                .intersection(&tags)
                .count();
            (same_category, shared, e)
        })
        .collect();

    scored.sort_by_key(|&(same_category, shared, _)| (Reverse(same_category), Reverse(shared)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, _, e)| Arc::clone(e))
        .collect()
}
