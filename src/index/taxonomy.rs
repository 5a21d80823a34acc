//! Category and tag groupings.
//!
//! A taxonomy groups entries by label and by slugified label. Labels that
//! slugify to the same value (`Rust`, `rust`) share one slug group; the
//! slug's display label is the one seen last in corpus order.

use crate::content::ContentEntry;
use crate::meta::slugify;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Number of entries carried in a summary preview.
pub const PREVIEW_LEN: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    by_label: FxHashMap<String, Vec<Arc<ContentEntry>>>,
    by_slug: FxHashMap<String, Vec<Arc<ContentEntry>>>,
    labels: FxHashMap<String, String>,
    sorted_labels: BTreeSet<String>,
}

/// One category or tag with its entry count and first entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomySummary {
    pub slug: String,
    pub label: String,
    pub count: usize,
    pub preview: Vec<Arc<ContentEntry>>,
}

impl Taxonomy {
    /// Group entries by their category.
    pub fn categories(entries: &[Arc<ContentEntry>]) -> Self {
        let mut taxonomy = Self::default();
        for entry in entries {
            if let Some(category) = entry.category() {
                taxonomy.insert(category, entry);
            }
        }
        taxonomy
    }

    /// Group entries by their tags. A tag repeated on one entry counts once.
    pub fn tags(entries: &[Arc<ContentEntry>]) -> Self {
        let mut taxonomy = Self::default();
        for entry in entries {
            let mut seen_labels = FxHashSet::default();
            let mut seen_slugs = FxHashSet::default();
            for tag in entry.tags() {
                if !seen_labels.insert(tag) {
                    continue;
                }
                let slug = slugify(tag);
                taxonomy.push_label(tag, entry);
                if seen_slugs.insert(slug.clone()) {
                    taxonomy.push_slug(slug, tag, entry);
                } else {
                    taxonomy.labels.insert(slug, tag.to_string());
                }
            }
        }
        taxonomy
    }

    fn insert(&mut self, label: &str, entry: &Arc<ContentEntry>) {
        self.push_label(label, entry);
        self.push_slug(slugify(label), label, entry);
    }

    fn push_label(&mut self, label: &str, entry: &Arc<ContentEntry>) {
        self.by_label
            .entry(label.to_string())
            .or_default()
            .push(Arc::clone(entry));
        self.sorted_labels.insert(label.to_string());
    }

    fn push_slug(&mut self, slug: String, label: &str, entry: &Arc<ContentEntry>) {
        // Labels made only of symbols have no URL form.
        if slug.is_empty() {
            return;
        }
        self.labels.insert(slug.clone(), label.to_string());
        self.by_slug.entry(slug).or_default().push(Arc::clone(entry));
    }

    /// Entries with exactly this label, in corpus order.
    pub fn by_label(&self, label: &str) -> Option<&[Arc<ContentEntry>]> {
        self.by_label.get(label).map(Vec::as_slice)
    }

    /// Entries whose label slugifies to `slug`, in corpus order.
    pub fn by_slug(&self, slug: &str) -> Option<&[Arc<ContentEntry>]> {
        self.by_slug.get(slug).map(Vec::as_slice)
    }

    /// Display label for a slug.
    pub fn label(&self, slug: &str) -> Option<&str> {
        self.labels.get(slug).map(String::as_str)
    }

    /// Distinct labels, sorted.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sorted_labels.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    /// One summary per slug, most entries first, then by label.
    pub fn summaries(&self) -> Vec<TaxonomySummary> {
        let mut summaries: Vec<TaxonomySummary> = self
            .by_slug
            .iter()
            .map(|(slug, entries)| TaxonomySummary {
                slug: slug.clone(),
                label: self.label(slug).unwrap_or(slug).to_string(),
                count: entries.len(),
                preview: entries.iter().take(PREVIEW_LEN).cloned().collect(),
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.label.cmp(&b.label))
                .then_with(|| a.slug.cmp(&b.slug))
        });
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_entry;

    fn note(slug: &str, category: Option<&str>, tags: &[&str]) -> Arc<ContentEntry> {
        let mut e = test_entry(slug);
        e.category = category.map(str::to_string);
        if !tags.is_empty() {
            e.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        }
        Arc::new(e)
    }

    fn slugs(entries: Option<&[Arc<ContentEntry>]>) -> Vec<&str> {
        entries.unwrap_or_default().iter().map(|e| e.slug.as_str()).collect()
    }

    #[test]
    fn test_categories_by_label_and_slug() {
        let entries = vec![
            note("a", Some("Software Design"), &[]),
            note("b", Some("Physics"), &[]),
            note("c", Some("Software Design"), &[]),
            note("d", None, &[]),
            note("e", Some(""), &[]),
        ];
        let cats = Taxonomy::categories(&entries);

        assert_eq!(slugs(cats.by_label("Software Design")), vec!["a", "c"]);
        assert_eq!(slugs(cats.by_slug("software-design")), vec!["a", "c"]);
        assert_eq!(cats.label("software-design"), Some("Software Design"));
        assert!(cats.by_label("").is_none());
        assert!(cats.by_slug("missing").is_none());
        assert_eq!(cats.labels().collect::<Vec<_>>(), vec!["Physics", "Software Design"]);
    }

    #[test]
    fn test_membership_matches_entry_category() {
        let entries = vec![
            note("a", Some("X"), &[]),
            note("b", Some("Y"), &[]),
            note("c", Some("X"), &[]),
        ];
        let cats = Taxonomy::categories(&entries);
        for label in cats.labels() {
            for entry in cats.by_label(label).unwrap() {
                assert_eq!(entry.category(), Some(label));
            }
        }
        let total: usize = cats.labels().map(|l| cats.by_label(l).unwrap().len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_label_variants_share_slug_last_wins() {
        let entries = vec![note("a", None, &["Rust"]), note("b", None, &["rust"])];
        let tags = Taxonomy::tags(&entries);

        assert_eq!(slugs(tags.by_label("Rust")), vec!["a"]);
        assert_eq!(slugs(tags.by_label("rust")), vec!["b"]);
        assert_eq!(slugs(tags.by_slug("rust")), vec!["a", "b"]);
        assert_eq!(tags.label("rust"), Some("rust"));
        assert_eq!(tags.labels().collect::<Vec<_>>(), vec!["Rust", "rust"]);
    }

    #[test]
    fn test_repeated_tag_counts_once() {
        let entries = vec![note("a", None, &["rust", "rust", "Rust"])];
        let tags = Taxonomy::tags(&entries);
        assert_eq!(slugs(tags.by_label("rust")), vec!["a"]);
        assert_eq!(slugs(tags.by_slug("rust")), vec!["a"]);
        assert_eq!(tags.label("rust"), Some("Rust"));
    }

    #[test]
    fn test_symbol_only_label_has_no_slug_group() {
        let entries = vec![note("a", None, &["!!!"])];
        let tags = Taxonomy::tags(&entries);
        assert_eq!(slugs(tags.by_label("!!!")), vec!["a"]);
        assert!(tags.by_slug("").is_none());
        assert!(tags.summaries().is_empty());
    }

    #[test]
    fn test_summaries_sorted_with_preview() {
        let entries = vec![
            note("a", None, &["web"]),
            note("b", None, &["rust", "web"]),
            note("c", None, &["rust", "web"]),
            note("d", None, &["rust", "web"]),
            note("e", None, &["cli"]),
            note("f", None, &["api"]),
        ];
        let summaries = Taxonomy::tags(&entries).summaries();

        let order: Vec<_> = summaries.iter().map(|s| (s.slug.as_str(), s.count)).collect();
        assert_eq!(order, vec![("web", 4), ("rust", 3), ("api", 1), ("cli", 1)]);

        let preview: Vec<_> = summaries[0].preview.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(preview, vec!["a", "b", "c"]);
    }
}
