//! Content entry types shared by the whole pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Which collection a document belongs to.
///
/// Notes are the site's articles (categorized, tagged, timed); portfolio
/// entries are project pages with a feature image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Note,
    Portfolio,
}

impl ContentKind {
    pub const ALL: [Self; 2] = [Self::Note, Self::Portfolio];

    /// Plural name used in logs and export file names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Note => "notes",
            Self::Portfolio => "portfolio",
        }
    }

    /// File-name prefix that namespaces documents of this kind.
    pub const fn default_prefix(self) -> &'static str {
        match self {
            Self::Note => "notes",
            Self::Portfolio => "portfolio",
        }
    }
}

/// One published item with validated metadata.
///
/// Serialized in camelCase so exported JSON matches what the rendering layer
/// reads. Unknown front-matter keys are flattened back in from `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    #[serde(skip)]
    pub kind: ContentKind,

    /// Unique URL key derived from the file name.
    pub slug: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Author-supplied date string, kept verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Web-servable reference to the source document.
    pub file_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time_minutes: Option<u32>,

    /// Front-matter keys the schema does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ContentEntry {
    /// Category label, treating an empty string as absent.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// Tag labels, empty when the entry has none. Blank labels are skipped.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .flatten()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }

    /// Title, falling back to the slug with dashes as spaces.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| self.slug.replace('-', " "))
    }
}

/// A content entry plus the plain text of its body, as fed to search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchIndexEntry {
    #[serde(flatten)]
    pub entry: Arc<ContentEntry>,
    pub content: String,
}

#[cfg(test)]
pub(crate) fn entry(slug: &str) -> ContentEntry {
    ContentEntry {
        kind: ContentKind::Note,
        slug: slug.to_string(),
        title: None,
        date: None,
        category: None,
        tags: None,
        excerpt: None,
        file_path: format!("/routes/notes.{slug}.mdx"),
        feature_image: None,
        reading_time_minutes: None,
        extra: BTreeMap::new(),
    }
}
