//! `[content]` section configuration.
//!
//! Where the corpus lives, how its files are named and where exports go.

use super::defaults;
use crate::content::{CollectionPattern, ContentKind};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in fieldnotes.toml.
///
/// # Example
/// ```toml
/// [content]
/// root = "app/routes"
/// public_prefix = "/routes"
/// output = "public/_data"
///
/// [content.notes]
/// prefix = "notes"
///
/// [content.portfolio]
/// enable = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Corpus directory (relative to project root).
    #[serde(default = "defaults::content::root")]
    #[educe(Default = defaults::content::root())]
    pub root: PathBuf,

    /// Web path the corpus directory is served under; prefixes `filePath`.
    #[serde(default = "defaults::content::public_prefix")]
    #[educe(Default = defaults::content::public_prefix())]
    pub public_prefix: String,

    /// Walk subdirectories of `root`.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub recursive: bool,

    /// Export directory for JSON data files (relative to project root).
    #[serde(default = "defaults::content::output")]
    #[educe(Default = defaults::content::output())]
    pub output: PathBuf,

    #[serde(default)]
    pub notes: CollectionConfig,

    #[serde(default)]
    pub portfolio: CollectionConfig,
}

/// `[content.notes]` / `[content.portfolio]` subsections.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    /// File-name prefix; defaults to the collection name.
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default = "defaults::content::extension")]
    #[educe(Default = defaults::content::extension())]
    pub extension: String,

    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,
}

impl ContentConfig {
    pub const fn collection(&self, kind: ContentKind) -> &CollectionConfig {
        match kind {
            ContentKind::Note => &self.notes,
            ContentKind::Portfolio => &self.portfolio,
        }
    }

    /// File-name patterns of the enabled collections.
    pub fn patterns(&self) -> Vec<CollectionPattern> {
        ContentKind::ALL
            .into_iter()
            .filter(|&kind| self.collection(kind).enable)
            .map(|kind| {
                let c = self.collection(kind);
                let prefix = c.prefix.as_deref().unwrap_or(kind.default_prefix());
                CollectionPattern::new(kind, prefix, c.extension.as_str())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use crate::content::ContentKind;
    use std::path::PathBuf;

    #[test]
    fn test_content_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.content.root, PathBuf::from("app/routes"));
        assert_eq!(config.content.public_prefix, "/routes");
        assert_eq!(config.content.output, PathBuf::from("public/_data"));
        assert!(!config.content.recursive);

        let patterns = config.content.patterns();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].kind, ContentKind::Note);
        assert_eq!(patterns[0].prefix, "notes");
        assert_eq!(patterns[1].prefix, "portfolio");
        assert_eq!(patterns[1].extension, "mdx");
    }

    #[test]
    fn test_collection_overrides() {
        let config = r#"
            [content]
            root = "content"
            recursive = true

            [content.notes]
            prefix = "posts"
            extension = "md"

            [content.portfolio]
            enable = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        let patterns = config.content.patterns();

        assert!(config.content.recursive);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].prefix, "posts");
        assert!(patterns[0].matches("posts.hello.md"));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [content.notes]
            unknown = "x"
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }
}
