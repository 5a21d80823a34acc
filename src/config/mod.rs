//! Site configuration management for `fieldnotes.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                        |
//! |---------------|------------------------------------------------|
//! | `[content]`   | Corpus location, collections, export dir       |
//! | `[reading]`   | Reading-time estimate                          |
//! | `[search]`    | Search weights, threshold, result cap          |
//! | `[related]`   | Related-entry list length                      |
//! | `[listing]`   | Pagination                                     |
//! | `[watch]`     | Live rebuild debounce                          |
//! | `[extra]`     | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [content]
//! root = "app/routes"
//! output = "public/_data"
//!
//! [content.notes]
//! prefix = "notes"
//!
//! [search]
//! threshold = 0.2
//!
//! [listing]
//! per_page = 10
//! ```

mod content;
pub mod defaults;
mod error;
mod query;
mod watch;

pub use content::{CollectionConfig, ContentConfig};
pub use error::ConfigError;
pub use query::{ListingConfig, ReadingConfig, RelatedConfig, SearchConfig};
pub use watch::WatchConfig;

use crate::cli::{Cli, Commands};
use crate::content::FsSource;
use crate::index::BuildOptions;
use crate::log;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing fieldnotes.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root all relative paths resolve against
    #[serde(skip)]
    #[educe(Default = PathBuf::from("./"))]
    pub root: PathBuf,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub reading: ReadingConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub related: RelatedConfig,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config named by the CLI, apply CLI overrides and validate.
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            log!("config"; "{} not found, using defaults", cli.config.display());
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.clone().unwrap_or_else(|| self.root.clone());

        Self::update_option(&mut self.content.root, cli.content.as_ref());
        match &cli.command {
            Commands::Build { output, .. } => {
                Self::update_option(&mut self.content.output, output.as_ref());
            }
            Commands::Watch { export } => {
                Self::update_option(&mut self.watch.export, export.as_ref());
            }
            _ => {}
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(&Self::expand_tilde(root));
        self.config_path = Self::normalize_path(&root.join(config_name));
        self.content.root = Self::normalize_path(&root.join(Self::expand_tilde(&self.content.root)));
        self.content.output =
            Self::normalize_path(&root.join(Self::expand_tilde(&self.content.output)));
        self.root = root;
    }

    /// Expand a leading `~` to the home directory
    fn expand_tilde(path: &Path) -> PathBuf {
        let raw = path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate value ranges and collection naming
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::Validation(format!("[search.{name}] must be between 0 and 1")))
            }
        };
        unit("title_weight", self.search.title_weight)?;
        unit("content_weight", self.search.content_weight)?;
        unit("threshold", self.search.threshold)?;
        if self.search.title_weight + self.search.content_weight <= 0.0 {
            return Err(ConfigError::Validation(
                "[search] at least one field weight must be positive".into(),
            ));
        }

        let positive = [
            ("reading.words_per_minute", self.reading.words_per_minute as usize),
            ("listing.per_page", self.listing.per_page),
            ("listing.portfolio_per_page", self.listing.portfolio_per_page),
            ("listing.window", self.listing.window),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::Validation(format!("[{name}] must be positive")));
            }
        }

        let patterns = self.content.patterns();
        for pattern in &patterns {
            if pattern.prefix.is_empty() || pattern.prefix.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "[content.{}.prefix] must be a non-empty file-name prefix",
                    pattern.kind.name()
                )));
            }
            if pattern.extension.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "[content.{}.extension] must not be empty",
                    pattern.kind.name()
                )));
            }
        }
        if let [a, b] = patterns.as_slice()
            && a.prefix == b.prefix
            && a.extension == b.extension
        {
            return Err(ConfigError::Validation(
                "[content.notes] and [content.portfolio] must use different prefixes".into(),
            ));
        }

        Ok(())
    }

    /// Content source for the configured corpus.
    pub fn source(&self) -> FsSource {
        FsSource::new(&self.content.root).recursive(self.content.recursive)
    }

    /// Options shaping every rebuild.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            public_prefix: self.content.public_prefix.clone(),
            words_per_minute: self.reading.words_per_minute,
            search: self.search.policy(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
