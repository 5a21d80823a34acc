//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// fieldnotes content indexer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: fieldnotes.toml)
    #[arg(short = 'C', long, default_value = "fieldnotes.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Which entries a listing shows.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct ListFilter {
    /// Only entries with this category label
    #[arg(long)]
    pub category: Option<String>,

    /// Only entries whose category slugifies to this
    #[arg(long)]
    pub category_slug: Option<String>,

    /// Only entries with this tag label
    #[arg(long)]
    pub tag: Option<String>,

    /// Only entries with a tag that slugifies to this
    #[arg(long)]
    pub tag_slug: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rebuild the index, print the report and export JSON data files
    Build {
        /// Export directory (relative to project root)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip writing JSON data files
        #[arg(long)]
        no_export: bool,
    },

    /// Build, then rebuild whenever content files change
    Watch {
        /// Export JSON data files after every rebuild
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        export: Option<bool>,
    },

    /// Fuzzy search notes by title and body
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show notes related to a note
    Related {
        /// Slug of the reference note
        slug: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List notes newest first, one page at a time
    List {
        #[command(flatten)]
        filter: ListFilter,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// List portfolio projects instead of notes
        #[arg(long)]
        portfolio: bool,
    },

    /// List all tags with their note counts
    Tags,

    /// List all categories with their note counts
    Categories,
}
