//! fieldnotes - content indexer for a personal notes and portfolio site.
//!
//! Reads `notes.*.mdx` and `portfolio.*.mdx` files, validates their front
//! matter and builds an immutable index with slug lookup, categories, tags,
//! related notes, pagination and fuzzy search. Rebuilds are published
//! atomically through an [`IndexHandle`](index::IndexHandle).
//!
//! ```ignore
//! let source = MemorySource::new("app/routes")
//!     .with("notes.hello.mdx", "---\ntitle: Hello\ntags: [rust]\n---\nBody");
//! let handle = IndexHandle::new();
//! let snapshot = pipeline::rebuild(&source, &patterns, &BuildOptions::default(), &handle)?;
//! assert!(snapshot.notes.get("hello").is_some());
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod index;
pub mod logger;
pub mod meta;
pub mod pipeline;
pub mod search;
pub mod text;
pub mod watch;

pub use config::SiteConfig;
pub use content::{ContentEntry, ContentKind};
pub use diagnostics::BuildReport;
pub use error::IndexError;
pub use index::{ContentIndex, IndexHandle, Snapshot};
