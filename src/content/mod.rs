//! Content discovery: sources, front matter, raw documents, entry model.

mod front_matter;
mod loader;
mod model;
mod source;

pub use front_matter::{FrontMatterError, RawFrontMatter, split_front_matter};
pub use loader::{CollectionPattern, RawDocument, load};
pub use model::{ContentEntry, ContentKind, SearchIndexEntry};
pub use source::{ContentSource, FsSource, MemorySource};

pub(crate) use loader::file_name;

#[cfg(test)]
pub(crate) use model::entry as test_entry;
