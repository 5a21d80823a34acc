//! Metadata validation and slug derivation.

mod slug;
mod validate;

pub use slug::{check_slug, derive_slug, slugify};
pub use validate::{Validated, public_file_path, validate};
