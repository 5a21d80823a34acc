//! Errors that abort a rebuild.
//!
//! Per-file problems never surface here; they are collected as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s. An `IndexError` means the
//! corpus as a whole could not be read, and the previously published
//! snapshot must stay in place.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("content directory `{0}` not found")]
    RootMissing(PathBuf),

    #[error("content path `{0}` is not a directory")]
    RootNotDirectory(PathBuf),

    #[error("IO error when reading content directory `{0}`")]
    RootUnreadable(PathBuf, #[source] std::io::Error),

    #[error("failed to walk content directory `{0}`")]
    Walk(PathBuf, #[source] walkdir::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_index_error_display() {
        let err = IndexError::RootMissing(PathBuf::from("app/routes"));
        assert_eq!(err.to_string(), "content directory `app/routes` not found");

        let err = IndexError::RootUnreadable(
            PathBuf::from("app/routes"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("app/routes"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
