//! Build-time diagnostics.
//!
//! Every rebuild produces exactly one [`BuildReport`]. It aggregates the
//! per-file failures of the whole pass (read, parse, validation), the
//! duplicate-slug collisions, non-fatal warnings and the accepted/rejected
//! counts per collection. The report is for the operator's build log only.

use crate::content::ContentKind;
use crate::log;
use serde::Serialize;
use std::fmt;

/// What stage produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// File could not be read.
    Read,
    /// Front matter block is malformed.
    Parse,
    /// Front matter or derived record failed the schema.
    Validation,
    /// Date present but not understood; entry sorts as undated.
    Date,
    /// Front matter tried to set a derived field; the value was ignored.
    Reserved,
}

/// One problem attributed to one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Source file identifier (path as shown to the operator).
    pub file: String,
    /// Dotted field path (`tags`, `tags.1`), `None` for whole-file problems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            file: file.into(),
            field: None,
            message: message.into(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Warnings keep the entry; everything else dropped it.
    pub const fn is_warning(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Date | DiagnosticKind::Reserved)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}: {}", self.file, field, self.message),
            None => write!(f, "{}: {}", self.file, self.message),
        }
    }
}

/// Two or more files resolved to the same slug. All of them were rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateSlug {
    pub kind: ContentKind,
    pub slug: String,
    pub files: Vec<String>,
}

impl fmt::Display for DuplicateSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} slug `{}` is claimed by {}; rename one of them",
            self.kind.name(),
            self.slug,
            self.files.join(", ")
        )
    }
}

/// Accepted/rejected counts for one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    /// Files matching the collection's naming convention.
    pub discovered: usize,
    /// Entries present in the published index.
    pub accepted: usize,
    /// Files excluded by read/parse/validation errors or slug collisions.
    pub rejected: usize,
}

/// Aggregate diagnostics of one rebuild.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    pub notes: CollectionStats,
    pub portfolio: CollectionStats,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub duplicates: Vec<DuplicateSlug>,
}

impl BuildReport {
    pub fn stats(&self, kind: ContentKind) -> &CollectionStats {
        match kind {
            ContentKind::Note => &self.notes,
            ContentKind::Portfolio => &self.portfolio,
        }
    }

    pub fn stats_mut(&mut self, kind: ContentKind) -> &mut CollectionStats {
        match kind {
            ContentKind::Note => &mut self.notes,
            ContentKind::Portfolio => &mut self.portfolio,
        }
    }

    /// Route a diagnostic to `errors` or `warnings`.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            self.warnings.push(diagnostic);
        } else {
            self.errors.push(diagnostic);
        }
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for d in diagnostics {
            self.push(d);
        }
    }

    /// Number of distinct files with at least one error.
    pub fn files_with_errors(&self) -> usize {
        let mut files: Vec<&str> = self.errors.iter().map(|d| d.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.duplicates.is_empty()
    }

    /// Write the report to the build log.
    pub fn log(&self) {
        if !self.errors.is_empty() {
            let lines: Vec<String> = self.errors.iter().map(|d| format!("  {d}")).collect();
            log!("error"; "front matter validation errors:\n{}", lines.join("\n"));
            log!("error"; "{} file(s) had validation errors and were skipped", self.files_with_errors());
        }
        for dup in &self.duplicates {
            log!("error"; "{dup}");
        }
        for warning in &self.warnings {
            log!("warn"; "{warning}");
        }

        for kind in ContentKind::ALL {
            let stats = self.stats(kind);
            if stats.discovered == 0 {
                continue;
            }
            if stats.rejected == 0 {
                log!("index"; "{} {} (all passed validation)", stats.accepted, kind.name());
            } else {
                log!("index"; "{} valid {} ({} skipped)", stats.accepted, kind.name(), stats.rejected);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display_with_field() {
        let d = Diagnostic::new(DiagnosticKind::Validation, "app/routes/notes.a.mdx", "expected array, received string")
            .with_field("tags");
        assert_eq!(
            d.to_string(),
            "app/routes/notes.a.mdx: tags: expected array, received string"
        );
    }

    #[test]
    fn test_diagnostic_display_without_field() {
        let d = Diagnostic::new(DiagnosticKind::Read, "notes.a.mdx", "permission denied");
        assert_eq!(d.to_string(), "notes.a.mdx: permission denied");
    }

    #[test]
    fn test_push_routes_by_severity() {
        let mut report = BuildReport::default();
        report.push(Diagnostic::new(DiagnosticKind::Date, "a", "unknown date"));
        report.push(Diagnostic::new(DiagnosticKind::Parse, "b", "bad yaml"));
        report.push(Diagnostic::new(DiagnosticKind::Reserved, "c", "slug ignored"));

        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_files_with_errors_counts_distinct_files() {
        let mut report = BuildReport::default();
        report.push(Diagnostic::new(DiagnosticKind::Validation, "a", "x").with_field("title"));
        report.push(Diagnostic::new(DiagnosticKind::Validation, "a", "y").with_field("tags"));
        report.push(Diagnostic::new(DiagnosticKind::Validation, "b", "z").with_field("date"));

        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.files_with_errors(), 2);
    }

    #[test]
    fn test_duplicate_display_names_all_files() {
        let dup = DuplicateSlug {
            kind: ContentKind::Note,
            slug: "entropy".into(),
            files: vec!["notes.entropy.mdx".into(), "notes._index.entropy.mdx".into()],
        };
        let text = dup.to_string();
        assert!(text.contains("`entropy`"));
        assert!(text.contains("notes.entropy.mdx"));
        assert!(text.contains("notes._index.entropy.mdx"));
    }

    #[test]
    fn test_stats_by_kind() {
        let mut report = BuildReport::default();
        report.stats_mut(ContentKind::Portfolio).accepted = 4;
        assert_eq!(report.stats(ContentKind::Portfolio).accepted, 4);
        assert_eq!(report.stats(ContentKind::Note).accepted, 0);
        assert!(report.is_clean());
    }
}
