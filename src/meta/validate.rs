//! Front matter schema validation.
//!
//! Known fields are type-checked; every failure is reported, not just the
//! first. Keys the schema does not know pass through to `extra` unchanged.

use super::slug::{check_slug, derive_slug};
use crate::content::{CollectionPattern, ContentEntry, ContentKind, RawDocument};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use serde_json::Value;
use std::collections::BTreeMap;

/// Keys that are derived by the pipeline and may not be set by authors.
const RESERVED_KEYS: &[&str] = &["slug", "filePath", "readingTimeMinutes", "kind"];

/// A document that passed validation.
#[derive(Debug, Clone)]
pub struct Validated {
    pub entry: ContentEntry,
    /// Non-fatal findings (ignored reserved keys).
    pub warnings: Vec<Diagnostic>,
}

/// Validate a raw document into an entry.
///
/// On failure returns one diagnostic per offending field.
pub fn validate(
    doc: &RawDocument,
    pattern: &CollectionPattern,
    public_prefix: &str,
) -> Result<Validated, Vec<Diagnostic>> {
    let mut checker = FieldChecker::new(&doc.id);
    let mut warnings = Vec::new();

    let mut title = None;
    let mut date = None;
    let mut excerpt = None;
    let mut category = None;
    let mut tags = None;
    let mut feature_image = None;
    let mut extra = BTreeMap::new();

    for (key, value) in &doc.front_matter {
        match (key.as_str(), doc.kind) {
            ("title", _) => title = checker.string(key, value),
            ("date", _) => date = checker.string(key, value),
            ("excerpt", _) => excerpt = checker.string(key, value),
            ("category", ContentKind::Note) => {
                category = checker.string(key, value).and_then(label);
            }
            ("tags", ContentKind::Note) => {
                tags = checker
                    .string_list(key, value)
                    .map(|list| list.into_iter().filter_map(label).collect());
            }
            ("featureImage", ContentKind::Portfolio) => feature_image = checker.string(key, value),
            (k, _) if RESERVED_KEYS.contains(&k) => warnings.push(
                Diagnostic::new(
                    DiagnosticKind::Reserved,
                    doc.id.as_str(),
                    "derived field cannot be set in front matter; value ignored",
                )
                .with_field(k),
            ),
            _ => {
                extra.insert(key.clone(), value.clone());
            }
        }
    }

    // Derived fields, checked as part of the complete record.
    let stem = pattern.stem(doc.file_name()).unwrap_or(doc.file_name());
    let slug = derive_slug(stem, &pattern.prefix);
    if let Err(message) = check_slug(&slug) {
        checker.fail("slug", message.to_string());
    }
    let file_path = public_file_path(public_prefix, &doc.rel);

    if !checker.errors.is_empty() {
        return Err(checker.errors);
    }

    Ok(Validated {
        entry: ContentEntry {
            kind: doc.kind,
            slug,
            title,
            date,
            category,
            tags,
            excerpt,
            file_path,
            feature_image,
            reading_time_minutes: None,
            extra,
        },
        warnings,
    })
}

/// Web path of a source document: `public_prefix` joined with `rel`.
///
/// `("/routes", "notes.a.mdx")` -> `/routes/notes.a.mdx`
pub fn public_file_path(public_prefix: &str, rel: &str) -> String {
    let prefix = public_prefix.trim_end_matches('/');
    let prefix = if prefix.starts_with('/') || prefix.is_empty() {
        prefix.to_string()
    } else {
        format!("/{prefix}")
    };
    format!("{prefix}/{}", rel.trim_start_matches('/'))
}

/// Taxonomy label as stored and indexed: trimmed, blank is absent.
fn label(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == raw.len() {
        Some(raw)
    } else {
        Some(trimmed.to_string())
    }
}

/// Name of a JSON value's type, as used in validation messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Field checks
// ============================================================================

struct FieldChecker<'a> {
    file: &'a str,
    errors: Vec<Diagnostic>,
}

impl<'a> FieldChecker<'a> {
    const fn new(file: &'a str) -> Self {
        Self {
            file,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, field: &str, message: String) {
        self.errors.push(
            Diagnostic::new(DiagnosticKind::Validation, self.file, message).with_field(field),
        );
    }

    fn string(&mut self, field: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.fail(field, format!("expected string, received {}", type_name(other)));
                None
            }
        }
    }

    fn string_list(&mut self, field: &str, value: &Value) -> Option<Vec<String>> {
        let Value::Array(items) = value else {
            self.fail(field, format!("expected array, received {}", type_name(value)));
            return None;
        };

        let before = self.errors.len();
        let list: Vec<String> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.string(&format!("{field}.{i}"), item))
            .collect();
        (self.errors.len() == before).then_some(list)
    }
}
