//! Entry slugs and label slugification.

use regex::Regex;
use std::sync::LazyLock;

/// First dotted segment starting with `_` (a route layout marker).
static LAYOUT_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\._[^.]+\.").unwrap());

// ============================================================================
// Entry slugs
// ============================================================================

/// Derive an entry slug from a file stem (file name without extension).
///
/// | stem | prefix | slug |
/// |------|--------|------|
/// | `notes.entropy` | `notes` | `entropy` |
/// | `notes._layout.entropy` | `notes` | `entropy` |
/// | `portfolio.site-v2` | `portfolio` | `site-v2` |
pub fn derive_slug(stem: &str, prefix: &str) -> String {
    let stem = LAYOUT_SEGMENT.replace(stem, ".");
    let dotted = format!("{prefix}.");
    match stem.strip_prefix(&dotted) {
        Some(rest) => rest.to_string(),
        None => stem.into_owned(),
    }
}

/// Check that a derived slug can be used as a URL key.
pub fn check_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() {
        return Err("slug must not be empty");
    }
    if slug.contains(['/', '\\']) {
        return Err("slug must not contain path separators");
    }
    if slug.chars().any(char::is_whitespace) {
        return Err("slug must not contain whitespace");
    }
    Ok(())
}

// ============================================================================
// Label slugs
// ============================================================================

/// Convert a category or tag label to its URL form.
///
/// Accents are transliterated, whitespace and underscores become `-`,
/// anything outside `[a-z0-9-]` is dropped, and `-` runs collapse.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text.trim()).to_ascii_lowercase();

    let mut out = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        let c = if c.is_whitespace() || c == '_' { '-' } else { c };
        match c {
            '-' if out.is_empty() || out.ends_with('-') => {}
            'a'..='z' | '0'..='9' | '-' => out.push(c),
            _ => {}
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
