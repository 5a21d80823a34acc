//! Strip MDX markup down to readable plain text.
//!
//! Used both for reading-time estimates and as the searchable body.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```[\s\S]*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());
static IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").unwrap());
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_]{1,2}([^*_]*)[*_]{1,2}").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Reduce an MDX body to whitespace-normalized plain text.
///
/// The result is a fixed point: `normalize(&normalize(x)) == normalize(x)`.
/// Passes repeat until nothing changes. Each level of nested link or image
/// markup costs one more pass, so the work is O(depth * len); real bodies
/// settle in two or three passes.
pub fn normalize(body: &str) -> String {
    let mut current = normalize_pass(body);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One pass of every rewrite, in order.
fn normalize_pass(text: &str) -> String {
    let text = TAG.replace_all(text, " ");
    let text = replace(text, &FENCED_CODE, " ");
    let text = replace(text, &INLINE_CODE, " ");
    let text = replace(text, &IMAGE, "$1");
    let text = replace(text, &LINK, "$1");
    let text = replace(text, &HEADING, "");
    let text = replace(text, &EMPHASIS, "$1");
    let text = replace(text, &WHITESPACE, " ");
    text.trim().to_string()
}

fn replace<'a>(text: Cow<'a, str>, re: &Regex, rep: &str) -> Cow<'a, str> {
    let replaced = match re.replace_all(&text, rep) {
        Cow::Borrowed(_) => None,
        Cow::Owned(s) => Some(s),
    };
    replaced.map_or(text, Cow::Owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_jsx_components() {
        assert_eq!(normalize("Hello <Callout type=\"info\">world</Callout>!"), "Hello world !");
    }

    #[test]
    fn test_strips_code() {
        let body = "Before\n```rust\nfn main() {}\n```\nafter `inline` end";
        assert_eq!(normalize(body), "Before after end");
    }

    #[test]
    fn test_links_and_images_keep_text() {
        assert_eq!(normalize("See [the docs](https://x.y) now"), "See the docs now");
        assert_eq!(normalize("An ![diagram](/img/d.png) here"), "An diagram here");
    }

    #[test]
    fn test_headings_and_emphasis() {
        let body = "# Title\n\n## Sub heading\nSome **bold** and _italic_ text";
        assert_eq!(normalize(body), "Title Sub heading Some bold and italic text");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  a \n\n\t b  "), "a b");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n "), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "# Heading\nText with **bold** and [link](x).",
            "<<a>b>",
            "``` unclosed fence and `tick",
            "__*mixed*__ emphasis ***triple***",
            "![[nested](a)](b)",
            "plain text",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_deeply_nested_links_settle() {
        let depth = 64;
        let body = format!("{}x{}", "[".repeat(depth), "](u)".repeat(depth));
        assert_eq!(normalize(&body), "x");
    }
}
