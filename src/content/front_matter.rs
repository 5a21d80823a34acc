//! YAML front matter extraction.
//!
//! A document may open with a `---` line; everything up to the next `---`
//! (or `...`) line is YAML metadata, the rest is the body. Documents that do
//! not open with a delimiter have no front matter.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Raw front-matter fields, converted to JSON values for uniform handling.
pub type RawFrontMatter = BTreeMap<String, Value>;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front matter opened on line 1 but never closed")]
    Unterminated,

    #[error("invalid YAML in front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter is not a key/value mapping")]
    NotMapping,

    #[error("front matter could not be converted: {0}")]
    Convert(#[from] serde_json::Error),
}

/// Split a document into front matter and body.
pub fn split_front_matter(input: &str) -> Result<(RawFrontMatter, &str), FrontMatterError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let Some((first, mut rest)) = split_line(input) else {
        return Ok((RawFrontMatter::new(), input));
    };
    if first.trim_end() != "---" {
        return Ok((RawFrontMatter::new(), input));
    }

    let yaml_start = rest;
    let mut yaml_len = 0;
    loop {
        let Some((line, next)) = split_line(rest) else {
            return Err(FrontMatterError::Unterminated);
        };
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let fields = parse_yaml(&yaml_start[..yaml_len])?;
            return Ok((fields, next));
        }
        yaml_len += rest.len() - next.len();
        rest = next;
    }
}

/// Split off the first line. `None` once the input is exhausted.
fn split_line(input: &str) -> Option<(&str, &str)> {
    if input.is_empty() {
        return None;
    }
    Some(match input.find('\n') {
        Some(i) => (&input[..i], &input[i + 1..]),
        None => (input, ""),
    })
}

/// Parse a YAML block into a JSON-compatible map.
fn parse_yaml(yaml: &str) -> Result<RawFrontMatter, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(RawFrontMatter::new());
    }

    let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    if yaml_value.is_null() {
        return Ok(RawFrontMatter::new());
    }

    match serde_json::to_value(yaml_value)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(FrontMatterError::NotMapping),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_front_matter() {
        let input = "---\ntitle: Entropy\ncategory: Physics\n---\n# Heading\nBody";
        let (fm, body) = split_front_matter(input).unwrap();
        assert_eq!(fm["title"], Value::String("Entropy".into()));
        assert_eq!(fm["category"], Value::String("Physics".into()));
        assert_eq!(body, "# Heading\nBody");
    }

    #[test]
    fn test_front_matter_with_lists() {
        let input = "---\ntags:\n  - entropy\n  - technical-debt\n---\n";
        let (fm, body) = split_front_matter(input).unwrap();
        let tags = fm["tags"].as_array().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1], Value::String("technical-debt".into()));
        assert_eq!(body, "");
    }

    #[test]
    fn test_unquoted_date_stays_string() {
        let (fm, _) = split_front_matter("---\ndate: 2024-03-01\n---\nx").unwrap();
        assert_eq!(fm["date"], Value::String("2024-03-01".into()));
    }

    #[test]
    fn test_front_matter_with_bom_and_crlf() {
        let input = "\u{feff}---\r\ntitle: Hello\r\n---\r\nBody";
        let (fm, body) = split_front_matter(input).unwrap();
        assert_eq!(fm["title"], Value::String("Hello".into()));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_no_front_matter() {
        let input = "# Just a heading\n\nText";
        let (fm, body) = split_front_matter(input).unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn test_empty_front_matter_block() {
        let (fm, body) = split_front_matter("---\n---\nBody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_dots_close_block() {
        let (fm, body) = split_front_matter("---\ntitle: A\n...\nBody").unwrap();
        assert_eq!(fm["title"], Value::String("A".into()));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unterminated_block() {
        let err = split_front_matter("---\ntitle: A\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_scalar_yaml_rejected() {
        let err = split_front_matter("---\njust a string\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotMapping));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = split_front_matter("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }
}
