//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        "app/routes".into()
    }

    pub fn public_prefix() -> String {
        "/routes".into()
    }

    pub fn output() -> PathBuf {
        "public/_data".into()
    }

    pub fn extension() -> String {
        "mdx".into()
    }
}

// ============================================================================
// [reading] / [search] / [related] / [listing] Section Defaults
// ============================================================================

pub mod reading {
    pub fn words_per_minute() -> u32 {
        crate::text::DEFAULT_WORDS_PER_MINUTE
    }
}

pub mod search {
    pub fn title_weight() -> f64 {
        0.6
    }

    pub fn content_weight() -> f64 {
        0.4
    }

    pub fn threshold() -> f64 {
        0.15
    }

    pub fn min_match_len() -> usize {
        3
    }
}

pub mod related {
    pub fn limit() -> usize {
        crate::index::DEFAULT_RELATED_LIMIT
    }
}

pub mod listing {
    pub fn per_page() -> usize {
        crate::index::DEFAULT_PER_PAGE
    }

    pub fn portfolio_per_page() -> usize {
        6
    }

    pub fn window() -> usize {
        crate::index::DEFAULT_WINDOW
    }
}

// ============================================================================
// [watch] Section Defaults
// ============================================================================

pub mod watch {
    pub fn debounce_ms() -> u64 {
        300
    }

    pub fn cooldown_ms() -> u64 {
        800
    }
}
