//! Reading-time estimates.

/// Average reading speed used when none is configured.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimated minutes to read already-normalized text. Never less than 1.
pub fn reading_time(normalized: &str, words_per_minute: u32) -> u32 {
    let words = normalized.split_whitespace().count();
    let wpm = words_per_minute.max(1);
    let minutes = (words as f64 / f64::from(wpm)).round() as u32;
    minutes.max(1)
}

/// Display form, e.g. `"4 min read"`.
pub fn format_reading_time(minutes: u32) -> String {
    format!("{minutes} min read")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_minimum_one_minute() {
        assert_eq!(reading_time("", 200), 1);
        assert_eq!(reading_time("one two three", 200), 1);
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(reading_time(&words(299), 200), 1);
        assert_eq!(reading_time(&words(300), 200), 2);
        assert_eq!(reading_time(&words(1000), 200), 5);
    }

    #[test]
    fn test_custom_speed() {
        assert_eq!(reading_time(&words(1000), 100), 10);
        assert_eq!(reading_time(&words(10), 0), 10);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_reading_time(1), "1 min read");
        assert_eq!(format_reading_time(12), "12 min read");
    }
}
