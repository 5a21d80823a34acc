//! Approximate substring matching.
//!
//! Computes the smallest edit distance between a pattern and any substring
//! of a text (Sellers' variant of Levenshtein), so where the match sits in
//! the text never matters.

/// Fewest edits needed to find `pattern` somewhere in `text`.
///
/// Returns `None` when every alignment needs more than `max_errors` edits.
/// An empty pattern matches everywhere with zero edits.
pub fn best_match(pattern: &[char], text: &[char], max_errors: usize) -> Option<usize> {
    let m = pattern.len();
    if m == 0 {
        return Some(0);
    }

    // column[i]: edits to align pattern[..i] ending at the current text char.
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = column[m];

    for &t in text {
        let mut diagonal = column[0];
        for i in 1..=m {
            let substitute = diagonal + usize::from(pattern[i - 1] != t);
            let insert = column[i] + 1;
            let delete = column[i - 1] + 1;
            diagonal = column[i];
            column[i] = substitute.min(insert).min(delete);
        }
        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }

    (best <= max_errors).then_some(best)
}
