//! Paginated listings.

use serde::Serialize;

/// Entries per listing page when none is configured.
pub const DEFAULT_PER_PAGE: usize = 5;
/// Page links shown around the current page.
pub const DEFAULT_WINDOW: usize = 5;

/// One page of a listing. Page numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub visible_pages: Vec<usize>,
}

impl<T> Page<'_, T> {
    /// Whether the requested page lies past the last one.
    pub const fn is_out_of_range(&self) -> bool {
        self.current > self.total_pages && self.total_pages > 0
    }
}

/// Slice `items` into page `page` of `per_page` entries.
///
/// Pages below 1 clamp to 1. A page past the end yields no items but keeps
/// the totals, leaving the not-found decision to the caller.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize, window: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let current = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (current - 1).saturating_mul(per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);

    Page {
        items: &items[start..end],
        current,
        total_pages,
        total_items,
        has_prev: current > 1,
        has_next: current < total_pages,
        visible_pages: visible_pages(current, total_pages, window),
    }
}

/// Window of page numbers centered on `current`, shifted at either end.
///
/// With 10 pages and a window of 5: page 1 -> `1..=5`, page 6 -> `4..=8`,
/// page 10 -> `6..=10`.
pub fn visible_pages(current: usize, total_pages: usize, window: usize) -> Vec<usize> {
    let window = window.max(1);
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= window {
        return (1..=total_pages).collect();
    }

    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(window / 2).max(1);
    let end = (start + window - 1).min(total_pages);
    if end - start + 1 < window {
        start = (end + 1).saturating_sub(window).max(1);
    }
    (start..=end).collect()
}
