//! Pagination arithmetic: pure functions from a filtered list, a page
//! size and a requested page to the visible slice plus navigation
//! metadata. No state, no side effects.

/// Upper bound on the page-number buttons a UI shows at once.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// One page of a filtered list, with everything a list view needs to
/// render its pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a, T> {
    /// The records visible on the current page.
    pub items: &'a [T],
    /// The clamped 1-based page actually shown.
    pub current_page: usize,
    /// Total number of pages; 0 when the list is empty.
    pub total_pages: usize,
    /// Total records across all pages.
    pub total_items: usize,
    /// The (clamped) page size the slice was cut with.
    pub per_page: usize,
    /// Window of at most [`MAX_VISIBLE_PAGES`] page numbers centered on
    /// the current page, clipped to `[1, total_pages]`.
    pub visible_pages: Vec<usize>,
}

impl<T> PageView<'_, T> {
    /// 1-based "showing X-Y of N" bounds; `(0, 0)` for an empty list.
    pub fn display_range(&self) -> (usize, usize) {
        if self.total_items == 0 {
            return (0, 0);
        }
        let start = (self.current_page - 1) * self.per_page + 1;
        let end = start + self.items.len() - 1;
        (start, end)
    }
}

/// Slice out the requested page of `items`.
///
/// `per_page` is clamped to at least 1, the requested page to
/// `[1, total_pages]` (page 1 when the list is empty).
pub fn paginate<T>(items: &[T], per_page: usize, requested_page: usize) -> PageView<'_, T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let current_page = requested_page.clamp(1, total_pages.max(1));

    let start = (current_page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let slice = if start < total_items {
        &items[start..end]
    } else {
        &items[0..0]
    };

    PageView {
        items: slice,
        current_page,
        total_pages,
        total_items,
        per_page,
        visible_pages: visible_pages(current_page, total_pages),
    }
}

/// The window of page numbers to offer as direct navigation targets.
pub fn visible_pages(current_page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).collect();
    }
    let start = current_page.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    (start..=end).collect()
}
