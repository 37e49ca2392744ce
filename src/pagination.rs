use serde::Serialize;

/// Number of customers requested per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Pages shown on either side of the current one.
const WINDOW_RADIUS: usize = 2;

/// Returns the page numbers rendered as direct links around `current_page`.
///
/// The window spans `max(1, page - 2)..=min(total_pages, page + 2)`, so it
/// holds at most five pages and is truncated at both ends.
pub fn pagination_window(current_page: usize, total_pages: usize) -> Vec<usize> {
    let start = current_page.saturating_sub(WINDOW_RADIUS).max(1);
    let end = current_page.saturating_add(WINDOW_RADIUS).min(total_pages);

    (start..=end).collect()
}

/// Previous/next targets and the numbered window for one page.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PaginationControls {
    /// Controls are only rendered for multi-page listings.
    pub visible: bool,
    pub page: usize,
    pub pages: Vec<usize>,
    pub previous: usize,
    pub next: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationControls {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let current_page = current_page.max(1);

        Self {
            visible: total_pages > 1,
            page: current_page,
            pages: pagination_window(current_page, total_pages),
            previous: previous_page(current_page),
            next: next_page(current_page, total_pages),
            has_previous: current_page != 1,
            has_next: current_page != total_pages,
        }
    }
}

/// Target of the "previous" control.
pub fn previous_page(current_page: usize) -> usize {
    current_page.saturating_sub(1).max(1)
}

/// Target of the "next" control; never below the first page.
pub fn next_page(current_page: usize, total_pages: usize) -> usize {
    current_page.saturating_add(1).min(total_pages).max(1)
}
