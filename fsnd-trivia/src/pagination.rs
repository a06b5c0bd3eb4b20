//! Pagination utilities for the trivia API
//!
//! Pages are 1-indexed and hold [`QUESTIONS_PER_PAGE`] questions.

/// Page size constant for all question listings
pub const QUESTIONS_PER_PAGE: i64 = 10;

/// LIMIT/OFFSET window of one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Page number (1-indexed)
    pub page: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
    /// Row limit for SQL LIMIT/OFFSET query
    pub limit: i64,
}

impl PageWindow {
    /// The items of this page, for results already held in memory
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

/// Calculate the window for `requested_page` over `total_results` rows
///
/// Returns `None` when the page is out of range: below 1, or past the last
/// page. Page 1 always exists, even for an empty result set.
///
/// # Examples
/// ```
/// use fsnd_trivia::pagination::page_window;
///
/// // 25 results = 3 pages (10 + 10 + 5)
/// let w = page_window(3, 25).unwrap();
/// assert_eq!(w.offset, 20);
///
/// assert!(page_window(4, 25).is_none());
/// assert!(page_window(1, 0).is_some());
/// ```
pub fn page_window(requested_page: i64, total_results: i64) -> Option<PageWindow> {
    if requested_page < 1 {
        return None;
    }

    let offset = (requested_page - 1) * QUESTIONS_PER_PAGE;
    if requested_page > 1 && offset >= total_results {
        return None;
    }

    Some(PageWindow {
        page: requested_page,
        offset,
        limit: QUESTIONS_PER_PAGE,
    })
}

/// Parse a `?page=` value, falling back to page 1 when absent or not a number
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse().ok()).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let w = page_window(1, 25).unwrap();
        assert_eq!(w.page, 1);
        assert_eq!(w.offset, 0);
        assert_eq!(w.limit, 10);
    }

    #[test]
    fn test_last_partial_page() {
        let w = page_window(3, 25).unwrap();
        assert_eq!(w.offset, 20);
    }

    #[test]
    fn test_out_of_bounds_high() {
        assert!(page_window(4, 25).is_none());
        assert!(page_window(33, 19).is_none());
    }

    #[test]
    fn test_exact_page_boundary() {
        assert!(page_window(2, 20).is_some());
        assert!(page_window(3, 20).is_none());
    }

    #[test]
    fn test_out_of_bounds_low() {
        assert!(page_window(0, 25).is_none());
        assert!(page_window(-1, 25).is_none());
    }

    #[test]
    fn test_empty_result_set_has_first_page() {
        let w = page_window(1, 0).unwrap();
        assert_eq!(w.offset, 0);
        assert!(page_window(2, 0).is_none());
    }

    #[test]
    fn test_slice_takes_one_page() {
        let items: Vec<i64> = (1..=25).collect();
        assert_eq!(page_window(3, 25).unwrap().slice(items.clone()), vec![21, 22, 23, 24, 25]);
        assert_eq!(page_window(2, 25).unwrap().slice(items).len(), 10);
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some("abc")), 1);
    }
}
