//! Page slicing for ordered listings.
//!
//! Pure helper shared by every listing handler. Pages are addressed with a
//! 1-based index. Out-of-range requests clamp to the last page; an index of
//! zero or below (or anything non-numeric) resolves to page 1. An empty
//! collection is a single empty page.

use serde::Serialize;

/// A bounded slice of an ordered listing plus its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based index of this page, after clamping.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Map the items of a page, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            total_pages: self.total_pages,
            total_items: self.total_items,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

/// Slice `items` into the page addressed by `requested`.
///
/// `page_size` must be at least 1.
pub fn paginate<T>(items: Vec<T>, page_size: usize, requested: usize) -> Page<T> {
    debug_assert!(page_size > 0, "page_size must be at least 1");
    let page_size = page_size.max(1);

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let number = requested.clamp(1, total_pages);

    let start = (number - 1) * page_size;
    let items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    Page {
        items,
        number,
        total_pages,
        total_items,
        has_previous: number > 1,
        has_next: number < total_pages,
    }
}

/// Resolve a raw `page` query value to a usable page index.
///
/// Absent, non-numeric, zero and negative values all resolve to 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .map(|n| n as usize)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn thirteen_items_split_ten_and_three() {
        let first = paginate(numbers(13), 10, 1);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 2);
        assert!(!first.has_previous);
        assert!(first.has_next);

        let second = paginate(numbers(13), 10, 2);
        assert_eq!(second.items, vec![10, 11, 12]);
        assert!(second.has_previous);
        assert!(!second.has_next);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let page = paginate(numbers(20), 10, 2);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next);
    }

    #[test]
    fn remainder_with_configured_page_size() {
        let page_size = 7;
        let page = paginate(numbers(20), page_size, 2);
        assert_eq!(page.items.len(), page_size);
        let last = paginate(numbers(20), page_size, 3);
        assert_eq!(last.items.len(), 20 - 2 * page_size);
    }

    #[test]
    fn out_of_range_request_clamps_to_last_page() {
        let page = paginate(numbers(13), 10, 99);
        assert_eq!(page.number, 2);
        assert_eq!(page.items, vec![10, 11, 12]);
    }

    #[test]
    fn empty_collection_is_one_empty_page() {
        let page = paginate(Vec::<usize>::new(), 10, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn zero_request_resolves_to_first_page() {
        let page = paginate(numbers(5), 10, 0);
        assert_eq!(page.number, 1);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn parse_page_defaults_and_rejects_garbage() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("2")), 2);
        assert_eq!(parse_page(Some(" 4 ")), 4);
    }

    #[test]
    fn map_preserves_metadata() {
        let page = paginate(numbers(13), 10, 2).map(|n| n * 2);
        assert_eq!(page.items, vec![20, 22, 24]);
        assert_eq!(page.number, 2);
        assert_eq!(page.total_items, 13);
    }
}
