use crate::feed::parser::FeedEntry;

/// Entries shown per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a larger listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this page (may be empty when `page` is past the end)
    pub items: &'a [T],
    /// 1-based page number that was requested
    pub page: usize,
    /// Number of pages needed to show every item; never less than 1
    pub total_pages: usize,
    /// Number of items across all pages
    pub total: usize,
}

impl<T> Page<'_, T> {
    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Sorts entries newest first.
///
/// Entries without a publish time sort after every dated entry. The sort is
/// stable, so ties keep their incoming order.
pub fn sort_by_published(entries: &mut [FeedEntry]) {
    // `None < Some(_)`, so comparing b to a puts undated entries last.
    entries.sort_by(|a, b| b.published.cmp(&a.published));
}

/// Slices out page `page` (1-based) of `items`.
///
/// Page numbers below 1 are treated as 1, and a zero `page_size` falls back
/// to [`DEFAULT_PAGE_SIZE`]. `total_pages` is `ceil(total / page_size)` with
/// a floor of 1, so an empty listing still reports one (empty) page.
///
/// # Examples
///
/// ```
/// use newsbrief::feed::paginate;
///
/// let items: Vec<u32> = (0..25).collect();
/// let page = paginate(&items, 3, 10);
/// assert_eq!(page.items, &items[20..25]);
/// assert_eq!(page.total_pages, 3);
/// ```
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page = page.max(1);
    let page_size = if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };
    let total = items.len();
    let total_pages = total.div_ceil(page_size).max(1);

    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    Page {
        items: &items[start..end],
        page,
        total_pages,
        total,
    }
}

/// Case-insensitive substring search over entry titles.
///
/// A blank query matches nothing. Matches keep their order in `entries`.
pub fn search<'a>(entries: &'a [FeedEntry], query: &str) -> Vec<&'a FeedEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|e| e.title.to_lowercase().contains(&needle))
        .collect()
}
