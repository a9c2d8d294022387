/// Items per page on the browse grid.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'s, T> {
    /// Requested page clamped to `1..=max(total_pages, 1)`.
    pub current_page: u32,
    pub items: &'s [T],
    /// `ceil(len / page_size)`; zero for an empty list.
    pub total_pages: u32,
}

pub fn total_pages(count: usize, page_size: usize) -> u32 {
    let pages = count.div_ceil(page_size.max(1));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    requested.clamp(1, total_pages.max(1))
}

/// Slice `items` into the page closest to `requested_page`.
///
/// A zero `page_size` is treated as one.
pub fn paginate<T>(
    items: &[T],
    requested_page: u32,
    page_size: usize,
) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = clamp_page(requested_page, total_pages);

    let start = (current_page as usize - 1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        current_page,
        items: &items[start..end],
        total_pages,
    }
}
