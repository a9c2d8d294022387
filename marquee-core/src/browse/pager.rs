use serde::Serialize;

/// Number of consecutive page links shown around the current page.
pub const DEFAULT_WINDOW: u32 = 5;

/// One control in a pager strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PagerItem {
    Previous { page: u32 },
    Page { number: u32, current: bool },
    Gap,
    Next { page: u32 },
}

/// Pager controls for `current` of `total` pages.
///
/// A window of at most `max_shown` pages starts `max_shown / 2` pages before
/// `current` and is clipped at the last page, so near the end fewer pages are
/// shown. The first and last pages are always reachable, with a gap marker
/// when they are not adjacent to the window.
/// One page or none yields no controls.
pub fn page_window(current: u32, total: u32, max_shown: u32) -> Vec<PagerItem> {
    if total <= 1 {
        return Vec::new();
    }
    let max_shown = max_shown.max(1);
    let current = current.clamp(1, total);

    let start = current.saturating_sub(max_shown / 2).max(1);
    let end = start.saturating_add(max_shown - 1).min(total);

    let mut items = Vec::new();
    if current > 1 {
        items.push(PagerItem::Previous { page: current - 1 });
    }
    if start > 1 {
        items.push(page(1, current));
        if start > 2 {
            items.push(PagerItem::Gap);
        }
    }
    items.extend((start..=end).map(|n| page(n, current)));
    if end < total {
        if end < total - 1 {
            items.push(PagerItem::Gap);
        }
        items.push(page(total, current));
    }
    if current < total {
        items.push(PagerItem::Next { page: current + 1 });
    }
    items
}

fn page(number: u32, current: u32) -> PagerItem {
    PagerItem::Page {
        number,
        current: number == current,
    }
}
