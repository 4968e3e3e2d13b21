//! Pagination window computation and page fetching.
//!
//! [`make_pagination_range`] picks the contiguous run of page numbers shown
//! as navigation links around the current page. [`make_pagination`] loads a
//! page from a [`PagedCollection`] and pairs it with that window.

mod paginator;

pub use paginator::{Page, PageError, PageMeta, PagedCollection, Paginator};

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Default number of page links shown around the current page.
pub const DEFAULT_QTY_PAGES: i64 = 4;

/// Navigation window over a page range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationRange {
    /// Page numbers to render as links, a contiguous slice of `page_range`.
    pub pagination: Vec<i64>,
    /// Every valid page number.
    pub page_range: Vec<i64>,
    /// Requested window width.
    pub qty_pages: i64,
    pub current_page: i64,
    pub total_pages: i64,
    /// Half-open slice bounds into `page_range`.
    pub start_range: i64,
    pub stop_range: i64,
    /// The window does not start at the first page.
    pub first_page_out_of_range: bool,
    /// The window stops before the last page.
    pub last_page_out_of_range: bool,
}

/// Compute the navigation window for `current_page`.
///
/// The window is roughly centered on the current page. Near the start it
/// grows to the right; near the end it is pulled back to the left. When
/// there are fewer pages than `qty_pages` the whole range is returned.
///
/// Total over all inputs: out-of-range pages, empty ranges and non-positive
/// widths produce a (possibly empty) window instead of an error.
pub fn make_pagination_range(
    page_range: &[i64],
    qty_pages: i64,
    current_page: i64,
) -> PaginationRange {
    let width = qty_pages.max(0);
    let middle_range = width / 2 + width % 2;
    let total_pages = page_range.len() as i64;

    let mut start_range = current_page.saturating_sub(middle_range);
    let mut stop_range = start_range.saturating_add(width);

    if start_range < 0 {
        // Shift right by the overshoot so the window keeps its width.
        stop_range = stop_range.saturating_sub(start_range);
        start_range = 0;
    }

    if stop_range >= total_pages {
        start_range = start_range.saturating_sub(stop_range - total_pages);
    }
    start_range = start_range.max(0);

    let pagination = slice_clamped(page_range, start_range, stop_range).to_vec();

    PaginationRange {
        pagination,
        page_range: page_range.to_vec(),
        qty_pages,
        current_page,
        total_pages,
        start_range,
        stop_range,
        first_page_out_of_range: start_range > 0,
        last_page_out_of_range: stop_range < total_pages,
    }
}

/// Slice with bounds truncated to the sequence; an inverted range is empty.
fn slice_clamped(items: &[i64], start: i64, stop: i64) -> &[i64] {
    let len = items.len() as i64;
    let start = start.clamp(0, len) as usize;
    let stop = stop.clamp(0, len) as usize;
    if start >= stop {
        &[]
    } else {
        &items[start..stop]
    }
}

/// Fetch page `page_number` from `collection` together with its navigation window.
///
/// Returns `AppError::NotFound` when the page does not exist. Other
/// collection failures are passed through untouched.
pub async fn make_pagination<C>(
    collection: &C,
    page_number: i64,
    qty_pages: i64,
) -> AppResult<(Page<C::Item>, PaginationRange)>
where
    C: PagedCollection + ?Sized,
{
    let page = collection.page(page_number).await?;
    let page_range = collection.page_range().await?;
    let pagination = make_pagination_range(&page_range, qty_pages, page_number);

    Ok((page, pagination))
}
