//! Page/pageSize validation and the clamped pagination window.

use crate::error::ApiError;
use crate::response::Pagination;

/// Largest integer a JSON number represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Validated `page`/`pageSize` pair. Pagination is requested only when both are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Validates raw query values. Blank values count as absent.
    ///
    /// Returns `Ok(None)` when neither value is present (no pagination).
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Result<Option<Self>, ApiError> {
        let page_raw = page.filter(|s| !s.trim().is_empty());
        let size_raw = page_size.filter(|s| !s.trim().is_empty());

        let parsed_page = match page_raw {
            Some(raw) => Some(parse_safe_integer(raw).ok_or_else(|| ApiError::invalid_page(Some(raw)))?),
            None => None,
        };
        let parsed_size = match size_raw {
            Some(raw) => Some(parse_safe_integer(raw).ok_or_else(|| ApiError::invalid_page_size(Some(raw)))?),
            None => None,
        };

        match (parsed_page, parsed_size) {
            (Some(page), Some(page_size)) => Ok(Some(Self { page, page_size })),
            (None, None) => Ok(None),
            (None, Some(_)) => Err(ApiError::invalid_page(page)),
            (Some(_), None) => Err(ApiError::invalid_page_size(page_size)),
        }
    }
}

/// Accepts any numeric literal with no fractional part inside the safe range (`"2"`, `"2.0"`, `"1e2"`).
fn parse_safe_integer(raw: &str) -> Option<i64> {
    let n: f64 = raw.trim().parse().ok()?;
    if n.fract() != 0.0 || n.abs() > MAX_SAFE_INTEGER as f64 {
        return None;
    }
    Some(n as i64)
}

/// Half-open `[from_index, to_index)` slice window into the working collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub from_index: usize,
    pub to_index: usize,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        self.to_index - self.from_index
    }

    pub fn is_empty(&self) -> bool {
        self.from_index == self.to_index
    }
}

/// Computes the window for `page`/`page_size` offset by `anchor`, clamped to `len`.
///
/// Never panics: out-of-range pages clamp to the first or last item, and an empty
/// collection yields `[0, 0)`.
pub fn paginate_with_split(len: usize, page: i64, page_size: i64, anchor: i64) -> (PageWindow, Pagination) {
    let total_pages = if len == 0 || page_size <= 0 {
        0
    } else {
        len.div_ceil(page_size as usize)
    };

    let window = if len == 0 {
        PageWindow { from_index: 0, to_index: 0 }
    } else {
        let len_i = i64::try_from(len).unwrap_or(i64::MAX);
        let start = anchor.saturating_add(page.saturating_mul(page_size));
        let end = start.saturating_add(page_size);
        let from = start.max(0).min(len_i - 1);
        let to = end.max(1).min(len_i).max(from);
        PageWindow {
            from_index: from as usize,
            to_index: to as usize,
        }
    };

    let pagination = Pagination {
        page,
        page_size,
        actual_page_size: window.len(),
        total_pages,
        total_size: len,
    };
    (window, pagination)
}

/// Slices `items` to the window, returning the page and its summary.
pub fn paginate<T>(mut items: Vec<T>, page: i64, page_size: i64, anchor: i64) -> (Vec<T>, Pagination) {
    let (window, pagination) = paginate_with_split(items.len(), page, page_size, anchor);
    items.truncate(window.to_index);
    let page_items = items.split_off(window.from_index);
    (page_items, pagination)
}
