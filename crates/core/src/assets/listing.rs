//! Paginated, sorted, filtered asset listing.
//!
//! Pure functions over records already loaded from the content store. The
//! store returns records in insertion order, which is what breaks sort ties.

use std::cmp::Ordering;

use super::content::AssetRecord;
use super::filter::{AssetCategories, TypeFilter};

/// Default number of assets per page.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Field the listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateAdded,
    DisplayName,
}

impl SortKey {
    /// Parse a `sort` query value. Unknown or missing values sort by date.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("display_name") => SortKey::DisplayName,
            _ => SortKey::DateAdded,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateAdded => "date_added",
            SortKey::DisplayName => "display_name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a `direction` query value. Anything but `asc` is descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.trim().eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

/// A fully resolved listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQuery {
    pub page: i64,
    pub page_size: i64,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub filter: TypeFilter,
}

impl Default for AssetQuery {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortKey::default(),
            direction: SortDirection::default(),
            filter: TypeFilter::All,
        }
    }
}

/// Position of the returned slice within the filtered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub start: usize,
    pub len: usize,
}

/// Clamp `page` into the valid range and compute the slice bounds.
///
/// A `page_size` below 1 is treated as 1. With no items the window is the
/// empty first page.
pub fn page_window(page: i64, page_size: i64, total: usize) -> PageWindow {
    let page_size = usize::try_from(page_size.max(1)).unwrap_or(usize::MAX);
    let last_page = if total == 0 { 0 } else { (total - 1) / page_size };
    let requested = usize::try_from(page.max(0)).unwrap_or(usize::MAX);
    let page = requested.min(last_page);
    let start = page * page_size;
    let len = page_size.min(total.saturating_sub(start));

    PageWindow {
        page,
        page_size,
        start,
        len,
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPage {
    pub items: Vec<AssetRecord>,
    pub page: usize,
    pub page_size: usize,
    pub start: usize,
    pub total_count: usize,
}

impl AssetPage {
    /// Index one past the last returned item.
    pub fn end(&self) -> usize {
        self.start + self.items.len()
    }
}

/// Filter, sort, and paginate `records`.
pub fn list_assets(
    mut records: Vec<AssetRecord>,
    query: &AssetQuery,
    categories: &AssetCategories,
) -> AssetPage {
    records.retain(|r| query.filter.matches(categories, &r.display_name));
    sort_records(&mut records, query.sort, query.direction);

    let total_count = records.len();
    let window = page_window(query.page, query.page_size, total_count);
    let items = records
        .into_iter()
        .skip(window.start)
        .take(window.len)
        .collect();

    AssetPage {
        items,
        page: window.page,
        page_size: window.page_size,
        start: window.start,
        total_count,
    }
}

/// Stable sort; equal keys keep their incoming order in both directions.
fn sort_records(records: &mut [AssetRecord], key: SortKey, direction: SortDirection) {
    let compare = |a: &AssetRecord, b: &AssetRecord| -> Ordering {
        match key {
            SortKey::DateAdded => a.upload_date.cmp(&b.upload_date),
            SortKey::DisplayName => a.display_name.cmp(&b.display_name),
        }
    };
    match direction {
        SortDirection::Asc => records.sort_by(compare),
        SortDirection::Desc => records.sort_by(|a, b| compare(b, a)),
    }
}
