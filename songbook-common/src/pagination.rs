//! Pagination utilities
//!
//! Metadata is derived from the total size of the filtered set and the
//! (already clamped) page request. Nothing here touches storage.

use serde::{Deserialize, Serialize};

/// Upper bound for any page size
pub const MAX_PAGE_LIMIT: i64 = 10;

/// Default page size for song listings
pub const DEFAULT_SONG_LIMIT: i64 = 10;

/// Default page size for lyric listings (one couplet per page)
pub const DEFAULT_LYRICS_LIMIT: i64 = 1;

/// Pagination metadata returned alongside every paginated body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMetadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

/// Calculate pagination metadata from total records and the requested page
///
/// `page` and `page_size` are echoed back unchanged; clamping them is the
/// caller's job (see [`PageRequest`]). A `page_size` below 1 is treated as 1
/// when computing `last_page`.
///
/// # Examples
/// ```
/// use songbook_common::pagination::calculate_metadata;
///
/// let m = calculate_metadata(23, 1, 10);
/// assert_eq!(m.last_page, 3);
/// assert_eq!(m.total_records, 23);
///
/// // Empty result sets still report a single page
/// let m = calculate_metadata(0, 4, 10);
/// assert_eq!(m.current_page, 4);
/// assert_eq!(m.last_page, 1);
/// ```
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> PaginationMetadata {
    if total_records <= 0 {
        return PaginationMetadata {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: 1,
            total_records: 0,
        };
    }

    PaginationMetadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records - 1) / page_size.max(1) + 1,
        total_records,
    }
}

/// Clamp a requested page number to 1 or above
pub fn clamp_page(page: i64) -> i64 {
    page.max(1)
}

/// Clamp a requested page size into `[1, MAX_PAGE_LIMIT]`
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_PAGE_LIMIT)
}

/// A page request whose bounds have already been sanitized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Build a page request, clamping both values into their valid ranges
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit),
        }
    }

    /// Row offset for SQL LIMIT/OFFSET
    ///
    /// Saturates at `i64::MAX` for huge page numbers, which selects no rows.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Metadata for this request given the size of the filtered set
    pub fn metadata(&self, total_records: i64) -> PaginationMetadata {
        calculate_metadata(total_records, self.page, self.limit)
    }
}
