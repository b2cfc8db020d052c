use serde::Serialize;

/// Offset of the first row on `page` (1-based). Saturates at `i64::MAX`.
pub fn offset(page: i64, limit: i64) -> i64 {
    debug_assert!(page >= 1, "page must be normalized before paging, got {page}");
    (page.max(1) - 1).saturating_mul(limit)
}

/// Whether `page` can be turned into an offset without overflowing.
pub fn offset_fits(page: i64, limit: i64) -> bool {
    (page.max(1) - 1).checked_mul(limit).is_some()
}

/// Number of pages needed to show `total_rows` rows, `limit` at a time.
pub fn total_pages(total_rows: i64, limit: i64) -> i64 {
    debug_assert!(limit > 0, "limit must be normalized before paging, got {limit}");
    if total_rows <= 0 || limit <= 0 {
        return 0;
    }
    (total_rows + limit - 1) / limit
}

/// Pagination block returned next to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total_records: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(total_records: i64, page: i64, per_page: i64) -> Self {
        Self {
            total_records,
            page,
            per_page,
            total_pages: total_pages(total_records, per_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(1, 6), 1);
    }

    #[test]
    fn zero_rows_is_zero_pages() {
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn offset_from_page() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(2, 10), 10);
        assert_eq!(offset(4, 6), 18);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        assert_eq!(offset(i64::MAX, 100), i64::MAX);
        assert!(!offset_fits(100_000_000_000_000_000, 100));
        assert!(offset_fits(1_000, 100));
    }

    #[test]
    fn pagination_block() {
        let p = Pagination::new(25, 2, 10);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.page, 2);
        assert_eq!(p.per_page, 10);
    }
}
