use std::str::FromStr;

use crate::error::DomainError;

/// Page size used when the caller asks for zero items.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Upper bound on a single page.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Largest offset a `BIGINT` accepts; windows past it are simply empty.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Offset pagination window, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    /// Build a window from raw request values, normalizing zeroes to the
    /// first page and the default page size.
    pub fn new(page: u64, limit: u64) -> Self {
        let limit = match limit {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        };

        Self {
            page: page.max(1),
            limit,
        }
    }

    /// Number of rows to skip: `(page - 1) * limit`, saturating.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(MAX_OFFSET)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One window of a larger result set plus the size of the whole filtered set.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}

/// Creation-time ordering for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse an optional directive; an empty string keeps the default.
    pub fn parse_directive(raw: &str) -> Result<Self, DomainError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        raw.parse()
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DomainError::Validation(format!(
                "sort_by_date must be 'asc' or 'desc', got '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based_window_start() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        assert_eq!(Pagination::new(u64::MAX, 100).offset(), i64::MAX as u64);
        assert_eq!(Pagination::new(u64::MAX / 10, 100).offset(), i64::MAX as u64);
    }

    #[test]
    fn zero_values_fall_back_to_defaults() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(Pagination::new(1, 10_000).limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn sort_directive_parsing() {
        assert_eq!(SortOrder::parse_directive("").unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::parse_directive("ASC").unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::parse_directive(" desc ").unwrap(), SortOrder::Desc);
        assert!(matches!(
            SortOrder::parse_directive("sideways"),
            Err(DomainError::Validation(_))
        ));
    }
}
