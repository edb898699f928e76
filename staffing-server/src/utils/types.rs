//! Shared Types
//!
//! Query parameter types used across handlers

use serde::Deserialize;

/// Upper bound for `limit`
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    /// Build from raw query values, clamping to sane bounds
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or_else(default_page),
            limit: limit.unwrap_or_else(default_limit),
        }
        .normalized()
    }

    /// Page >= 1, 1 <= limit <= MAX_PAGE_SIZE
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of records to skip; saturates instead of overflowing on huge pages
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1).saturating_mul(u64::from(self.limit))
    }

    /// Number of records to return
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = PaginationParams::new(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_clamping() {
        let p = PaginationParams::new(Some(0), Some(1000));
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, MAX_PAGE_SIZE);

        let p = PaginationParams::new(Some(3), Some(0));
        assert_eq!(p.limit, 1);
        assert_eq!(p.offset(), 2);
    }

    #[test]
    fn test_offset_does_not_overflow() {
        let p = PaginationParams::new(Some(u32::MAX), Some(MAX_PAGE_SIZE));
        assert_eq!(p.offset(), u64::from(u32::MAX - 1) * u64::from(MAX_PAGE_SIZE));
    }
}
