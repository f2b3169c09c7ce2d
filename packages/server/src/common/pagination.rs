//! Offset pagination for list endpoints
//!
//! List endpoints take `page` / `per_page` query parameters and answer with a
//! `Page<T>` envelope carrying the total row count.

use serde::{Deserialize, Serialize};

/// Upper bound on `per_page`
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw pagination arguments as supplied by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageArgs {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPageArgs {
    /// 1-based page number
    pub page: i64,
    /// Items per page (1-100)
    pub per_page: i64,
}

impl PageArgs {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// Apply defaults and bounds.
    pub fn validate(&self, default_per_page: i64) -> ValidatedPageArgs {
        ValidatedPageArgs {
            page: self.page.unwrap_or(1).max(1),
            per_page: self
                .per_page
                .unwrap_or(default_per_page)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl ValidatedPageArgs {
    /// Row offset, saturating for absurdly large page numbers
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub last_page: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, args: &ValidatedPageArgs) -> Self {
        let last_page = (total.saturating_add(args.per_page - 1) / args.per_page).max(1);
        Self {
            data,
            total,
            page: args.page,
            per_page: args.per_page,
            last_page,
        }
    }
}
