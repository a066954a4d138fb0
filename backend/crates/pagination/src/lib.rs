//! Page/limit pagination primitives shared by repositories and HTTP envelopes.
//!
//! A [`PageRequest`] captures the caller's `page`/`limit` query parameters with
//! the defaults the listing endpoints document (page 1, limit 50) and converts
//! them into SQL-friendly offsets. [`Paginated`] is the response envelope:
//! items plus a [`PageInfo`] block carrying the total row count and the
//! computed page count.

use serde::{Deserialize, Serialize};

/// Default page size applied when the caller omits `limit`.
pub const DEFAULT_LIMIT: u32 = 50;

/// Upper bound on `limit` so a single request cannot drain a large table.
pub const MAX_LIMIT: u32 = 500;

/// Validation failures raised while interpreting pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `page` was zero; pages are numbered from 1.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// `limit` was zero; an empty page is never useful.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// A validated page/limit pair.
///
/// ## Invariants
/// - `page >= 1` and `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from raw query parameters, applying the documented
    /// defaults for absent values and clamping `limit` to [`MAX_LIMIT`].
    pub fn from_params(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageRequestError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self {
            page,
            limit: limit.min(MAX_LIMIT),
        })
    }

    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Row offset of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Pagination block returned alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based page number that was served.
    pub page: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total number of matching rows across all pages.
    pub total: u64,
    /// Total number of pages: `ceil(total / limit)`.
    pub pages: u64,
}

impl PageInfo {
    /// Derive the envelope block for a served page.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        let limit = u64::from(request.limit());
        Self {
            page: request.page(),
            limit: request.limit(),
            total,
            pages: total.div_ceil(limit),
        }
    }
}

/// A page of items plus its pagination block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// The served items, at most `pagination.limit` of them.
    pub data: Vec<T>,
    /// Envelope metadata.
    pub pagination: PageInfo,
}

impl<T> Paginated<T> {
    /// Assemble the envelope from a served page and the total match count.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            pagination: PageInfo::new(request, total),
        }
    }

    /// Map the item type while keeping the pagination block.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
