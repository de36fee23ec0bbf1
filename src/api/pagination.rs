use serde::Serialize;

use crate::config;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self { total, page, limit, total_pages }
    }
}

/// Paginated list envelope: `{ "data": [...], "meta": {...} }`
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Resolved page window. `page`/`limit` below 1 are rejected; a limit above
/// the configured cap is clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn resolve(page: Option<i64>, limit: Option<i64>) -> Result<Self, ApiError> {
        let api = &config::config().api;
        Self::resolve_with(page, limit, api.default_page_size, api.max_page_size)
    }

    fn resolve_with(
        page: Option<i64>,
        limit: Option<i64>,
        default_limit: i64,
        max_limit: i64,
    ) -> Result<Self, ApiError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::bad_request("page must be at least 1"));
        }

        let limit = limit.unwrap_or(default_limit);
        if limit < 1 {
            return Err(ApiError::bad_request("limit must be at least 1"));
        }

        Ok(Self { page, limit: limit.min(max_limit) })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}
