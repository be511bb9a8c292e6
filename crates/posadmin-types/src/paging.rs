//! Page math shared by the remote and in-memory list sources.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A zero-based page index with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidInput("page size must be at least 1".into()));
        }
        Ok(Self { page, page_size })
    }

    /// Index of the first record on this page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }
}

/// One page of records plus the number of records matching the filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }
}

impl<T: Clone> Page<T> {
    /// Cut the requested page out of a fully loaded collection.
    ///
    /// A page past the end yields an empty slice with the real total.
    pub fn slice(items: &[T], request: PageRequest) -> Self {
        let start = request.offset().min(items.len());
        let end = start.saturating_add(request.page_size).min(items.len());
        Self {
            rows: items[start..end].to_vec(),
            total: items.len(),
        }
    }
}

/// Paged reply from the backend.
///
/// Endpoints disagree on field names: list endpoints send `data`/`total`,
/// Spring-style endpoints send `content`/`totalElements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(alias = "content")]
    pub data: Vec<T>,
    #[serde(alias = "totalElements")]
    pub total: u64,
}

impl<T> From<PagedResponse<T>> for Page<T> {
    fn from(response: PagedResponse<T>) -> Self {
        Page {
            rows: response.data,
            total: usize::try_from(response.total).unwrap_or(usize::MAX),
        }
    }
}

/// Number of pages needed to show `total` records; zero when empty.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Clamp a page index into `[0, page_count - 1]`, or 0 when there are no records.
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    let last = page_count(total, page_size).saturating_sub(1);
    page.min(last)
}
