use serde::{Deserialize, Serialize};

/// Page selection and free-text search for listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    /// One-based page number.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
    /// Optional search term; blank terms are not sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PageQuery {
    /// Creates the first page with the given size.
    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            search: None,
        }
    }

    /// Selects a page, clamped to at least one.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the search term, dropping blank input.
    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|term| term.trim().to_owned())
            .filter(|term| !term.is_empty());
        self
    }
}

/// Pagination block returned next to listing data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// One-based page number.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
    /// Total matching rows.
    pub total: u64,
    /// Total pages.
    pub total_pages: u32,
    /// Whether later pages exist.
    pub has_more: bool,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Rows of this page.
    pub items: Vec<T>,
    /// Pagination block, when the endpoint reports one.
    pub info: Option<PageInfo>,
}

impl<T> Page<T> {
    /// Returns whether a following page exists.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.info.is_some_and(|info| info.has_more)
    }
}
