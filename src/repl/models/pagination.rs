//! # Pagination Model
//!
//! Page position and the server-reported total for the movie list.

/// Current page position and the last total reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    page: u32,
    page_size: u32,
    total: u64,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Total from the most recent applied fetch
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Zero-based record offset of the current page
    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.page_size
    }

    /// Whether records exist past the current page
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Jump to a page, clamped to 1
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Move forward one page; returns false when nothing lies beyond
    pub fn advance(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Move back one page; returns false at page 1
    pub fn retreat(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}
