//! Paging window and sort direction for list endpoints.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u32 = 25;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    Desc,
    Asc,
}

/// Which slice of a list to return. Query keys are `per-page` and `page`.
///
/// Out-of-range values are not rejected; [`PageRequest::clamped`] pulls them back into
/// `1..=MAX_PER_PAGE` and `page >= 1`, and the SQL helpers always clamp first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "PageRequest::default_per_page", rename = "per-page")]
    pub per_page: u32,
    #[serde(default = "PageRequest::first_page")]
    pub page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: Self::default_per_page(),
            page: Self::first_page(),
        }
    }
}

impl PageRequest {
    fn default_per_page() -> u32 {
        DEFAULT_PER_PAGE
    }

    fn first_page() -> u32 {
        1
    }

    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
            page: self.page.max(1),
        }
    }

    /// `OFFSET` for this page.
    pub fn offset(self) -> u64 {
        let window = self.clamped();
        u64::from(window.page - 1) * u64::from(window.per_page)
    }

    /// `LIMIT` for this page.
    pub fn limit(self) -> u64 {
        u64::from(self.clamped().per_page)
    }
}
