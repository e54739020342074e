use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One fixed-size window of a longer series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    /// `None` only when there are no pages at all.
    pub current_page: Option<usize>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            current_page: None,
        }
    }
}
