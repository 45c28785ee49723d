//! Client-side pagination over already-loaded lists.
//!
//! The console pages filtered datasets in memory; the backend is not
//! consulted for page flips. `PageInfo` mirrors what the tables render:
//! a range label and a windowed list of page buttons.

use serde::{Deserialize, Serialize};

/// Page state of a paged table. Pages are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageInfo {
    /// Compute page state for a dataset of `total_elements`.
    pub fn compute(total_elements: usize, page: usize, size: usize) -> Self {
        let size = size.max(1);
        let total_pages = total_elements.div_ceil(size);
        Self {
            page,
            size,
            total_elements,
            total_pages,
            has_next: page + 1 < total_pages,
            has_previous: page > 0 && total_pages > 0,
        }
    }

    /// Range label rendered under the table: `"Showing X to Y of E"`.
    pub fn range_label(&self) -> String {
        if self.total_elements == 0 {
            return "Showing 0 to 0 of 0".to_string();
        }
        let from = self.page * self.size + 1;
        let to = ((self.page + 1) * self.size).min(self.total_elements);
        format!("Showing {} to {} of {}", from, to, self.total_elements)
    }

    /// Windowed list of 1-based page numbers for the pager buttons.
    /// A single page (or none) renders no pager at all.
    pub fn window(&self, width: usize) -> Vec<usize> {
        if self.total_pages <= 1 || width == 0 {
            return Vec::new();
        }
        let half = width / 2;
        let mut start = self.page.saturating_sub(half);
        let end = (start + width).min(self.total_pages);
        start = end.saturating_sub(width);
        (start..end).map(|p| p + 1).collect()
    }
}

/// Slice one page out of an in-memory dataset.
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
    let size = size.max(1);
    let start = page.saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + size).min(items.len());
    &items[start..end]
}
