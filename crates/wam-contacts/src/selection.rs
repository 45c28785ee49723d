//! Bounded recipient selection.
//!
//! Selection is capped and insertion-ordered. The two bulk operations
//! are deliberately asymmetric: "select page" adds the visible rows on
//! top of the current selection, "select all" replaces the selection
//! with the head of the entire filtered set.

use wam_core::{WamError, WamResult};

/// Hard ceiling on campaign recipients. Matches the WhatsApp broadcast
/// list limit.
pub const DEFAULT_MAX_SELECTIONS: usize = 256;

/// Recipient picker with a hard cap.
#[derive(Debug, Clone)]
pub struct ContactSelection {
    max_selections: usize,
    selected: Vec<String>,
}

impl Default for ContactSelection {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SELECTIONS)
    }
}

impl ContactSelection {
    pub fn new(max_selections: usize) -> Self {
        Self {
            max_selections: max_selections.max(1),
            selected: Vec::new(),
        }
    }

    pub fn max_selections(&self) -> usize {
        self.max_selections
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.max_selections
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    /// Toggle a single row. Returns whether the id is selected after the
    /// call. Adding past the cap fails and leaves the selection unchanged.
    pub fn toggle(&mut self, id: &str) -> WamResult<bool> {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            return Ok(false);
        }
        if self.is_full() {
            return Err(WamError::selection_limit(self.max_selections));
        }
        self.selected.push(id.to_string());
        Ok(true)
    }

    /// Add the not-yet-selected rows of the current page, up to the
    /// remaining quota. Returns how many rows were added.
    pub fn select_page(&mut self, page_ids: &[String]) -> usize {
        let mut added = 0;
        for id in page_ids {
            if self.is_full() {
                break;
            }
            if !self.contains(id) {
                self.selected.push(id.clone());
                added += 1;
            }
        }
        added
    }

    /// Remove every row of the current page from the selection.
    pub fn deselect_page(&mut self, page_ids: &[String]) {
        self.selected.retain(|s| !page_ids.iter().any(|id| id == s));
    }

    /// Replace the selection with the head of the entire filtered set,
    /// capped at the limit. Returns the new selection size.
    pub fn select_all_visible(&mut self, filtered_ids: &[String]) -> usize {
        self.selected = filtered_ids
            .iter()
            .take(self.max_selections)
            .cloned()
            .collect();
        self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wam_core::WamErrorCode;

    fn ids(range: std::ops::Range<u32>) -> Vec<String> {
        range.map(|i| format!("c{}", i)).collect()
    }

    #[test]
    fn test_toggle_add_remove() {
        let mut sel = ContactSelection::new(10);
        assert!(sel.toggle("c1").unwrap());
        assert!(sel.contains("c1"));
        assert!(!sel.toggle("c1").unwrap());
        assert!(sel.is_empty());
    }

    #[test]
    fn test_toggle_past_cap_leaves_selection_unchanged() {
        let mut sel = ContactSelection::new(2);
        sel.toggle("c1").unwrap();
        sel.toggle("c2").unwrap();

        let err = sel.toggle("c3").unwrap_err();
        assert_eq!(err.code, WamErrorCode::SelectionLimit);
        assert_eq!(sel.ids(), &["c1".to_string(), "c2".to_string()]);

        // removal still allowed at the cap
        assert!(!sel.toggle("c1").unwrap());
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_select_page_adds_only_unselected_up_to_quota() {
        let mut sel = ContactSelection::new(5);
        sel.toggle("c0").unwrap();
        sel.toggle("c1").unwrap();

        // page holds c0..c6; only 3 slots remain
        let added = sel.select_page(&ids(0..7));
        assert_eq!(added, 3);
        assert_eq!(sel.len(), 5);
        assert_eq!(sel.ids()[0], "c0");
        assert_eq!(sel.ids()[4], "c4");
    }

    #[test]
    fn test_select_all_visible_replaces_with_filtered_head() {
        let mut sel = ContactSelection::new(5);
        sel.toggle("zz").unwrap();

        let count = sel.select_all_visible(&ids(0..20));
        assert_eq!(count, 5);
        assert!(!sel.contains("zz"));
        assert_eq!(sel.ids(), &ids(0..5)[..]);
    }

    #[test]
    fn test_select_all_visible_under_cap_takes_everything() {
        let mut sel = ContactSelection::new(100);
        let count = sel.select_all_visible(&ids(0..7));
        assert_eq!(count, 7);
    }

    #[test]
    fn test_deselect_page() {
        let mut sel = ContactSelection::new(10);
        sel.select_page(&ids(0..6));
        sel.deselect_page(&ids(0..3));
        assert_eq!(sel.ids(), &ids(3..6)[..]);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut sel = ContactSelection::new(10);
        sel.toggle("b").unwrap();
        sel.toggle("a").unwrap();
        sel.toggle("c").unwrap();
        assert_eq!(sel.ids(), &["b".to_string(), "a".to_string(), "c".to_string()]);
    }
}
