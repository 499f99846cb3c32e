//! Element/Row Change Tracker
//!
//! Decides which of the currently rendered rows carry data the caller has not
//! seen yet. Identity alone misses recycled nodes in a virtualized window;
//! text alone conflates unrelated rows with equal content in an append-only
//! list. The tracker keys on identity and compares the text signature.

use crate::driver::ElementHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;
use uuid::Uuid;

/// Unique identifier of one logical table instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(Uuid);

impl TableId {
    /// Generate a fresh identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table-{}", self.0)
    }
}

/// Identity -> last-seen signature map owned by one table instance
#[derive(Debug, Default)]
pub struct RowTracker {
    table_id: TableId,
    signatures: HashMap<String, String>,
}

impl RowTracker {
    /// Create an empty tracker for `table_id`
    #[must_use]
    pub fn new(table_id: TableId) -> Self {
        Self {
            table_id,
            signatures: HashMap::new(),
        }
    }

    /// Table this tracker belongs to
    #[must_use]
    pub const fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Indices into `rows` whose identity is new or whose text changed since
    /// the last observation.
    ///
    /// Every row's signature is recorded, so an immediate second call with
    /// the same rows returns an empty list.
    pub fn unseen_indices(&mut self, rows: &[ElementHandle]) -> Vec<usize> {
        let mut unseen = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            let signature = row.text();
            let is_unseen = self
                .signatures
                .get(&row.id)
                .map_or(true, |previous| previous != signature);
            if is_unseen {
                unseen.push(index);
            }
            self.signatures.insert(row.id.clone(), signature.to_string());
        }
        trace!(
            table = %self.table_id,
            rendered = rows.len(),
            unseen = unseen.len(),
            tracked = self.signatures.len(),
            "classified rendered rows"
        );
        unseen
    }

    /// Number of tracked identities
    #[must_use]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether nothing is tracked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Release every identity/signature association
    pub fn cleanup(&mut self) {
        self.signatures.clear();
        self.signatures.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(items: &[(&str, &str)]) -> Vec<ElementHandle> {
        items
            .iter()
            .map(|(id, text)| ElementHandle::new(*id).with_text(*text))
            .collect()
    }

    #[test]
    fn test_everything_unseen_initially() {
        let mut tracker = RowTracker::default();
        let unseen = tracker.unseen_indices(&rows(&[("a", "Row 1"), ("b", "Row 2")]));
        assert_eq!(unseen, vec![0, 1]);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_second_call_without_render_change_is_empty() {
        let mut tracker = RowTracker::default();
        let rendered = rows(&[("a", "Row 1"), ("b", "Row 2"), ("c", "Row 3")]);
        tracker.unseen_indices(&rendered);
        assert!(tracker.unseen_indices(&rendered).is_empty());
    }

    #[test]
    fn test_append_growth_reports_new_identities() {
        let mut tracker = RowTracker::default();
        tracker.unseen_indices(&rows(&[("n0", "Row 1"), ("n1", "Row 2")]));
        let unseen = tracker.unseen_indices(&rows(&[
            ("n0", "Row 1"),
            ("n1", "Row 2"),
            ("n2", "Row 11"),
        ]));
        assert_eq!(unseen, vec![2]);
    }

    #[test]
    fn test_recycled_slot_reported_when_text_changes() {
        let mut tracker = RowTracker::default();
        tracker.unseen_indices(&rows(&[("slot-0", "Row 1"), ("slot-1", "Row 2")]));
        let unseen = tracker.unseen_indices(&rows(&[("slot-0", "Row 11"), ("slot-1", "Row 2")]));
        assert_eq!(unseen, vec![0]);
    }

    #[test]
    fn test_growing_list_prepended_at_slot_zero() {
        // Slot 0 newly appears with "Row 11" and is unseen both as a new
        // identity and, later, as a content change of a known identity.
        let mut tracker = RowTracker::default();
        let unseen = tracker.unseen_indices(&rows(&[("x", "Row 11")]));
        assert_eq!(unseen, vec![0]);
        let unseen = tracker.unseen_indices(&rows(&[("x", "Row 1")]));
        assert_eq!(unseen, vec![0]);
    }

    #[test]
    fn test_equal_text_on_distinct_nodes_is_not_deduplicated() {
        let mut tracker = RowTracker::default();
        tracker.unseen_indices(&rows(&[("a", "same")]));
        let unseen = tracker.unseen_indices(&rows(&[("a", "same"), ("b", "same")]));
        assert_eq!(unseen, vec![1]);
    }

    #[test]
    fn test_rows_without_text_sign_as_empty() {
        let mut tracker = RowTracker::default();
        let handles = vec![ElementHandle::new("a")];
        assert_eq!(tracker.unseen_indices(&handles), vec![0]);
        assert!(tracker.unseen_indices(&[ElementHandle::new("a").with_text("")]).is_empty());
    }

    #[test]
    fn test_cleanup_releases_map() {
        let mut tracker = RowTracker::default();
        let rendered = rows(&[("a", "Row 1")]);
        tracker.unseen_indices(&rendered);
        tracker.cleanup();
        assert!(tracker.is_empty());
        assert_eq!(tracker.unseen_indices(&rendered), vec![0]);
    }

    #[test]
    fn test_trackers_are_partitioned_per_table() {
        let mut first = RowTracker::new(TableId::new());
        let mut second = RowTracker::new(TableId::new());
        let rendered = rows(&[("a", "Row 1")]);
        first.unseen_indices(&rendered);
        assert_eq!(second.unseen_indices(&rendered), vec![0]);
        assert_ne!(first.table_id(), second.table_id());
    }

    #[test]
    fn test_table_id_display() {
        let id = TableId::new();
        assert!(id.to_string().starts_with("table-"));
    }
}
