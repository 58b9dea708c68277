//! # Ordered Row Store
//!
//! Owns the working table of ledger rows. Insertion order is the only order:
//! it is what the operator sees on screen, what snapshots persist, and what
//! barcode lookup walks.
//!
//! ## Identity vs Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            RowStore                                     │
//! │                                                                         │
//! │   position 0    RowId(7f3a…)   ["2025-07", "A-100", "widget", …]        │
//! │   position 1    RowId(c91b…)   ["2025-07", "A-101", "gasket", …]        │
//! │   position 2    RowId(02ee…)   ["2025-08", "",      "",       …]        │
//! │                                                                         │
//! │   • a RowId never changes for the life of a row                         │
//! │   • positions shift when rows above are deleted                         │
//! │   • operations target ids, display targets positions                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store moves strings in and out and has no opinion about derived
//! values, receipt rules, or autosave. That policy lives in
//! [`crate::LedgerEngine`].

use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

use intake_core::{Field, Row};

/// Stable handle for one row in the working table.
///
/// Positions shift as rows above are deleted, so selections are held as ids:
/// a delete can never silently retarget a later operation onto the wrong row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(Uuid);

impl RowId {
    pub(crate) fn new() -> Self {
        RowId(Uuid::new_v4())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One table slot: the id plus the row it was minted for.
#[derive(Debug, Clone)]
struct Entry {
    id: RowId,
    row: Row,
}

/// The working table.
///
/// ## Invariants
/// - Rows keep insertion order; nothing reorders them
/// - Ids are unique within the table and never reused after a delete
/// - `replace_all` mints fresh ids; handles from before the swap go stale
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    entries: Vec<Entry>,
}

impl RowStore {
    /// Creates an empty table.
    pub fn new() -> Self {
        RowStore {
            entries: Vec::new(),
        }
    }

    /// Appends `row` at the bottom and returns its freshly minted id.
    pub fn insert(&mut self, row: Row) -> RowId {
        let id = RowId::new();
        self.entries.push(Entry { id, row });
        id
    }

    /// Removes every row whose id is in `targets`.
    ///
    /// Unknown ids are ignored. Returns how many rows were actually removed.
    pub fn delete(&mut self, targets: &HashSet<RowId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !targets.contains(&entry.id));
        before - self.entries.len()
    }

    /// Looks a row up by id.
    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.row)
    }

    /// Looks a row up by id for mutation.
    pub fn get_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.row)
    }

    /// Writes one cell. Returns `false` when the id is stale.
    ///
    /// The store writes ANY column, including the receipt column. Column
    /// policy (which cells an edit may touch) is enforced a layer up.
    pub fn set_field(&mut self, id: RowId, field: Field, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(row) => {
                row.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Iterates `(id, row)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &Row)> {
        self.entries.iter().map(|entry| (entry.id, &entry.row))
    }

    /// Iterates rows in table order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.entries.iter().map(|entry| &entry.row)
    }

    /// Iterates rows mutably in table order.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.entries.iter_mut().map(|entry| &mut entry.row)
    }

    /// Snapshot of every id in table order.
    pub fn ids(&self) -> Vec<RowId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// Id of the row at `position`, if the table reaches that far.
    pub fn id_at(&self, position: usize) -> Option<RowId> {
        self.entries.get(position).map(|entry| entry.id)
    }

    /// Row at `position`, if the table reaches that far.
    pub fn row_at(&self, position: usize) -> Option<&Row> {
        self.entries.get(position).map(|entry| &entry.row)
    }

    /// Current position of the row with `id`.
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// First row (top to bottom) whose stored barcode equals `token`.
    ///
    /// Stored codes are compared whitespace-trimmed; `token` is expected to
    /// arrive already trimmed. Duplicate codes resolve to the topmost row.
    pub fn find_by_barcode(&self, token: &str) -> Option<RowId> {
        self.entries
            .iter()
            .find(|entry| entry.row.barcode.trim() == token)
            .map(|entry| entry.id)
    }

    /// Swaps the whole table for `rows`, minting fresh ids.
    pub fn replace_all(&mut self, rows: Vec<Row>) {
        self.entries = rows
            .into_iter()
            .map(|row| Entry {
                id: RowId::new(),
                row,
            })
            .collect();
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item_row(item_number: &str) -> Row {
        let mut row = Row::with_period("2025-07");
        row.item_number = item_number.to_string();
        row
    }

    fn seeded(items: &[&str]) -> (RowStore, Vec<RowId>) {
        let mut store = RowStore::new();
        let ids = items.iter().map(|item| store.insert(item_row(item))).collect();
        (store, ids)
    }

    #[test]
    fn test_insert_preserves_order() {
        let (store, _) = seeded(&["A-1", "A-2", "A-3"]);
        let items: Vec<&str> = store.rows().map(|row| row.item_number.as_str()).collect();
        assert_eq!(items, ["A-1", "A-2", "A-3"]);
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let (mut store, ids) = seeded(&["A-1", "A-2", "A-3"]);
        let unique: HashSet<RowId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 3);

        store.delete(&HashSet::from([ids[0]]));
        // The surviving rows answer to the same handles as before.
        assert_eq!(store.get(ids[1]).unwrap().item_number, "A-2");
        assert_eq!(store.get(ids[2]).unwrap().item_number, "A-3");
    }

    #[test]
    fn test_delete_removes_only_targets() {
        let (mut store, ids) = seeded(&["A-1", "A-2", "A-3", "A-4"]);
        let removed = store.delete(&HashSet::from([ids[1], ids[3]]));
        assert_eq!(removed, 2);
        let items: Vec<&str> = store.rows().map(|row| row.item_number.as_str()).collect();
        assert_eq!(items, ["A-1", "A-3"]);
    }

    #[test]
    fn test_delete_ignores_stale_ids() {
        let (mut store, ids) = seeded(&["A-1"]);
        assert_eq!(store.delete(&HashSet::from([ids[0]])), 1);
        assert_eq!(store.delete(&HashSet::from([ids[0]])), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_field_writes_any_column() {
        let (mut store, ids) = seeded(&["A-1"]);
        assert!(store.set_field(ids[0], Field::Quantity, "12"));
        assert!(store.set_field(ids[0], Field::ScanTimestamp, "2025-07-01 08:00:00"));
        let row = store.get(ids[0]).unwrap();
        assert_eq!(row.quantity, "12");
        assert_eq!(row.scan_timestamp, "2025-07-01 08:00:00");
    }

    #[test]
    fn test_set_field_reports_stale_id() {
        let (mut store, ids) = seeded(&["A-1"]);
        store.delete(&HashSet::from([ids[0]]));
        assert!(!store.set_field(ids[0], Field::Quantity, "12"));
    }

    #[test]
    fn test_position_tracks_deletions() {
        let (mut store, ids) = seeded(&["A-1", "A-2", "A-3"]);
        assert_eq!(store.position(ids[2]), Some(2));
        store.delete(&HashSet::from([ids[0]]));
        assert_eq!(store.position(ids[2]), Some(1));
        assert_eq!(store.position(ids[0]), None);
    }

    #[test]
    fn test_find_by_barcode_first_match_wins() {
        let (mut store, ids) = seeded(&["A-1", "A-2"]);
        store.set_field(ids[0], Field::Barcode, "DUP-202507-ABCDEF");
        store.set_field(ids[1], Field::Barcode, "DUP-202507-ABCDEF");
        assert_eq!(store.find_by_barcode("DUP-202507-ABCDEF"), Some(ids[0]));
    }

    #[test]
    fn test_find_by_barcode_trims_stored_codes() {
        let (mut store, ids) = seeded(&["A-1"]);
        store.set_field(ids[0], Field::Barcode, "  PAD-202507-ABCDEF ");
        assert_eq!(store.find_by_barcode("PAD-202507-ABCDEF"), Some(ids[0]));
        assert_eq!(store.find_by_barcode("PAD-202507-XXXXXX"), None);
    }

    #[test]
    fn test_replace_all_mints_fresh_ids() {
        let (mut store, ids) = seeded(&["A-1", "A-2"]);
        store.replace_all(vec![item_row("B-1")]);
        assert_eq!(store.len(), 1);
        assert!(store.get(ids[0]).is_none());
        assert!(store.get(ids[1]).is_none());
        assert_eq!(store.row_at(0).unwrap().item_number, "B-1");
    }

    #[test]
    fn test_iter_pairs_ids_with_rows() {
        let (store, ids) = seeded(&["A-1", "A-2"]);
        let paired: Vec<(RowId, &str)> = store
            .iter()
            .map(|(id, row)| (id, row.item_number.as_str()))
            .collect();
        assert_eq!(paired, vec![(ids[0], "A-1"), (ids[1], "A-2")]);
    }
}
