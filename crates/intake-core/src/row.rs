//! # Ledger Row Record
//!
//! One inventory line item: what was bought, what it cost, the receiving code
//! printed on the carton, and the timestamp proving it physically arrived.
//!
//! Every field is owned text. Numeric columns may hold anything a human typed
//! into a grid cell; the cost calculator decides at derivation time whether a
//! value parses, and the store never rejects a write. The record is indexable
//! by [`Field`] so callers that think in columns (snapshot codec, bulk paste)
//! and callers that think in names (tests, the engine) share one layout.

use serde::{Deserialize, Serialize};

use crate::field::Field;

// =============================================================================
// Row
// =============================================================================

/// A single ledger row.
///
/// ## Dual Access Pattern
/// ```text
/// row.quantity = "4".into();            // by name, compile-time checked
/// row.set(Field::Quantity, "4");        // by column, for grid-shaped callers
/// assert_eq!(row.get(Field::Quantity), "4");
/// ```
///
/// ## Invariants
/// - Exactly these 11 fields, always present (empty text, never absent)
/// - `total_cost` / `unit_cost` are derived and overwritten by recalculation
/// - `scan_timestamp` is empty (pending) or a single write-once stamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub period: String,
    pub item_number: String,
    pub sku_name: String,
    pub product_name: String,
    pub quantity: String,
    pub unit_price: String,
    pub shipping_total: String,
    pub total_cost: String,
    pub unit_cost: String,
    pub barcode: String,
    pub scan_timestamp: String,
}

impl Row {
    /// Creates an otherwise-empty row with the accounting period prefilled.
    ///
    /// New rows added by hand and rows grown by bulk paste both start life
    /// this way; the stamp is rendered by the engine with
    /// [`crate::PERIOD_FORMAT`].
    pub fn with_period(period: impl Into<String>) -> Self {
        Row {
            period: period.into(),
            ..Row::default()
        }
    }

    /// Reads one column.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Period => &self.period,
            Field::ItemNumber => &self.item_number,
            Field::SkuName => &self.sku_name,
            Field::ProductName => &self.product_name,
            Field::Quantity => &self.quantity,
            Field::UnitPrice => &self.unit_price,
            Field::ShippingTotal => &self.shipping_total,
            Field::TotalCost => &self.total_cost,
            Field::UnitCost => &self.unit_cost,
            Field::Barcode => &self.barcode,
            Field::ScanTimestamp => &self.scan_timestamp,
        }
    }

    /// Overwrites one column. Accepts any text; numeric correctness is the
    /// cost calculator's concern, not the record's.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Period => self.period = value,
            Field::ItemNumber => self.item_number = value,
            Field::SkuName => self.sku_name = value,
            Field::ProductName => self.product_name = value,
            Field::Quantity => self.quantity = value,
            Field::UnitPrice => self.unit_price = value,
            Field::ShippingTotal => self.shipping_total = value,
            Field::TotalCost => self.total_cost = value,
            Field::UnitCost => self.unit_cost = value,
            Field::Barcode => self.barcode = value,
            Field::ScanTimestamp => self.scan_timestamp = value,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_period_prefills_only_period() {
        let row = Row::with_period("2024-05");
        assert_eq!(row.period, "2024-05");
        for field in Field::ALL.iter().skip(1) {
            assert_eq!(row.get(*field), "");
        }
    }

    #[test]
    fn test_get_set_cover_every_field() {
        let mut row = Row::default();
        for (n, field) in Field::ALL.iter().enumerate() {
            row.set(*field, format!("cell-{n}"));
        }
        for (n, field) in Field::ALL.iter().enumerate() {
            assert_eq!(row.get(*field), format!("cell-{n}"));
        }
    }

    #[test]
    fn test_set_accepts_arbitrary_text() {
        let mut row = Row::default();
        row.set(Field::Quantity, "not a number");
        assert_eq!(row.quantity, "not a number");
    }
}
