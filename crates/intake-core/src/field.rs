//! # Field Schema
//!
//! The fixed 11-field schema of a ledger row, in its canonical order.
//!
//! ## Column Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0 period          │ "2024-05", prefilled on new rows                   │
//! │  1 item_number     │ user-defined identifier                            │
//! │  2 sku_name        │ stock keeping unit name                            │
//! │  3 product_name    │ display name                                       │
//! │  4 quantity        │ decimal text, parsed on demand                     │
//! │  5 unit_price      │ decimal text, parsed on demand                     │
//! │  6 shipping_total  │ decimal text, parsed on demand                     │
//! │  7 total_cost      │ DERIVED: quantity * unit_price + shipping_total    │
//! │  8 unit_cost       │ DERIVED: total_cost / quantity (0 when qty is 0)   │
//! │  9 barcode         │ opaque receiving code, empty until generated       │
//! │ 10 scan_timestamp  │ empty = pending, stamped once on receipt           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant carries its snapshot header name; the snapshot codec and the
//! bulk importer both address columns through this enum, never through bare
//! positional indices.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Field
// =============================================================================

/// One column of the ledger grid.
///
/// The discriminants follow the canonical column order, so `Field::index`
/// and `Field::from_index` translate between the enum and the positional
/// anchors used by bulk paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Period,
    ItemNumber,
    SkuName,
    ProductName,
    Quantity,
    UnitPrice,
    ShippingTotal,
    TotalCost,
    UnitCost,
    Barcode,
    ScanTimestamp,
}

impl Field {
    /// Number of columns in the schema.
    pub const COUNT: usize = 11;

    /// Every field in canonical column order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::Period,
        Field::ItemNumber,
        Field::SkuName,
        Field::ProductName,
        Field::Quantity,
        Field::UnitPrice,
        Field::ShippingTotal,
        Field::TotalCost,
        Field::UnitCost,
        Field::Barcode,
        Field::ScanTimestamp,
    ];

    /// The canonical snapshot header name for this column.
    pub const fn header(&self) -> &'static str {
        match self {
            Field::Period => "period",
            Field::ItemNumber => "item_number",
            Field::SkuName => "sku_name",
            Field::ProductName => "product_name",
            Field::Quantity => "quantity",
            Field::UnitPrice => "unit_price",
            Field::ShippingTotal => "shipping_total",
            Field::TotalCost => "total_cost",
            Field::UnitCost => "unit_cost",
            Field::Barcode => "barcode",
            Field::ScanTimestamp => "scan_timestamp",
        }
    }

    /// Zero-based position of this column in the canonical order.
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Looks up a column by position; `None` past the last column.
    ///
    /// Bulk paste walks source cells left to right from an anchor column and
    /// uses the `None` to drop cells that fall off the grid.
    pub const fn from_index(index: usize) -> Option<Field> {
        match index {
            0 => Some(Field::Period),
            1 => Some(Field::ItemNumber),
            2 => Some(Field::SkuName),
            3 => Some(Field::ProductName),
            4 => Some(Field::Quantity),
            5 => Some(Field::UnitPrice),
            6 => Some(Field::ShippingTotal),
            7 => Some(Field::TotalCost),
            8 => Some(Field::UnitCost),
            9 => Some(Field::Barcode),
            10 => Some(Field::ScanTimestamp),
            _ => None,
        }
    }

    /// Looks up a column by its snapshot header name.
    pub fn from_header(header: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.header() == header)
    }

    /// Derived columns are owned by the cost calculator and overwritten on
    /// every recalculation.
    #[inline]
    pub const fn is_derived(&self) -> bool {
        matches!(self, Field::TotalCost | Field::UnitCost)
    }

    /// The scan column is written only by the scan matcher and the explicit
    /// clear-scan operation, never by cell edits or paste.
    #[inline]
    pub const fn is_scan(&self) -> bool {
        matches!(self, Field::ScanTimestamp)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_is_stable() {
        for (position, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), position);
            assert_eq!(Field::from_index(position), Some(*field));
        }
        assert_eq!(Field::from_index(Field::COUNT), None);
    }

    #[test]
    fn test_headers_are_unique() {
        for a in Field::ALL {
            for b in Field::ALL {
                if a != b {
                    assert_ne!(a.header(), b.header());
                }
            }
        }
    }

    #[test]
    fn test_header_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_header(field.header()), Some(field));
        }
        assert_eq!(Field::from_header("no_such_column"), None);
    }

    #[test]
    fn test_predicates() {
        assert!(Field::TotalCost.is_derived());
        assert!(Field::UnitCost.is_derived());
        assert!(!Field::Quantity.is_derived());

        assert!(Field::ScanTimestamp.is_scan());
        assert!(!Field::Barcode.is_scan());
    }

    #[test]
    fn test_display_matches_header() {
        assert_eq!(Field::UnitPrice.to_string(), "unit_price");
    }
}
