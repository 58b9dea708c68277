//! # Cost Derivation Module
//!
//! Derives `total_cost` and `unit_cost` from the three hand-entered numeric
//! columns.
//!
//! ## The Soft-Skip Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LEDGER CELLS ARE FREE TEXT                                             │
//! │                                                                         │
//! │  quantity="4"  unit_price="25"   shipping_total="20"                    │
//! │    → total_cost = 4 * 25 + 20 = "120.00"                                │
//! │    → unit_cost  = 120 / 4     = "30.00"                                 │
//! │                                                                         │
//! │  quantity=""   unit_price="25"  shipping_total=""                       │
//! │    → blanks count as zero: total "0.00", unit "0.00"                    │
//! │                                                                         │
//! │  quantity="a box"  …                                                    │
//! │    → the row is SKIPPED: both derived cells stay untouched,             │
//! │      no error, no panic, the bulk count just excludes it                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A blank cell is an accountant who has not typed yet, so it reads as zero.
//! A non-blank cell that fails to parse is a typo, and silently deriving a
//! cost from a typo would hide it, so the row is left exactly as it was.
//!
//! ## Usage
//! ```rust
//! use intake_core::{cost, Row};
//!
//! let mut row = Row::default();
//! row.quantity = "3".into();
//! row.unit_price = "9.5".into();
//! row.shipping_total = "1.5".into();
//!
//! assert!(cost::recalculate(&mut row));
//! assert_eq!(row.total_cost, "30.00");
//! assert_eq!(row.unit_cost, "10.00");
//! ```

use serde::{Deserialize, Serialize};

use crate::row::Row;

// =============================================================================
// Derived Costs
// =============================================================================

/// The two derived cells, formatted with exactly two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedCosts {
    pub total_cost: String,
    pub unit_cost: String,
}

/// Derives both cost cells without touching the row.
///
/// Returns `None` (the soft skip) when any of `quantity`, `unit_price`, or
/// `shipping_total` holds non-blank text that does not parse as a decimal
/// number. Blank cells parse as zero. A zero quantity yields a zero unit
/// cost rather than a division error.
///
/// ## Example
/// ```rust
/// use intake_core::{cost, Row};
///
/// let mut row = Row::default();
/// row.quantity = "0".into();
/// row.unit_price = "99".into();
/// row.shipping_total = "5".into();
///
/// let parts = cost::derive_costs(&row).unwrap();
/// assert_eq!(parts.total_cost, "5.00"); // 0 * 99 + 5
/// assert_eq!(parts.unit_cost, "0.00");  // qty 0 never divides
/// ```
pub fn derive_costs(row: &Row) -> Option<DerivedCosts> {
    let quantity = parse_decimal(&row.quantity)?;
    let unit_price = parse_decimal(&row.unit_price)?;
    let shipping = parse_decimal(&row.shipping_total)?;

    let total = quantity * unit_price + shipping;
    let unit = if quantity != 0.0 { total / quantity } else { 0.0 };

    Some(DerivedCosts {
        total_cost: format!("{total:.2}"),
        unit_cost: format!("{unit:.2}"),
    })
}

/// Applies [`derive_costs`] to the row in place.
///
/// Returns `true` when the derived cells were written, `false` for the soft
/// skip. Bulk recalculation sums these booleans to report how many rows were
/// actually recalculated.
pub fn recalculate(row: &mut Row) -> bool {
    match derive_costs(row) {
        Some(parts) => {
            row.total_cost = parts.total_cost;
            row.unit_cost = parts.unit_cost;
            true
        }
        None => false,
    }
}

/// Lax decimal parse: blank text is zero, junk is `None`.
fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn costed_row(quantity: &str, unit_price: &str, shipping: &str) -> Row {
        let mut row = Row::default();
        row.quantity = quantity.into();
        row.unit_price = unit_price.into();
        row.shipping_total = shipping.into();
        row
    }

    #[test]
    fn test_basic_derivation() {
        let parts = derive_costs(&costed_row("4", "25", "20")).unwrap();
        assert_eq!(parts.total_cost, "120.00");
        assert_eq!(parts.unit_cost, "30.00");
    }

    #[test]
    fn test_fractional_quantity() {
        // 1.5 * 10 + 0 = 15.00, 15 / 1.5 = 10.00
        let parts = derive_costs(&costed_row("1.5", "10", "0")).unwrap();
        assert_eq!(parts.total_cost, "15.00");
        assert_eq!(parts.unit_cost, "10.00");
    }

    #[test]
    fn test_two_decimal_rounding() {
        // 3 * 3.333 + 0 = 9.999 → "10.00"
        let parts = derive_costs(&costed_row("3", "3.333", "0")).unwrap();
        assert_eq!(parts.total_cost, "10.00");
        assert_eq!(parts.unit_cost, "3.33");
    }

    #[test]
    fn test_blank_cells_count_as_zero() {
        let parts = derive_costs(&costed_row("", "25", "")).unwrap();
        assert_eq!(parts.total_cost, "0.00");
        assert_eq!(parts.unit_cost, "0.00");

        let parts = derive_costs(&costed_row("  ", "", "7")).unwrap();
        assert_eq!(parts.total_cost, "7.00");
    }

    #[test]
    fn test_zero_quantity_yields_zero_unit_cost() {
        let parts = derive_costs(&costed_row("0", "99", "5")).unwrap();
        assert_eq!(parts.total_cost, "5.00");
        assert_eq!(parts.unit_cost, "0.00");
    }

    #[test]
    fn test_junk_quantity_is_a_soft_skip() {
        let mut row = costed_row("a box", "25", "20");
        row.total_cost = "stale".into();
        row.unit_cost = "stale".into();

        assert!(derive_costs(&row).is_none());
        assert!(!recalculate(&mut row));

        // The soft skip leaves the derived cells exactly as they were.
        assert_eq!(row.total_cost, "stale");
        assert_eq!(row.unit_cost, "stale");
    }

    #[test]
    fn test_junk_in_any_column_skips() {
        assert!(derive_costs(&costed_row("1", "x", "0")).is_none());
        assert!(derive_costs(&costed_row("1", "0", "x")).is_none());
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let parts = derive_costs(&costed_row(" 2 ", "\t5", "1 ")).unwrap();
        assert_eq!(parts.total_cost, "11.00");
        assert_eq!(parts.unit_cost, "5.50");
    }

    #[test]
    fn test_recalculate_writes_both_cells() {
        let mut row = costed_row("2", "7", "1");
        assert!(recalculate(&mut row));
        assert_eq!(row.total_cost, "15.00");
        assert_eq!(row.unit_cost, "7.50");
    }

    #[test]
    fn test_negative_values_follow_the_arithmetic() {
        // Refund-shaped rows are not rejected; the math just runs.
        let parts = derive_costs(&costed_row("-2", "10", "0")).unwrap();
        assert_eq!(parts.total_cost, "-20.00");
        assert_eq!(parts.unit_cost, "10.00");
    }
}
