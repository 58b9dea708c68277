//! # intake-core: Pure Business Logic for the Intake Ledger
//!
//! This crate is the **heart** of the Intake inventory-cost ledger. It holds
//! the field schema, the row record, and every rule that can be expressed as
//! a pure function: cost derivation, barcode composition, scan outcomes, and
//! clipboard-block parsing. Nothing here touches a file, a clock, or a
//! network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Intake Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Presentation (console, future GUI)                │   │
//! │  │     grid rendering ── button wiring ── scanner input            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ engine calls + status hook             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  intake-engine (state engine)                    │   │
//! │  │    row store, scan matcher, bulk paste, autosave discipline     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ intake-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  field   │ │   row    │ │   cost   │ │ barcode  │          │   │
//! │  │   │  schema  │ │  record  │ │  derive  │ │ compose  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐                                    │   │
//! │  │   │   scan   │ │  paste   │                                    │   │
//! │  │   │ outcomes │ │ splitter │                                    │   │
//! │  │   └──────────┘ └──────────┘                                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCKS • NO GLOBAL STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`field`] - The fixed 11-field schema and its canonical order
//! - [`row`] - The ledger row record, indexable by [`Field`]
//! - [`cost`] - Total/unit cost derivation with soft parse-skips
//! - [`barcode`] - Opaque receiving codes and file-safe stems
//! - [`scan`] - Receipt states and scan outcomes
//! - [`paste`] - Tab-delimited clipboard block parsing
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; randomness and time
//!    stamps always arrive as parameters
//! 2. **Text In, Text Out**: every field is stored as text; numeric meaning
//!    is asserted only at derivation time
//! 3. **Soft Failure**: bad data in one row skips that row, it never aborts
//!    a bulk operation and never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use intake_core::{cost, Row};
//!
//! let mut row = Row::default();
//! row.quantity = "4".into();
//! row.unit_price = "25".into();
//! row.shipping_total = "20".into();
//!
//! // 4 * 25 + 20 = 120.00, 120 / 4 = 30.00
//! assert!(cost::recalculate(&mut row));
//! assert_eq!(row.total_cost, "120.00");
//! assert_eq!(row.unit_cost, "30.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod barcode;
pub mod cost;
pub mod field;
pub mod paste;
pub mod row;
pub mod scan;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use intake_core::Row` instead of
// `use intake_core::row::Row`

pub use cost::DerivedCosts;
pub use field::Field;
pub use row::Row;
pub use scan::{ReceiptState, ScanOutcome};

// =============================================================================
// Crate-Level Constants
// =============================================================================
// The three human-readable stamp formats of the data model. The engine is
// the only layer that reads a clock; it renders stamps with these and passes
// them down, so the formats live with the schema they describe.

/// Accounting period prefilled into new rows ("2024-05").
pub const PERIOD_FORMAT: &str = "%Y-%m";

/// Year-month stamp embedded in generated barcodes ("202405").
pub const BARCODE_STAMP_FORMAT: &str = "%Y%m";

/// Receipt timestamp written by a successful scan ("2024-05-17 14:03:59").
pub const RECEIPT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
