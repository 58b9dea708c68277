//! # intake-engine
//!
//! Ledger state engine: the working table of an intake session plus every
//! operation a frontend can run against it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   console / grid UI                                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌──────────────────┐        THIS CRATE                                │
//! │   │  intake-engine   │   row store, operations, autosave cadence,       │
//! │   │                  │   status reporting, session restore              │
//! │   └───────┬──────────┘                                                  │
//! │           │ calls                                                       │
//! │     ┌─────┴──────┐                                                      │
//! │     ▼            ▼                                                      │
//! │  intake-core  intake-snapshot                                           │
//! │  (pure rules) (CSV + settings I/O)                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use intake_engine::LedgerEngine;
//! use intake_snapshot::paths;
//!
//! let mut engine = LedgerEngine::open(paths::autosave_path()?);
//! engine.set_status_hook(|status| println!("{status}"));
//!
//! let id = engine.add_row();
//! engine.edit_cell(id, intake_core::Field::Quantity, "4");
//! engine.recalculate_row(id);
//! engine.generate_barcodes(&[]);
//! ```
//!
//! The engine is single threaded on purpose: one operator, one table, one
//! session file. Embed it behind your own lock if a frontend needs more.

pub mod engine;
pub mod store;

pub use engine::{LedgerEngine, PasteAnchor};
pub use store::{RowId, RowStore};
