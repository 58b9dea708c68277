//! # intake-snapshot: Persistence Layer for the Intake Ledger
//!
//! Everything that touches the filesystem lives here: the CSV snapshot codec,
//! the well-known autosave location, and the persisted collaborator settings.
//! The engine decides *when* to persist; this crate decides *how*.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Intake Data Flow                                 │
//! │                                                                         │
//! │  Engine operation (add, scan, paste, ...)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 intake-snapshot (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    codec      │    │     paths     │    │   settings   │  │   │
//! │  │   │ write/read    │    │ data dir +    │    │ TOML file,   │  │   │
//! │  │   │ CSV snapshot  │    │ autosave file │    │ best-effort  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/intake/last_session.csv   (autosave)                   │
//! │  ~/.config/intake/settings.toml           (collaborator settings)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`codec`] - Snapshot encode/decode with header-driven column mapping
//! - [`paths`] - Well-known file locations with an env override
//! - [`settings`] - Persisted collaborator settings
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use intake_snapshot::{codec, paths};
//!
//! let rows = codec::read_snapshot(&paths::autosave_path()?)?;
//! // ... mutate ...
//! codec::write_snapshot(&paths::autosave_path()?, rows.iter())?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod paths;
pub mod settings;

// =============================================================================
// Re-exports
// =============================================================================

pub use codec::{read_snapshot, write_snapshot};
pub use error::{SnapshotError, SnapshotResult};
pub use settings::Settings;
