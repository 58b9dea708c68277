//! # Persistence Error Types
//!
//! Error types for snapshot and settings I/O.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error / toml errors                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SnapshotError (this module) ← adds the schema/settings cases           │
//! │       │                                                                 │
//! │       ├── explicit save/load: surfaced to the caller                    │
//! │       └── autosave/settings:  logged at warn and swallowed (engine)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The soft halves of the ledger's failure model (parse skips, scan
//! outcomes) never reach this type; they are data, not errors.

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A snapshot file lacks required column headers.
    ///
    /// ## When This Occurs
    /// - Loading a file that is not an intake snapshot
    /// - Loading a snapshot from an incompatible schema revision
    ///
    /// The load aborts with no partial result; in-memory state is untouched.
    #[error("snapshot is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A snapshot file exists but its content cannot be decoded.
    ///
    /// ## When This Occurs
    /// - Invalid UTF-8 in a record
    /// - Structurally broken CSV (unclosed quote)
    #[error("snapshot is malformed: {0}")]
    Malformed(String),

    /// The settings file cannot be encoded or decoded.
    #[error("settings file error: {0}")]
    Settings(String),

    /// No per-user data/config directory could be determined.
    ///
    /// ## When This Occurs
    /// - Platforms without a resolvable home directory
    /// - Sandboxes that strip the relevant environment
    #[error("could not determine a data directory for this platform")]
    NoDataDir,

    /// Storage could not be accessed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SnapshotError {
    /// Creates a MissingColumns error from the absent header names.
    pub fn missing_columns<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SnapshotError::MissingColumns {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// `true` when the input file was readable but not a valid snapshot
    /// (as opposed to storage being inaccessible).
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            SnapshotError::MissingColumns { .. } | SnapshotError::Malformed(_)
        )
    }
}

/// Convert csv errors, unwrapping the I/O case so callers can distinguish
/// "storage broke" from "file content is wrong".
impl From<csv::Error> for SnapshotError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => SnapshotError::Io(io),
                kind => SnapshotError::Malformed(format!("{kind:?}")),
            }
        } else {
            SnapshotError::Malformed(err.to_string())
        }
    }
}

impl From<toml::de::Error> for SnapshotError {
    fn from(err: toml::de::Error) -> Self {
        SnapshotError::Settings(err.to_string())
    }
}

impl From<toml::ser::Error> for SnapshotError {
    fn from(err: toml::ser::Error) -> Self {
        SnapshotError::Settings(err.to_string())
    }
}

/// Result type for persistence operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_names() {
        let err = SnapshotError::missing_columns(["barcode", "scan_timestamp"]);
        let message = err.to_string();
        assert!(message.contains("barcode"));
        assert!(message.contains("scan_timestamp"));
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_io_is_not_a_schema_error() {
        let err = SnapshotError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(!err.is_schema_error());
    }
}
