//! # Scan Types
//!
//! Receipt lifecycle states and the outcome vocabulary of the scan matcher.
//! The matching algorithm itself lives in the engine, next to the row store
//! it searches; these types are what crosses the boundary back to the
//! presentation layer.

use serde::{Deserialize, Serialize};

use crate::row::Row;

// =============================================================================
// Receipt State
// =============================================================================

/// Physical-receipt lifecycle of a row, derived from `scan_timestamp`.
///
/// `Received` is terminal for the scan matcher: only the explicit clear-scan
/// operation moves a row back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptState {
    Pending,
    Received,
}

impl ReceiptState {
    /// Derives the state from a row; whitespace-only stamps count as empty.
    pub fn of(row: &Row) -> ReceiptState {
        if row.scan_timestamp.trim().is_empty() {
            ReceiptState::Pending
        } else {
            ReceiptState::Received
        }
    }

    #[inline]
    pub const fn is_received(&self) -> bool {
        matches!(self, ReceiptState::Received)
    }
}

// =============================================================================
// Scan Outcome
// =============================================================================

/// Result of one scan submission.
///
/// Every submission produces exactly one of these, and every one of them has
/// already been autosaved by the time the caller sees it. Callers should
/// clear their scan-input buffer on all four outcomes so the next code
/// starts from empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The token matched a pending row; `timestamp` is the stamp just
    /// written into it.
    Success { barcode: String, timestamp: String },
    /// The token matched a row that was already received; its existing
    /// stamp was left untouched.
    AlreadyScanned { barcode: String },
    /// No row carries this barcode.
    NotFound { barcode: String },
    /// The submitted text was empty after trimming.
    EmptyInput,
}

impl ScanOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, ScanOutcome::Success { .. })
    }

    /// `true` for the outcomes a UI should surface as a blocking warning
    /// (duplicate or unknown code), `false` for success and empty input.
    pub fn needs_warning(&self) -> bool {
        matches!(
            self,
            ScanOutcome::AlreadyScanned { .. } | ScanOutcome::NotFound { .. }
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_stamp() {
        let mut row = Row::default();
        assert_eq!(ReceiptState::of(&row), ReceiptState::Pending);

        row.scan_timestamp = "   ".into();
        assert_eq!(ReceiptState::of(&row), ReceiptState::Pending);

        row.scan_timestamp = "2024-05-17 14:03:59".into();
        assert_eq!(ReceiptState::of(&row), ReceiptState::Received);
        assert!(ReceiptState::of(&row).is_received());
    }

    #[test]
    fn test_warning_outcomes() {
        let success = ScanOutcome::Success {
            barcode: "X".into(),
            timestamp: "t".into(),
        };
        let duplicate = ScanOutcome::AlreadyScanned { barcode: "X".into() };
        let unknown = ScanOutcome::NotFound { barcode: "X".into() };

        assert!(success.is_success());
        assert!(!success.needs_warning());
        assert!(duplicate.needs_warning());
        assert!(unknown.needs_warning());
        assert!(!ScanOutcome::EmptyInput.needs_warning());
    }
}
