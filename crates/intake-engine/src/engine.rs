//! # Ledger Engine
//!
//! The operation layer every frontend talks to. One engine owns one working
//! table for one operator; there is no shared-state story here on purpose.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ledger Engine Operations                          │
//! │                                                                         │
//! │  Frontend Action        Engine Call               Effect                │
//! │  ───────────────        ───────────               ──────                │
//! │  Click Add ───────────► add_row() ──────────────► period-stamped row    │
//! │  Select + Delete ─────► delete_rows(ids) ───────► rows removed          │
//! │  Type in a cell ──────► edit_cell(id, col, v) ──► one cell written      │
//! │  Ctrl+V on the grid ──► paste_block(anchor, b) ─► block overlaid        │
//! │  Barcode button ──────► generate_barcodes(ids) ─► codes filled/replaced │
//! │  Recalc button ───────► recalculate_all() ──────► derived cells refresh │
//! │  Scanner enter ───────► submit_scan(text) ──────► receipt stamp         │
//! │                                                                         │
//! │  Every mutation autosaves (best effort), then reports one status line.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Autosave Discipline
//! A session file, when configured, is rewritten after every operation that
//! ran to completion, including the zero-effect ones ("delete" with nothing
//! selected still autosaves). The two exceptions are a paste with no usable
//! content and a refused cell edit; neither counts as an operation. Autosave
//! failures are logged and swallowed: a full disk must never cost the
//! operator their in-memory table.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, warn};

use intake_core::{
    barcode, cost, paste, Field, ReceiptState, Row, ScanOutcome, BARCODE_STAMP_FORMAT,
    PERIOD_FORMAT, RECEIPT_TIMESTAMP_FORMAT,
};
use intake_snapshot::{read_snapshot, write_snapshot, SnapshotResult};

use crate::store::{RowId, RowStore};

// =============================================================================
// Paste Anchor
// =============================================================================

/// Grid position a paste starts from.
///
/// Both coordinates are zero-based; `column` indexes into [`Field::ALL`].
/// `None` in [`LedgerEngine::paste_block`] means "top-left": an empty table
/// or a grid with no selection pastes from row 0, column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteAnchor {
    pub row: usize,
    pub column: usize,
}

// =============================================================================
// Ledger Engine
// =============================================================================

/// Working table plus the full operation set of a receiving session.
///
/// ## Invariants
/// - Derived cost cells change only through the recalculate operations
/// - The receipt column changes only through [`submit_scan`] and
///   [`clear_scan`]; plain edits and pastes cannot touch it
/// - Scan stamps are write-once: a second scan of the same code warns and
///   leaves the original timestamp byte-for-byte intact
/// - When an autosave path is set, every completed operation rewrites it
///
/// [`submit_scan`]: LedgerEngine::submit_scan
/// [`clear_scan`]: LedgerEngine::clear_scan
pub struct LedgerEngine {
    store: RowStore,
    autosave_path: Option<PathBuf>,
    status_hook: Option<Box<dyn FnMut(&str)>>,
}

impl fmt::Debug for LedgerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerEngine")
            .field("rows", &self.store.len())
            .field("autosave_path", &self.autosave_path)
            .field("status_hook", &self.status_hook.is_some())
            .finish()
    }
}

impl LedgerEngine {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Engine with no session file. Used by tests and embedding callers that
    /// handle persistence themselves.
    pub fn in_memory() -> Self {
        LedgerEngine {
            store: RowStore::new(),
            autosave_path: None,
            status_hook: None,
        }
    }

    /// Engine that autosaves to `path` after every operation, starting from
    /// an empty table. No attempt is made to read `path`; use [`open`] to
    /// restore a previous session.
    ///
    /// [`open`]: LedgerEngine::open
    pub fn with_autosave(path: impl Into<PathBuf>) -> Self {
        LedgerEngine {
            store: RowStore::new(),
            autosave_path: Some(path.into()),
            status_hook: None,
        }
    }

    /// Opens a session backed by `path`.
    ///
    /// If `path` holds a readable snapshot the table is restored from it.
    /// Otherwise (first run, or an unreadable/corrupt file) the session
    /// starts fresh: one blank row stamped with the current period, written
    /// straight back out as the first autosave. Never fails; every fallback
    /// is logged.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut engine = LedgerEngine {
            store: RowStore::new(),
            autosave_path: Some(path.clone()),
            status_hook: None,
        };

        if path.exists() {
            match read_snapshot(&path) {
                Ok(rows) => {
                    let count = rows.len();
                    engine.store.replace_all(rows);
                    info!(path = %path.display(), rows = count, "previous session restored");
                    return engine;
                }
                Err(err) => {
                    warn!(path = %path.display(), "could not restore previous session: {err}")
                }
            }
        } else {
            debug!(path = %path.display(), "no previous session file");
        }

        engine.store.insert(Row::with_period(current_period()));
        engine.autosave_quietly();
        engine
    }

    /// Installs the status hook: one human-readable line per completed
    /// operation. Replaces any previous hook.
    pub fn set_status_hook(&mut self, hook: impl FnMut(&str) + 'static) {
        self.status_hook = Some(Box::new(hook));
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// The working table, read-only. All writes go through operations.
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Rows in table order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.store.rows()
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Session file this engine autosaves to, if any.
    pub fn autosave_path(&self) -> Option<&Path> {
        self.autosave_path.as_deref()
    }

    // =========================================================================
    // Row Operations
    // =========================================================================

    /// Appends one row at the bottom with the period cell prefilled to the
    /// current month and everything else blank.
    pub fn add_row(&mut self) -> RowId {
        let id = self.store.insert(Row::with_period(current_period()));
        debug!(%id, "row added");
        self.commit("Added a new row");
        id
    }

    /// Deletes every row in `selection`. Stale ids are skipped. Returns how
    /// many rows were removed.
    pub fn delete_rows(&mut self, selection: &[RowId]) -> usize {
        if selection.is_empty() {
            self.commit("No rows selected");
            return 0;
        }
        let targets: HashSet<RowId> = selection.iter().copied().collect();
        let deleted = self.store.delete(&targets);
        self.commit(&format!("Deleted {deleted} {}", noun(deleted, "row", "rows")));
        deleted
    }

    /// Writes one cell and autosaves.
    ///
    /// Returns `false` without touching anything when `field` is the receipt
    /// column (only scans may write it) or when `id` is stale. Cell edits are
    /// deliberately quiet: they happen on every keystroke commit and would
    /// drown real status lines.
    ///
    /// Editing a cost input does NOT refresh the derived cells; the operator
    /// asks for that explicitly via the recalculate operations.
    pub fn edit_cell(&mut self, id: RowId, field: Field, value: impl Into<String>) -> bool {
        if field.is_scan() {
            debug!(%id, %field, "edit refused, receipt column only changes through scans");
            return false;
        }
        if !self.store.set_field(id, field, value) {
            return false;
        }
        self.autosave_quietly();
        true
    }

    // =========================================================================
    // Cost Recalculation
    // =========================================================================

    /// Recomputes the derived cost cells of one row.
    ///
    /// Returns `true` when the cells were written, `false` when the row was
    /// skipped (unparseable input, see [`intake_core::cost`]) or `id` is
    /// stale.
    pub fn recalculate_row(&mut self, id: RowId) -> bool {
        let applied = match self.store.get_mut(id) {
            Some(row) => cost::recalculate(row),
            None => false,
        };
        let count = usize::from(applied);
        self.commit(&format!(
            "Recalculated {count} {}",
            noun(count, "row", "rows")
        ));
        applied
    }

    /// Recomputes derived cost cells for the whole table, top to bottom.
    /// Rows with unparseable inputs are skipped, not failed. Returns how
    /// many rows were rewritten.
    pub fn recalculate_all(&mut self) -> usize {
        let recalculated = self
            .store
            .rows_mut()
            .map(cost::recalculate)
            .filter(|&applied| applied)
            .count();
        self.commit(&format!(
            "Recalculated {recalculated} {}",
            noun(recalculated, "row", "rows")
        ));
        recalculated
    }

    // =========================================================================
    // Barcode Generation
    // =========================================================================

    /// Regenerates the barcode of one row unconditionally. Returns the new
    /// code, or `None` when `id` is stale.
    pub fn regenerate_barcode(&mut self, id: RowId) -> Option<String> {
        let stamp = Local::now().format(BARCODE_STAMP_FORMAT).to_string();
        let code = {
            let row = self.store.get(id)?;
            barcode::generate(row, &stamp, &mut rand::thread_rng())
        };
        self.store.set_field(id, Field::Barcode, code.clone());
        self.commit(&format!("Generated barcode {code}"));
        Some(code)
    }

    /// Batch barcode generation with two distinct modes:
    ///
    /// - empty `selection`: walk the whole table and fill only the rows whose
    ///   barcode cell is blank, leaving existing codes alone
    /// - non-empty `selection`: regenerate every selected row, replacing
    ///   whatever code it had
    ///
    /// Stale ids are skipped. Returns how many codes were written.
    pub fn generate_barcodes(&mut self, selection: &[RowId]) -> usize {
        let stamp = Local::now().format(BARCODE_STAMP_FORMAT).to_string();
        let mut rng = rand::thread_rng();

        let overwrite = !selection.is_empty();
        let targets = if overwrite {
            selection.to_vec()
        } else {
            self.store.ids()
        };

        let mut generated = 0;
        for id in targets {
            let code = {
                let Some(row) = self.store.get(id) else { continue };
                if !overwrite && !row.barcode.trim().is_empty() {
                    continue;
                }
                barcode::generate(row, &stamp, &mut rng)
            };
            self.store.set_field(id, Field::Barcode, code);
            generated += 1;
        }

        self.commit(&format!(
            "Generated {generated} {}",
            noun(generated, "barcode", "barcodes")
        ));
        generated
    }

    // =========================================================================
    // Receiving
    // =========================================================================

    /// Handles one scanner submission.
    ///
    /// The input is whitespace-trimmed, then matched against stored barcodes
    /// top to bottom; the first match is authoritative even when later rows
    /// carry the same code. A pending match gets the current timestamp; a
    /// received match is left untouched and reported as already scanned.
    ///
    /// All four outcomes report a status line and autosave, so the frontend
    /// can unconditionally clear its scan buffer afterwards.
    pub fn submit_scan(&mut self, input: &str) -> ScanOutcome {
        let token = input.trim();
        let outcome = if token.is_empty() {
            ScanOutcome::EmptyInput
        } else {
            match self.store.find_by_barcode(token) {
                Some(id) => self.receive(id, token),
                None => ScanOutcome::NotFound {
                    barcode: token.to_owned(),
                },
            }
        };

        let status = match &outcome {
            ScanOutcome::Success { barcode, timestamp } => {
                format!("Received {barcode} at {timestamp}")
            }
            ScanOutcome::AlreadyScanned { barcode } => format!("Already scanned: {barcode}"),
            ScanOutcome::NotFound { barcode } => format!("Barcode not found: {barcode}"),
            ScanOutcome::EmptyInput => "Scan input was empty".to_owned(),
        };
        self.commit(&status);
        outcome
    }

    /// Stamps the matched row received, unless it already was.
    fn receive(&mut self, id: RowId, token: &str) -> ScanOutcome {
        let already = self
            .store
            .get(id)
            .map_or(false, |row| ReceiptState::of(row).is_received());
        if already {
            return ScanOutcome::AlreadyScanned {
                barcode: token.to_owned(),
            };
        }

        let timestamp = Local::now().format(RECEIPT_TIMESTAMP_FORMAT).to_string();
        self.store
            .set_field(id, Field::ScanTimestamp, timestamp.clone());
        ScanOutcome::Success {
            barcode: token.to_owned(),
            timestamp,
        }
    }

    /// Resets the receipt state of every row in `selection` back to pending,
    /// letting them be scanned again. Returns how many rows actually changed
    /// state (already-pending rows are wiped but not counted).
    pub fn clear_scan(&mut self, selection: &[RowId]) -> usize {
        if selection.is_empty() {
            self.commit("No rows selected");
            return 0;
        }

        let mut cleared = 0;
        for id in selection.iter().copied() {
            if let Some(row) = self.store.get_mut(id) {
                if ReceiptState::of(row).is_received() {
                    cleared += 1;
                }
                row.scan_timestamp.clear();
            }
        }
        self.commit(&format!(
            "Cleared receipt state on {cleared} {}",
            noun(cleared, "row", "rows")
        ));
        cleared
    }

    // =========================================================================
    // Bulk Paste
    // =========================================================================

    /// Overlays a rectangular-ish block of cells onto the grid.
    ///
    /// `block` is rows of cells as produced by
    /// [`intake_core::paste::split_block`]; ragged line widths are fine. The
    /// block lands with its top-left cell at `anchor` (or the grid's
    /// top-left when `None`) and the table grows with period-stamped blank
    /// rows until it fits. Cells that would land on the receipt column or
    /// past the last column are dropped; everything else is written verbatim,
    /// empty cells included.
    ///
    /// A block with no usable content (no lines, or nothing but whitespace)
    /// is a complete no-op: nothing is written and nothing autosaves.
    ///
    /// Returns the number of block lines applied.
    pub fn paste_block(&mut self, anchor: Option<PasteAnchor>, block: &[Vec<String>]) -> usize {
        let all_blank = block
            .iter()
            .all(|line| line.iter().all(|cell| cell.trim().is_empty()));
        if all_blank {
            self.report("Nothing to paste");
            return 0;
        }

        let start_row = anchor.map_or(0, |a| a.row);
        let start_column = anchor.map_or(0, |a| a.column);

        let needed = (start_row + block.len()).saturating_sub(self.store.len());
        let period = current_period();
        for _ in 0..needed {
            self.store.insert(Row::with_period(period.as_str()));
        }

        for (line_offset, line) in block.iter().enumerate() {
            let Some(id) = self.store.id_at(start_row + line_offset) else {
                continue;
            };
            for (cell_offset, cell) in line.iter().enumerate() {
                let Some(field) = start_column
                    .checked_add(cell_offset)
                    .and_then(Field::from_index)
                else {
                    continue;
                };
                if field.is_scan() {
                    continue;
                }
                self.store.set_field(id, field, cell.clone());
            }
        }

        let pasted = block.len();
        self.commit(&format!("Pasted {pasted} {}", noun(pasted, "row", "rows")));
        pasted
    }

    /// Splits raw clipboard text into a block and pastes it. See
    /// [`paste_block`](LedgerEngine::paste_block).
    pub fn paste_text(&mut self, anchor: Option<PasteAnchor>, raw: &str) -> usize {
        self.paste_block(anchor, &paste::split_block(raw))
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Writes the table to `path` as a snapshot. Read-only with respect to
    /// the table, so no autosave happens.
    pub fn save_to(&mut self, path: &Path) -> SnapshotResult<()> {
        write_snapshot(path, self.store.rows())?;
        let count = self.store.len();
        self.report(&format!(
            "Saved {count} {} to {}",
            noun(count, "row", "rows"),
            path.display()
        ));
        Ok(())
    }

    /// Replaces the table with the snapshot at `path`.
    ///
    /// The file is parsed completely before anything changes; on any error
    /// the current table stays exactly as it was. Returns the number of rows
    /// loaded.
    pub fn load_from(&mut self, path: &Path) -> SnapshotResult<usize> {
        let rows = read_snapshot(path)?;
        let count = rows.len();
        self.store.replace_all(rows);
        self.commit(&format!(
            "Loaded {count} {} from {}",
            noun(count, "row", "rows"),
            path.display()
        ));
        Ok(count)
    }

    /// Rewrites the session file now.
    ///
    /// This is the loud variant used at shutdown or by callers that want the
    /// error; the per-operation autosave goes through the quiet path instead.
    /// With no session file configured this is a no-op.
    pub fn autosave(&self) -> SnapshotResult<()> {
        if let Some(path) = &self.autosave_path {
            write_snapshot(path, self.store.rows())?;
        }
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Autosave that never fails the operation it runs after.
    fn autosave_quietly(&mut self) {
        if let Err(err) = self.autosave() {
            warn!("autosave failed: {err}");
        }
    }

    /// Seals a completed mutation: autosave, then one status line.
    fn commit(&mut self, status: &str) {
        self.autosave_quietly();
        self.report(status);
    }

    /// Pushes one status line to the hook, if installed.
    fn report(&mut self, status: &str) {
        debug!(status, "operation finished");
        if let Some(hook) = self.status_hook.as_mut() {
            hook(status);
        }
    }
}

/// Current month in the ledger's period notation.
fn current_period() -> String {
    Local::now().format(PERIOD_FORMAT).to_string()
}

/// Picks the singular or plural noun for a count.
fn noun(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
