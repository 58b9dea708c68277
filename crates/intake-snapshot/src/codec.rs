//! # Snapshot Codec
//!
//! Encodes and decodes the ledger snapshot: UTF-8 delimited text, one header
//! row carrying the 11 canonical column names, one record per ledger row,
//! standard quoting.
//!
//! ## Decode Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HEADERS DECIDE, POSITIONS DON'T                                        │
//! │                                                                         │
//! │  • Columns may appear in any order; each is located by header name      │
//! │  • Unknown extra columns are ignored                                    │
//! │  • A record shorter than the header row reads missing cells as empty    │
//! │  • A UTF-8 BOM on the first header is tolerated                         │
//! │  • ANY required header absent ⇒ MissingColumns, no partial result       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The codec never looks at cell content: a snapshot faithfully round-trips
//! whatever text the grid held, junk included.

use std::path::Path;

use tracing::{debug, info};

use intake_core::{Field, Row};

use crate::error::{SnapshotError, SnapshotResult};

// =============================================================================
// Encode
// =============================================================================

/// Writes all rows to `path`, header row first, in canonical column order.
///
/// Overwrites any existing file. The parent directory must already exist;
/// the well-known locations in [`crate::paths`] create theirs on resolution.
pub fn write_snapshot<'a, I>(path: &Path, rows: I) -> SnapshotResult<()>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(Field::ALL.iter().map(|f| f.header()))?;

    let mut count: usize = 0;
    for row in rows {
        writer.write_record(Field::ALL.iter().map(|f| row.get(*f)))?;
        count += 1;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = count, "snapshot written");
    Ok(())
}

// =============================================================================
// Decode
// =============================================================================

/// Reads a complete snapshot from `path`.
///
/// Fails with [`SnapshotError::MissingColumns`] when any required header is
/// absent, listing every missing name in schema order. The caller owns the
/// swap: nothing is returned unless the whole file decoded.
pub fn read_snapshot(path: &Path) -> SnapshotResult<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();

    // Resolve each field to its column position by header name.
    let mut positions = Vec::with_capacity(Field::COUNT);
    let mut missing = Vec::new();
    for field in Field::ALL {
        let found = headers.iter().position(|header| {
            let name = header.strip_prefix('\u{feff}').unwrap_or(header);
            name == field.header()
        });
        match found {
            Some(position) => positions.push(position),
            None => missing.push(field.header().to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(SnapshotError::missing_columns(missing));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Row::default();
        for (field, position) in Field::ALL.iter().zip(&positions) {
            row.set(*field, record.get(*position).unwrap_or(""));
        }
        rows.push(row);
    }

    info!(path = %path.display(), rows = rows.len(), "snapshot loaded");
    Ok(rows)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Row> {
        let mut first = Row::with_period("2024-05");
        first.item_number = "17".into();
        first.sku_name = "mug 01".into();
        first.product_name = "Blue mug, 350ml".into();
        first.quantity = "4".into();
        first.unit_price = "25".into();
        first.shipping_total = "20".into();
        first.total_cost = "120.00".into();
        first.unit_cost = "30.00".into();
        first.barcode = "MUG01-202405-7KQX2N".into();
        first.scan_timestamp = "2024-05-17 14:03:59".into();

        let mut second = Row::with_period("2024-05");
        second.product_name = "has \"quotes\" and, commas".into();

        vec![first, second, Row::default()]
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.csv");

        let rows = sample_rows();
        write_snapshot(&path, rows.iter()).unwrap();
        let loaded = read_snapshot(&path).unwrap();

        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_header_row_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.csv");
        write_snapshot(&path, std::iter::empty::<&Row>()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header_line = text.lines().next().unwrap();
        assert_eq!(
            header_line,
            "period,item_number,sku_name,product_name,quantity,unit_price,\
             shipping_total,total_cost,unit_cost,barcode,scan_timestamp"
        );
    }

    #[test]
    fn test_columns_located_by_header_not_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reordered.csv");
        std::fs::write(
            &path,
            "barcode,period,item_number,sku_name,product_name,quantity,\
             unit_price,shipping_total,total_cost,unit_cost,scan_timestamp\n\
             CODE-1,2024-05,7,,,,,,,,\n",
        )
        .unwrap();

        let rows = read_snapshot(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].barcode, "CODE-1");
        assert_eq!(rows[0].period, "2024-05");
        assert_eq!(rows[0].item_number, "7");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.csv");
        std::fs::write(
            &path,
            "period,item_number,sku_name,product_name,quantity,unit_price,\
             shipping_total,total_cost,unit_cost,barcode,scan_timestamp,notes\n\
             2024-05,,,,,,,,,,,\"ignore me\"\n",
        )
        .unwrap();

        let rows = read_snapshot(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].period, "2024-05");
    }

    #[test]
    fn test_short_records_read_missing_cells_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        std::fs::write(
            &path,
            "period,item_number,sku_name,product_name,quantity,unit_price,\
             shipping_total,total_cost,unit_cost,barcode,scan_timestamp\n\
             2024-05,9\n",
        )
        .unwrap();

        let rows = read_snapshot(&path).unwrap();
        assert_eq!(rows[0].period, "2024-05");
        assert_eq!(rows[0].item_number, "9");
        assert_eq!(rows[0].scan_timestamp, "");
    }

    #[test]
    fn test_missing_columns_abort_with_names_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "period,quantity\n2024-05,4\n").unwrap();

        let err = read_snapshot(&path).unwrap_err();
        match err {
            SnapshotError::MissingColumns { missing } => {
                assert_eq!(missing.first().map(String::as_str), Some("item_number"));
                assert!(missing.contains(&"scan_timestamp".to_string()));
                assert_eq!(missing.len(), 9);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_utf8_bom_on_first_header_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        std::fs::write(
            &path,
            "\u{feff}period,item_number,sku_name,product_name,quantity,unit_price,\
             shipping_total,total_cost,unit_cost,barcode,scan_timestamp\n\
             2024-05,,,,,,,,,,\n",
        )
        .unwrap();

        let rows = read_snapshot(&path).unwrap();
        assert_eq!(rows[0].period, "2024-05");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_snapshot(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
        assert!(!err.is_schema_error());
    }
}
