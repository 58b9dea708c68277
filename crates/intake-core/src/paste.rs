//! # Clipboard Block Parsing
//!
//! Spreadsheets put tab-delimited text on the clipboard: one line per row,
//! one tab per column boundary. [`split_block`] turns that raw text into the
//! rectangular-ish block the bulk importer applies to the grid.
//!
//! Lines that are empty after trimming are dropped (trailing newlines from a
//! copy are not rows); cells are kept verbatim, untrimmed, because a leading
//! space in a product name is the user's business.

/// Splits raw clipboard text into lines of tab-separated cells.
///
/// ```rust
/// use intake_core::paste::split_block;
///
/// let block = split_block("a\tb\n\nc\td\te\n");
/// assert_eq!(block, vec![
///     vec!["a".to_string(), "b".to_string()],
///     vec!["c".to_string(), "d".to_string(), "e".to_string()],
/// ]);
/// ```
pub fn split_block(raw: &str) -> Vec<Vec<String>> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').map(str::to_owned).collect())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_input() {
        assert!(split_block("").is_empty());
        assert!(split_block("\n\n").is_empty());
        assert!(split_block("  \n\t\n").is_empty());
    }

    #[test]
    fn test_single_cell() {
        assert_eq!(split_block("x"), vec![vec!["x".to_string()]]);
    }

    #[test]
    fn test_ragged_block_is_preserved() {
        let block = split_block("a\tb\tc\nd\n");
        assert_eq!(block.len(), 2);
        assert_eq!(block[0].len(), 3);
        assert_eq!(block[1].len(), 1);
    }

    #[test]
    fn test_cells_are_kept_verbatim() {
        let block = split_block(" padded \tcell\n");
        assert_eq!(block[0][0], " padded ");
        assert_eq!(block[0][1], "cell");
    }

    #[test]
    fn test_trailing_tab_yields_trailing_empty_cell() {
        let block = split_block("a\t\n");
        assert_eq!(block[0], vec!["a".to_string(), String::new()]);
    }

    #[test]
    fn test_windows_line_endings() {
        let block = split_block("a\tb\r\nc\td\r\n");
        assert_eq!(block.len(), 2);
        assert_eq!(block[1], vec!["c".to_string(), "d".to_string()]);
    }
}
