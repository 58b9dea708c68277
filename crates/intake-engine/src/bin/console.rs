//! # Interactive Ledger Console
//!
//! Minimal line-driven frontend for a receiving session. Every command maps
//! one-to-one onto an engine operation, so this file doubles as living
//! documentation of the engine API.
//!
//! ## Usage
//! ```bash
//! # Restore (or start) the default per-user session
//! cargo run -p intake-engine --bin console
//!
//! # Work against an explicit session file
//! cargo run -p intake-engine --bin console -- --session ./intake.csv
//! ```
//!
//! ## Session Example
//! ```text
//! > add
//! · Added a new row
//! > edit 1 sku_name Blue Widget
//! ✓ sku_name updated
//! > gen
//! · Generated 1 barcode
//! > scan BLUEWIDGET-202508-7KQ2MN
//! · Received BLUEWIDGET-202508-7KQ2MN at 2025-08-24 10:15:42
//! ```
//!
//! Row numbers shown by `list` are 1-based positions; they are resolved to
//! stable row ids before any operation runs.

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use intake_core::{Field, ReceiptState};
use intake_engine::{LedgerEngine, PasteAnchor, RowId};
use intake_snapshot::{paths, Settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut session_override: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--session" | "-s" => {
                if i + 1 < args.len() {
                    session_override = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Intake Ledger Console");
                println!();
                println!("Usage: console [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --session <PATH>  Session file to restore and autosave");
                println!("                        (default: per-user data directory)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let session_path = match session_override {
        Some(path) => path,
        None => paths::autosave_path()?,
    };

    let mut settings = Settings::load_or_default(None);
    let mut engine = LedgerEngine::open(&session_path);
    engine.set_status_hook(|status| println!("· {status}"));

    println!("📦 Intake Ledger Console");
    println!("========================");
    println!("Session: {}", session_path.display());
    println!("Rows: {}", engine.len());
    println!("Type 'help' for commands.");
    println!();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "help" | "?" => print_help(),
            "columns" => {
                for field in Field::ALL {
                    println!("  {:>2}  {}", field.index() + 1, field.header());
                }
            }
            "list" | "ls" => print_table(&engine),
            "add" => {
                engine.add_row();
            }
            "del" | "rm" => {
                let ids = selected_ids(&engine, words);
                engine.delete_rows(&ids);
            }
            "edit" => {
                let row_word = words.next();
                let column_word = words.next();
                let value = words.collect::<Vec<_>>().join(" ");
                match (row_word, column_word) {
                    (Some(row_word), Some(column_word)) => {
                        edit_command(&mut engine, row_word, column_word, &value);
                    }
                    _ => println!("usage: edit <row> <column> <value>"),
                }
            }
            "gen" => {
                let rest: Vec<&str> = words.collect();
                if rest.is_empty() {
                    // No selection: fill every blank barcode in the table.
                    engine.generate_barcodes(&[]);
                } else {
                    let ids = selected_ids(&engine, rest.iter().copied());
                    if !ids.is_empty() {
                        engine.generate_barcodes(&ids);
                    }
                }
            }
            "recalc" => {
                let rest: Vec<&str> = words.collect();
                if rest.is_empty() {
                    engine.recalculate_all();
                } else {
                    for id in selected_ids(&engine, rest.iter().copied()) {
                        engine.recalculate_row(id);
                    }
                }
            }
            "scan" => {
                engine.submit_scan(words.next().unwrap_or(""));
            }
            "clear" => {
                let ids = selected_ids(&engine, words);
                engine.clear_scan(&ids);
            }
            "paste" => {
                println!("Paste tab-separated lines; finish with a single '.' on its own line.");
                let mut block_text = String::new();
                let mut entry = String::new();
                loop {
                    entry.clear();
                    if stdin.read_line(&mut entry)? == 0 {
                        break;
                    }
                    if entry.trim() == "." {
                        break;
                    }
                    block_text.push_str(&entry);
                }
                // Console pastes append below the existing rows.
                let anchor = PasteAnchor {
                    row: engine.len(),
                    column: 0,
                };
                engine.paste_text(Some(anchor), &block_text);
            }
            "save" => {
                let target = words
                    .next()
                    .map(PathBuf::from)
                    .or_else(|| settings.last_snapshot_path.clone());
                match target {
                    Some(path) => match engine.save_to(&path) {
                        Ok(()) => remember_target(&mut settings, &path),
                        Err(err) => println!("⚠ save failed: {err}"),
                    },
                    None => println!("usage: save <path>  (no remembered snapshot yet)"),
                }
            }
            "load" => {
                let target = words
                    .next()
                    .map(PathBuf::from)
                    .or_else(|| settings.last_snapshot_path.clone());
                match target {
                    Some(path) => match engine.load_from(&path) {
                        Ok(_) => remember_target(&mut settings, &path),
                        Err(err) => println!("⚠ load failed: {err}"),
                    },
                    None => println!("usage: load <path>  (no remembered snapshot yet)"),
                }
            }
            "quit" | "exit" | "q" => break,
            _ => println!("⚠ unknown command: {command} (try 'help')"),
        }
    }

    println!("✓ Session file is up to date.");
    Ok(())
}

/// Console output belongs to the operator; tracing stays quiet unless
/// RUST_LOG asks for more.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves 1-based row numbers to row ids, complaining about the rest.
fn selected_ids<'a>(
    engine: &LedgerEngine,
    words: impl Iterator<Item = &'a str>,
) -> Vec<RowId> {
    let mut ids = Vec::new();
    for word in words {
        let id = word
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|position| engine.store().id_at(position));
        match id {
            Some(id) => ids.push(id),
            None => println!("⚠ no such row: {word}"),
        }
    }
    ids
}

fn edit_command(engine: &mut LedgerEngine, row_word: &str, column_word: &str, value: &str) {
    let id = row_word
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|position| engine.store().id_at(position));
    let Some(id) = id else {
        println!("⚠ no such row: {row_word}");
        return;
    };
    let Some(field) = Field::from_header(column_word) else {
        println!("⚠ unknown column: {column_word} (try 'columns')");
        return;
    };

    if engine.edit_cell(id, field, value) {
        println!("✓ {} updated", field.header());
    } else {
        println!("⚠ {} only changes through scans", field.header());
    }
}

/// Remembers the last explicit snapshot target so bare `save`/`load` reuse it.
fn remember_target(settings: &mut Settings, path: &Path) {
    settings.remember_snapshot_path(path);
    if let Err(err) = settings.save(None) {
        warn!("could not persist settings: {err}");
    }
}

fn print_table(engine: &LedgerEngine) {
    if engine.is_empty() {
        println!("(empty table)");
        return;
    }
    println!(
        "{:>3}  {} {:<10} {:<14} {:>8} {:>10} {:>10}  {:<24} {}",
        "#", " ", "item", "sku", "qty", "total", "unit", "barcode", "received"
    );
    for (position, row) in engine.rows().enumerate() {
        let mark = if ReceiptState::of(row).is_received() {
            "✓"
        } else {
            " "
        };
        println!(
            "{:>3}  {} {:<10} {:<14} {:>8} {:>10} {:>10}  {:<24} {}",
            position + 1,
            mark,
            row.item_number,
            row.sku_name,
            row.quantity,
            row.total_cost,
            row.unit_cost,
            row.barcode,
            row.scan_timestamp,
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list                  show the table");
    println!("  add                   append a blank row");
    println!("  del <rows>            delete rows, e.g. del 2 4");
    println!("  edit <row> <col> <v>  write one cell, e.g. edit 2 quantity 12");
    println!("  gen [rows]            barcodes: no rows = fill blanks, rows = regenerate");
    println!("  recalc [rows]         recompute costs (no rows = whole table)");
    println!("  scan <code>           mark a barcode received");
    println!("  clear <rows>          reset receipt state");
    println!("  paste                 read tab-separated lines, end with '.'");
    println!("  save [path]           write a snapshot (remembers the path)");
    println!("  load [path]           replace the table from a snapshot");
    println!("  columns               list column names for 'edit'");
    println!("  quit                  leave (the session file is already up to date)");
}
