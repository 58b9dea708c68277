//! # Well-Known File Locations
//!
//! Resolves where the autosave snapshot and the settings file live.
//!
//! ## Resolution Order
//! ```text
//! 1. INTAKE_DATA_DIR environment variable   (tests, portable installs)
//! 2. Per-user data directory via ProjectDirs:
//!    ~/.local/share/intake/                 (Linux)
//!    ~/Library/Application Support/intake/  (macOS)
//!    %APPDATA%\intake\data\                 (Windows)
//! ```
//!
//! The directory is created on resolution so callers can write into it
//! immediately.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{SnapshotError, SnapshotResult};

/// File name of the autosave snapshot inside the data directory.
pub const AUTOSAVE_FILE: &str = "last_session.csv";

/// File name of the collaborator settings inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "INTAKE_DATA_DIR";

fn project_dirs() -> SnapshotResult<ProjectDirs> {
    ProjectDirs::from("io", "intake", "intake").ok_or(SnapshotError::NoDataDir)
}

/// Returns the data directory, creating it if needed.
pub fn data_dir() -> SnapshotResult<PathBuf> {
    let dir = match std::env::var(DATA_DIR_ENV) {
        Ok(custom) if !custom.trim().is_empty() => {
            debug!(dir = %custom, "using data directory from environment");
            PathBuf::from(custom)
        }
        _ => project_dirs()?.data_dir().to_path_buf(),
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the full path of the autosave snapshot.
pub fn autosave_path() -> SnapshotResult<PathBuf> {
    Ok(data_dir()?.join(AUTOSAVE_FILE))
}

/// Returns the default settings file path, if a config directory exists on
/// this platform. Honors the same environment override as [`data_dir`] so a
/// portable install keeps everything in one place.
pub fn settings_path() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
        if !custom.trim().is_empty() {
            return Some(PathBuf::from(custom).join(SETTINGS_FILE));
        }
    }
    ProjectDirs::from("io", "intake", "intake")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

// =============================================================================
// Unit Tests
// =============================================================================
