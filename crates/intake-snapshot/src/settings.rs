//! # Collaborator Settings
//!
//! A small persisted preference file for presentation collaborators: today it
//! remembers the last explicit save/load target so the next session's bare
//! `save`/`load` can reuse it.
//!
//! ## Failure Policy
//! Settings are comfort, not state. Loading falls back to defaults on any
//! failure (missing file, bad TOML, inaccessible directory) with a `warn`;
//! saving returns a result the caller may log but must never treat as fatal.
//! The ledger itself never depends on this file.
//!
//! ## File Format
//! ```toml
//! # settings.toml
//! last_snapshot_path = "/home/amara/ledgers/may-intake.csv"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SnapshotError, SnapshotResult};
use crate::paths;

/// Persisted collaborator preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// The last path handed to explicit save/load, remembered across runs.
    #[serde(default)]
    pub last_snapshot_path: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `path` (or the default location), falling back to
    /// defaults on any failure.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("failed to load settings: {e}; using defaults");
                Settings::default()
            }
        }
    }

    /// Loads settings, surfacing the failure. A missing file is not a
    /// failure; it reads as defaults.
    pub fn load(path: Option<PathBuf>) -> SnapshotResult<Self> {
        let Some(path) = path.or_else(paths::settings_path) else {
            return Err(SnapshotError::NoDataDir);
        };
        if !path.exists() {
            debug!(path = %path.display(), "no settings file; using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let settings = toml::from_str(&contents)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Saves settings to `path` (or the default location).
    ///
    /// Best-effort at the call site: log the error, never propagate it as
    /// fatal.
    pub fn save(&self, path: Option<PathBuf>) -> SnapshotResult<()> {
        let Some(path) = path.or_else(paths::settings_path) else {
            return Err(SnapshotError::NoDataDir);
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Records a new last-used snapshot target.
    pub fn remember_snapshot_path(&mut self, path: impl AsRef<Path>) {
        self.last_snapshot_path = Some(path.as_ref().to_path_buf());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.remember_snapshot_path("/tmp/ledger.csv");
        settings.save(Some(path.clone())).unwrap();

        let loaded = Settings::load(Some(path)).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(
            loaded.last_snapshot_path.as_deref(),
            Some(Path::new("/tmp/ledger.csv"))
        );
    }

    #[test]
    fn test_missing_file_reads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_bad_toml_falls_back_with_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "last_snapshot_path = [not toml").unwrap();

        assert!(Settings::load(Some(path.clone())).is_err());
        assert_eq!(
            Settings::load_or_default(Some(path)),
            Settings::default()
        );
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("settings.toml");
        Settings::default().save(Some(path.clone())).unwrap();
        assert!(path.is_file());
    }
}
