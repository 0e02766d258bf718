//! Application configuration for data location and escalation policy.
//!
//! # Responsibility
//! - Carry the data directory and panic threshold as one plain value.
//! - Name the three backing data files in a single place.
//!
//! # Invariants
//! - Configuration is inert data; nothing here reads the environment.
//! - File names are fixed; only the data directory varies per install.

use crate::rules::PANIC_THRESHOLD;
use std::path::PathBuf;

/// File name of the rumour collection inside the data directory.
pub const RUMOURS_FILE: &str = "rumours.json";
/// File name of the report collection inside the data directory.
pub const REPORTS_FILE: &str = "reports.json";
/// File name of the user collection inside the data directory.
pub const USERS_FILE: &str = "users.json";

const DEFAULT_DATA_DIR: &str = "Data";

/// Runtime settings consumed by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the three JSON data files.
    pub data_dir: PathBuf,
    /// Report count at which a rumour escalates to panic status.
    pub panic_threshold: usize,
}

impl AppConfig {
    /// Creates a configuration with the default panic threshold.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            panic_threshold: PANIC_THRESHOLD,
        }
    }

    /// Returns the path of the rumours file.
    pub fn rumours_path(&self) -> PathBuf {
        self.data_dir.join(RUMOURS_FILE)
    }

    /// Returns the path of the reports file.
    pub fn reports_path(&self) -> PathBuf {
        self.data_dir.join(REPORTS_FILE)
    }

    /// Returns the path of the users file.
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
