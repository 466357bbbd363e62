mod config;
pub mod plans;

pub use config::{CatalogConfig, Config, ConflictMode, ConflictsConfig, SelectionConfig};
pub use plans::PlanBook;

use std::path::PathBuf;

use crate::error::Result;

/// Environment variable that pins the data directory (tests, portable installs).
pub const DATA_DIR_ENV: &str = "TIMETABLE_DATA_DIR";

/// Returns the data directory, creating it if needed.
///
/// `TIMETABLE_DATA_DIR` wins when set. Otherwise `~/.config/timetable[-dev]/`,
/// with `TIMETABLE_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMETABLE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timetable-dev")
    } else {
        base_dir.join("timetable")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
