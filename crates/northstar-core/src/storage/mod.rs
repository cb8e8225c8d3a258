mod config;
pub mod database;
pub mod goal_store;
pub mod migrations;

pub use config::{
    Config, ContentConfig, CycleConfig, FinanceConfig, ProfileConfig, ProgressConfig,
};
pub use database::Database;
pub use goal_store::GoalStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the Northstar data directory.
///
/// `NORTHSTAR_HOME` wins when set. Otherwise `~/.config/northstar[-dev]/`,
/// with the `-dev` suffix when `NORTHSTAR_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("NORTHSTAR_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("NORTHSTAR_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("northstar-dev")
            } else {
                base_dir.join("northstar")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
