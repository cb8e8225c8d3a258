//! Core error types for northstar-core.
//!
//! This module defines the error hierarchy using thiserror. A missing goal
//! is not an error: lookups return `Ok(None)` and callers route to
//! onboarding instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::checkin::CheckInError;

/// Core error type for northstar-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Goal creation payload rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Check-in refused by the state machine
    #[error("Check-in rejected: {0}")]
    CheckIn(#[from] CheckInError),

    /// The store write failed; optimistic state has been rolled back
    #[error("Transient persistence failure: {message}")]
    Transient {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The user already owns a goal
    #[error("User '{user_id}' already has an active goal")]
    GoalExists { user_id: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Stored row could not be decoded
    #[error("Corrupt row in '{table}': {message}")]
    CorruptRow { table: String, message: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration or content file
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field missing or blank
    #[error("Missing required field '{0}'")]
    MissingField(String),

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Focus area not present in the mission content table
    #[error("Unknown focus area '{0}'")]
    UnknownFocusArea(String),

    /// Focus area registered under another category
    #[error("Focus area '{focus_area}' belongs to '{expected}', not '{actual}'")]
    FocusAreaCategory {
        focus_area: String,
        expected: String,
        actual: String,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if matches!(
                    err.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_sqlite_maps_to_locked() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        assert!(matches!(DatabaseError::from(err), DatabaseError::Locked));
    }

    #[test]
    fn other_sqlite_errors_map_to_query_failed() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(
            DatabaseError::from(err),
            DatabaseError::QueryFailed(_)
        ));
    }

    #[test]
    fn validation_error_messages_name_the_field() {
        let err = CoreError::from(ValidationError::MissingField("title".into()));
        assert_eq!(err.to_string(), "Validation error: Missing required field 'title'");
    }
}
