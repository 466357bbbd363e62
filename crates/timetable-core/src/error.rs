//! Core error types for timetable-core.
//!
//! Caller-side mistakes (unknown course, broken config file, unreadable
//! catalog) are errors. Rejected selections are not: they come back as a
//! [`crate::selection::Rejection`] inside a normal outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timetable-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Catalog lookup and parsing errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Plan book errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML write errors
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range in {section}: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange { section: String, start: f64, end: f64 },
}

/// Catalog errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No course with this code
    #[error("Unknown course: {0}")]
    UnknownCourse(String),

    /// Course exists but has no such section
    #[error("Course {code} has no section {section}")]
    UnknownSection { code: String, section: String },

    /// Catalog file could not be understood
    #[error("Failed to parse catalog {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Plan book errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Plan names must contain something besides whitespace
    #[error("Plan name cannot be empty")]
    EmptyName,

    /// Nothing in the plan matches the given course or uid
    #[error("'{0}' is not in the current plan")]
    NotAdded(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
