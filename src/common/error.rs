//! Error types for persistence, settings and scene loading.

use thiserror::Error;

/// Text that names no display mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown display mode '{0}'")]
pub struct UnknownDisplayMode(pub String);

/// Errors restoring persisted overlay state. Fatal to the host's load step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("invalid value '{value}' for '{key}': not a display mode")]
    InvalidDisplayMode { key: String, value: String },
}

/// Errors loading the overlay settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid setting: {0}")]
    Validation(String),
}

/// Errors loading a scene file.
#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("Failed to read file: {0}")]
    FileRead(String),
    #[error("Failed to parse JSON: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}
