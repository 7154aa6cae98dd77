//! Error types for ga-core

use thiserror::Error;

/// Core error type for graph-admin
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: IO error with file path context
    #[error("[E004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E005: Invalid container / graph name
    #[error("[E005] Invalid graph name '{name}': {reason}")]
    InvalidGraphName { name: String, reason: String },

    /// E006: A named-graph IRI could not be derived for a source
    #[error("[E006] Cannot derive graph IRI for '{location}': {reason}")]
    InvalidGraphIri { location: String, reason: String },

    /// Manifest errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Errors raised while reading or parsing a load manifest.
///
/// Always fatal: they are reported before any container or store is touched.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// M001: Manifest file does not exist
    #[error("[M001] Manifest file not found: {path}")]
    NotFound { path: String },

    /// M002: Manifest file exists but could not be read
    #[error("[M002] Failed to read manifest '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// M003: A manifest line could not be parsed
    #[error("[M003] Malformed manifest entry at {origin}:{line}: {reason}")]
    Malformed {
        origin: String,
        line: usize,
        reason: String,
    },

    /// M004: Manifest contained no data sources
    #[error("[M004] Manifest {origin} contains no data sources")]
    Empty { origin: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
