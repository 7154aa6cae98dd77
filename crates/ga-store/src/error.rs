//! Error types for ga-store

use thiserror::Error;

/// Failures while fetching or loading data
#[derive(Error, Debug)]
pub enum LoadError {
    /// Source could not be read (L001)
    #[error("[L001] Failed to fetch '{location}': {message}")]
    Fetch { location: String, message: String },

    /// Directory or prefix holds no N-Quads files (L002)
    #[error("[L002] No .nq files found under '{location}'")]
    NoQuadFiles { location: String },

    /// N-Quads syntax error (L003)
    #[error("[L003] Invalid N-Quads in '{file}': {message}")]
    Parse { file: String, message: String },

    /// HTTP request failed before a response arrived (L004)
    #[error("[L004] Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Backend answered with an error status (L005)
    #[error("[L005] {backend} returned HTTP {status}: {body}")]
    BadStatus {
        backend: &'static str,
        status: u16,
        body: String,
    },

    /// Graph IRI could not be derived (L006)
    #[error("[L006] Invalid graph IRI: {0}")]
    GraphIri(String),

    /// Backend is not answering requests (L007)
    #[error("[L007] {backend} is not ready to accept loads")]
    NotReady { backend: &'static str },
}

/// One source that could not be loaded.
///
/// Recovered at batch level: reported, then the next source is attempted.
#[derive(Error, Debug)]
#[error("Failed to load source '{location}': {source}")]
pub struct SourceLoadError {
    /// Location as written in the manifest
    pub location: String,
    /// Underlying failure
    pub source: LoadError,
}

/// Result type alias for LoadError
pub type StoreResult<T> = Result<T, LoadError>;
