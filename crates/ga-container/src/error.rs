//! Error types for ga-container

use thiserror::Error;

/// Container lifecycle errors
#[derive(Error, Debug)]
pub enum ContainerError {
    /// Container already exists (C001)
    #[error("[C001] Container '{name}' already exists. Pass --remove_previous_graph to replace it")]
    ContainerExists { name: String },

    /// Container not found (C002)
    #[error("[C002] Container '{name}' not found")]
    ContainerNotFound { name: String },

    /// Backend never became ready (C003)
    #[error("[C003] Container '{name}' did not become ready within {waited_secs}s ({attempts} checks). It was left running for inspection")]
    ContainerStartup {
        name: String,
        waited_secs: u64,
        attempts: u32,
    },

    /// Runtime connection failure (C004)
    #[error("[C004] Cannot connect to container runtime: {0}")]
    Connection(String),

    /// Runtime API call failed (C005)
    #[error("[C005] Container runtime failed to {operation}: {message}")]
    Runtime { operation: String, message: String },

    /// Container is not running a known graph backend (C006)
    #[error("[C006] Container '{name}' runs image '{image}', which is not a supported graph backend")]
    UnknownBackend { name: String, image: String },

    /// Backend port is not published to the host (C007)
    #[error("[C007] Container '{name}' does not publish port {container_port} to the host")]
    PortNotPublished { name: String, container_port: u16 },

    /// Container has no internal network address (C008)
    #[error("[C008] Container '{name}' is not running or has no network address")]
    NotRunning { name: String },
}

impl ContainerError {
    /// Build a `Runtime` error for a failed operation
    pub fn runtime(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ContainerError::Runtime {
            operation: operation.into(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for ContainerError
pub type ContainerResult<T> = Result<T, ContainerError>;
