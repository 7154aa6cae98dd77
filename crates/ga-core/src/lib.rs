//! ga-core - Core library for graph-admin
//!
//! This crate provides the shared data model (data sources, load manifests,
//! graph targets), configuration parsing, and the error types used by the
//! container, store, and CLI crates.

pub mod backend;
pub mod config;
pub mod error;
pub mod graph_name;
pub mod manifest;
pub mod source;

pub use backend::{GraphBackend, GraphTarget, DEFAULT_PORT};
pub use config::Config;
pub use error::{CoreError, CoreResult, ManifestError};
pub use graph_name::GraphName;
pub use manifest::{LoadManifest, DEFAULT_MANIFEST_FILE};
pub use source::{SourceEntry, SourceKind, CLOUD_PREFIX};
