//! Triplestore trait definition

use crate::error::StoreResult;
use async_trait::async_trait;

/// Triplestore abstraction for graph-admin
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait TripleStore: Send + Sync {
    /// Whether the backend's HTTP server answers successfully
    async fn is_ready(&self) -> bool;

    /// Make sure the store can accept loads (e.g. create a missing repository)
    async fn prepare(&self) -> StoreResult<()>;

    /// Add N-Triples to the named graph `graph` in one request
    async fn bulk_load(&self, graph: &str, ntriples: String) -> StoreResult<()>;

    /// Store type identifier for logging
    fn store_type(&self) -> &'static str;
}
