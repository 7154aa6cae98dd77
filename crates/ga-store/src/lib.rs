//! ga-store - Triplestore layer for graph-admin
//!
//! This crate provides the `TripleStore` trait with Blazegraph and
//! AllegroGraph implementations, fetching of N-Quads sources from local disk
//! and Google Cloud Storage, and the batch `Loader` that lands each source in
//! its own named graph.

pub mod agraph;
pub mod blazegraph;
pub mod error;
pub mod factory;
pub mod fetch;
mod http;
pub mod loader;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod nquads;
#[cfg(test)]
mod test_server;
pub mod traits;

pub use agraph::AgraphStore;
pub use blazegraph::BlazegraphStore;
pub use error::{LoadError, SourceLoadError, StoreResult};
pub use factory::connect;
pub use fetch::{DefaultFetcher, DocumentRef, SourceFetcher};
pub use loader::{LoadReport, LoadedSource, Loader, SourceOutcome};
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryStore;
pub use traits::TripleStore;
