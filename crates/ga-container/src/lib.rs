//! ga-container - Container lifecycle for graph-admin
//!
//! This crate provides the `ContainerRuntime` trait, its Docker Engine
//! implementation, readiness polling, and the `ContainerManager` that
//! initializes graph containers and attaches YASGUI to them.

pub mod docker;
pub mod endpoint;
pub mod error;
pub mod manager;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod readiness;
pub mod runtime;

pub use docker::DockerRuntime;
pub use endpoint::ExternalEndpoint;
pub use error::{ContainerError, ContainerResult};
pub use manager::{ContainerManager, InitializeRequest};
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryRuntime;
pub use readiness::{wait_until_ready, RetryPolicy};
pub use runtime::{ContainerInfo, ContainerRuntime, ContainerSpec, PublishedPort};
