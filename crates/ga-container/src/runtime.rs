//! Container runtime trait definition

use crate::error::ContainerResult;
use async_trait::async_trait;
use ga_core::GraphName;

/// A container port published on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPort {
    /// Port inside the container
    pub container_port: u16,
    /// Host interface to bind, all interfaces when `None`
    pub host_ip: Option<String>,
    /// Port on the host
    pub host_port: u16,
}

impl PublishedPort {
    /// Publish `container_port` on `host_port` on all host interfaces
    pub fn new(container_port: u16, host_port: u16) -> Self {
        Self {
            container_port,
            host_ip: None,
            host_port,
        }
    }
}

/// What to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Container name
    pub name: GraphName,
    /// Image reference, pulled when absent locally
    pub image: String,
    /// Environment as `KEY=value` pairs
    pub env: Vec<String>,
    /// Ports to publish
    pub ports: Vec<PublishedPort>,
    /// Size of `/dev/shm` in bytes
    pub shm_size: Option<i64>,
}

/// What the runtime reports about an existing container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Runtime-assigned id
    pub id: String,
    /// Container name without the leading `/`
    pub name: String,
    /// Image reference the container was created from
    pub image: String,
    /// Whether the container is running
    pub running: bool,
    /// Address on the runtime's internal network
    pub ip_address: Option<String>,
    /// Published ports
    pub ports: Vec<PublishedPort>,
}

impl ContainerInfo {
    /// Host port a container port is published on
    pub fn host_port(&self, container_port: u16) -> Option<u16> {
        self.ports
            .iter()
            .find(|p| p.container_port == container_port)
            .map(|p| p.host_port)
    }
}

/// Container runtime abstraction
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Look up a container by name, running or not
    async fn inspect(&self, name: &GraphName) -> ContainerResult<Option<ContainerInfo>>;

    /// Stop and remove a container by name
    async fn remove(&self, name: &GraphName) -> ContainerResult<()>;

    /// Pull the image if needed, then create and start a container
    async fn run(&self, spec: &ContainerSpec) -> ContainerResult<ContainerInfo>;

    /// Runtime type identifier for logging
    fn runtime_type(&self) -> &'static str;
}
