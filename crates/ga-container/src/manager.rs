//! Graph and UI container lifecycle
//!
//! The manager holds no state of its own: every operation asks the container
//! runtime what exists right now, by name.

use crate::endpoint::ExternalEndpoint;
use crate::error::{ContainerError, ContainerResult};
use crate::readiness::{wait_until_ready, RetryPolicy};
use crate::runtime::{ContainerInfo, ContainerRuntime, ContainerSpec, PublishedPort};
use ga_core::{Config, GraphBackend, GraphName, GraphTarget};
use std::future::Future;

/// Port the YASGUI web server listens on inside its container
pub const YASGUI_CONTAINER_PORT: u16 = 80;

/// `/dev/shm` size AllegroGraph needs for its shared buffers (1 GiB)
const AGRAPH_SHM_SIZE: i64 = 1 << 30;

/// Parameters of `initialize_graph`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeRequest {
    /// Container name
    pub name: GraphName,
    /// Backend to start
    pub backend: GraphBackend,
    /// Host port to publish the backend on
    pub port: u16,
    /// Replace an existing container with the same name
    pub remove_previous: bool,
}

/// Creates, resolves, and removes graph containers
pub struct ContainerManager<'a> {
    runtime: &'a dyn ContainerRuntime,
    config: &'a Config,
}

impl<'a> ContainerManager<'a> {
    /// Create a manager over a runtime
    pub fn new(runtime: &'a dyn ContainerRuntime, config: &'a Config) -> Self {
        Self { runtime, config }
    }

    /// Container spec for a graph backend
    pub fn graph_spec(&self, request: &InitializeRequest) -> ContainerSpec {
        let (env, shm_size) = match request.backend {
            GraphBackend::Blazegraph => (Vec::new(), None),
            GraphBackend::AGraph => (
                vec![
                    format!("AGRAPH_SUPER_USER={}", self.config.agraph.user),
                    format!("AGRAPH_SUPER_PASSWORD={}", self.config.agraph.password),
                ],
                Some(AGRAPH_SHM_SIZE),
            ),
        };

        ContainerSpec {
            name: request.name.clone(),
            image: self.config.image_for(request.backend).to_string(),
            env,
            ports: vec![PublishedPort::new(
                request.backend.container_port(),
                request.port,
            )],
            shm_size,
        }
    }

    /// Start a graph container and wait until `is_ready` reports it ready.
    ///
    /// An existing container with the same name is removed first when
    /// `remove_previous` is set; otherwise it is an error and nothing changes.
    /// A container that never becomes ready is left running.
    pub async fn initialize_graph<F, Fut>(
        &self,
        request: &InitializeRequest,
        is_ready: F,
    ) -> ContainerResult<GraphTarget>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        if self.runtime.inspect(&request.name).await?.is_some() {
            if !request.remove_previous {
                return Err(ContainerError::ContainerExists {
                    name: request.name.to_string(),
                });
            }
            log::info!("Removing {} container {}", request.backend, request.name);
            self.runtime.remove(&request.name).await?;
            log::info!("Container {} removed", request.name);
        }

        let spec = self.graph_spec(request);
        log::info!(
            "Running {} container {} ({}) on host port {} via {}",
            request.backend,
            request.name,
            spec.image,
            request.port,
            self.runtime.runtime_type()
        );
        let info = self.runtime.run(&spec).await?;

        let target = GraphTarget {
            name: request.name.clone(),
            backend: request.backend,
            port: request.port,
            container_id: info.id,
        };

        let policy = RetryPolicy::from_config(&self.config.readiness);
        wait_until_ready(&target.name, &policy, is_ready).await?;
        Ok(target)
    }

    /// Rebuild the `GraphTarget` of an existing container
    pub async fn resolve_graph(&self, name: &GraphName) -> ContainerResult<GraphTarget> {
        self.resolve(name).await.map(|(_, target)| target)
    }

    async fn resolve(&self, name: &GraphName) -> ContainerResult<(ContainerInfo, GraphTarget)> {
        let info = self
            .runtime
            .inspect(name)
            .await?
            .ok_or_else(|| ContainerError::ContainerNotFound {
                name: name.to_string(),
            })?;

        let backend =
            GraphBackend::from_image(&info.image).ok_or_else(|| ContainerError::UnknownBackend {
                name: name.to_string(),
                image: info.image.clone(),
            })?;
        let port = info
            .host_port(backend.container_port())
            .ok_or_else(|| ContainerError::PortNotPublished {
                name: name.to_string(),
                container_port: backend.container_port(),
            })?;

        let target = GraphTarget {
            name: name.clone(),
            backend,
            port,
            container_id: info.id.clone(),
        };
        Ok((info, target))
    }

    /// Start a YASGUI container querying the graph container `graph_name`.
    ///
    /// The UI is pointed at the graph's address on the runtime's internal
    /// network and published on `endpoint`. Nothing is started when the graph
    /// container does not exist.
    pub async fn run_yasgui(
        &self,
        graph_name: &GraphName,
        endpoint: &ExternalEndpoint,
    ) -> ContainerResult<ContainerInfo> {
        let (info, target) = self.resolve(graph_name).await?;
        let ip = info
            .ip_address
            .as_deref()
            .filter(|_| info.running)
            .ok_or_else(|| ContainerError::NotRunning {
                name: graph_name.to_string(),
            })?;

        let ui_name = graph_name.companion("yasgui");
        if self.runtime.inspect(&ui_name).await?.is_some() {
            return Err(ContainerError::ContainerExists {
                name: ui_name.to_string(),
            });
        }

        let sparql_endpoint = format!(
            "http://{}:{}{}",
            ip,
            target.backend.container_port(),
            self.config.sparql_path(target.backend)
        );
        let spec = ContainerSpec {
            name: ui_name,
            image: self.config.yasgui.image.clone(),
            env: vec![format!("DEFAULT_SPARQL_ENDPOINT={}", sparql_endpoint)],
            ports: vec![PublishedPort {
                container_port: YASGUI_CONTAINER_PORT,
                host_ip: endpoint.host.clone(),
                host_port: endpoint.port,
            }],
            shm_size: None,
        };

        log::info!(
            "Running YASGUI container {} on {} for {}",
            spec.name,
            endpoint,
            sparql_endpoint
        );
        self.runtime.run(&spec).await
    }

    /// Stop and remove a container
    pub async fn remove_graph(&self, name: &GraphName) -> ContainerResult<()> {
        if self.runtime.inspect(name).await?.is_none() {
            return Err(ContainerError::ContainerNotFound {
                name: name.to_string(),
            });
        }
        log::info!("Removing container {}", name);
        self.runtime.remove(name).await
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
