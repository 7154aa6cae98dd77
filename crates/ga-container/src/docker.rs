//! Docker Engine container runtime

use crate::error::{ContainerError, ContainerResult};
use crate::runtime::{ContainerInfo, ContainerRuntime, ContainerSpec, PublishedPort};
use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, InspectContainerOptions, RemoveContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use bollard::errors::Error as BollardError;
use bollard::image::CreateImageOptions;
use bollard::models::{ContainerInspectResponse, HostConfig, PortBinding, PortMap};
use bollard::Docker;
use futures::TryStreamExt;
use ga_core::GraphName;
use std::collections::HashMap;

/// Seconds a container gets to shut down before it is killed
const STOP_TIMEOUT_SECS: i64 = 10;

/// Docker Engine runtime over the local socket (or `DOCKER_HOST`)
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect using the platform defaults
    pub fn connect() -> ContainerResult<Self> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| ContainerError::Connection(e.to_string()))?;
        Ok(Self { docker })
    }

    /// Pull `image` unless it is already present locally
    async fn ensure_image(&self, image: &str) -> ContainerResult<()> {
        if self.docker.inspect_image(image).await.is_ok() {
            return Ok(());
        }

        let (repository, tag) = split_image_reference(image);
        log::info!("Pulling image {}:{}", repository, tag);
        let options = CreateImageOptions {
            from_image: repository,
            tag,
            ..Default::default()
        };
        self.docker
            .create_image(Some(options), None, None)
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| ContainerError::runtime(format!("pull image {}", image), e))?;
        Ok(())
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn inspect(&self, name: &GraphName) -> ContainerResult<Option<ContainerInfo>> {
        match self
            .docker
            .inspect_container(name.as_str(), None::<InspectContainerOptions>)
            .await
        {
            Ok(response) => Ok(Some(container_info(response))),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(ContainerError::runtime(format!("inspect {}", name), e)),
        }
    }

    async fn remove(&self, name: &GraphName) -> ContainerResult<()> {
        match self
            .docker
            .stop_container(
                name.as_str(),
                Some(StopContainerOptions {
                    t: STOP_TIMEOUT_SECS,
                }),
            )
            .await
        {
            Ok(()) => log::debug!("Stopped container {}", name),
            // 304: already stopped
            Err(BollardError::DockerResponseServerError {
                status_code: 304, ..
            }) => {}
            Err(e) if is_not_found(&e) => {
                return Err(ContainerError::ContainerNotFound {
                    name: name.to_string(),
                })
            }
            Err(e) => return Err(ContainerError::runtime(format!("stop {}", name), e)),
        }

        self.docker
            .remove_container(
                name.as_str(),
                Some(RemoveContainerOptions {
                    force: true,
                    ..Default::default()
                }),
            )
            .await
            .map_err(|e| ContainerError::runtime(format!("remove {}", name), e))
    }

    async fn run(&self, spec: &ContainerSpec) -> ContainerResult<ContainerInfo> {
        self.ensure_image(&spec.image).await?;

        let mut exposed_ports = HashMap::new();
        let mut port_bindings: PortMap = HashMap::new();
        for port in &spec.ports {
            let key = format!("{}/tcp", port.container_port);
            exposed_ports.insert(key.clone(), HashMap::new());
            port_bindings.insert(
                key,
                Some(vec![PortBinding {
                    host_ip: port.host_ip.clone(),
                    host_port: Some(port.host_port.to_string()),
                }]),
            );
        }

        let config = Config {
            image: Some(spec.image.clone()),
            env: Some(spec.env.clone()),
            exposed_ports: Some(exposed_ports),
            host_config: Some(HostConfig {
                port_bindings: Some(port_bindings),
                shm_size: spec.shm_size,
                ..Default::default()
            }),
            ..Default::default()
        };
        let options = CreateContainerOptions {
            name: spec.name.to_string(),
            platform: None,
        };

        self.docker
            .create_container(Some(options), config)
            .await
            .map_err(|e| ContainerError::runtime(format!("create {}", spec.name), e))?;
        self.docker
            .start_container(spec.name.as_str(), None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| ContainerError::runtime(format!("start {}", spec.name), e))?;

        self.inspect(&spec.name)
            .await?
            .ok_or_else(|| ContainerError::ContainerNotFound {
                name: spec.name.to_string(),
            })
    }

    fn runtime_type(&self) -> &'static str {
        "docker"
    }
}

fn is_not_found(err: &BollardError) -> bool {
    matches!(
        err,
        BollardError::DockerResponseServerError {
            status_code: 404,
            ..
        }
    )
}

/// Split `repo[:tag]` into repository and tag, defaulting the tag to `latest`.
///
/// A `:` inside a registry host (`registry:5000/repo`) is not a tag separator.
fn split_image_reference(image: &str) -> (&str, &str) {
    match image.rsplit_once(':') {
        Some((repository, tag)) if !tag.contains('/') => (repository, tag),
        _ => (image, "latest"),
    }
}

fn container_info(response: ContainerInspectResponse) -> ContainerInfo {
    let network = response.network_settings.as_ref();
    let ip_address = network
        .and_then(|n| n.ip_address.clone())
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            network
                .and_then(|n| n.networks.as_ref())
                .and_then(|nets| nets.values().find_map(|e| e.ip_address.clone()))
                .filter(|ip| !ip.is_empty())
        });

    // Live bindings are only reported for running containers; fall back to
    // the requested bindings otherwise.
    let port_map = network
        .and_then(|n| n.ports.clone())
        .filter(|ports| ports.values().any(Option::is_some))
        .or_else(|| {
            response
                .host_config
                .as_ref()
                .and_then(|h| h.port_bindings.clone())
        })
        .unwrap_or_default();

    ContainerInfo {
        id: response.id.unwrap_or_default(),
        name: response
            .name
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string(),
        image: response
            .config
            .and_then(|c| c.image)
            .unwrap_or_default(),
        running: response
            .state
            .and_then(|s| s.running)
            .unwrap_or(false),
        ip_address,
        ports: published_ports(&port_map),
    }
}

fn published_ports(port_map: &PortMap) -> Vec<PublishedPort> {
    let mut ports: Vec<PublishedPort> = port_map
        .iter()
        .filter_map(|(key, bindings)| {
            let container_port = key.split('/').next()?.parse().ok()?;
            let binding = bindings.as_ref()?.first()?;
            let host_port = binding.host_port.as_ref()?.parse().ok()?;
            Some(PublishedPort {
                container_port,
                host_ip: binding.host_ip.clone().filter(|ip| !ip.is_empty()),
                host_port,
            })
        })
        .collect();
    ports.sort_by_key(|p| p.container_port);
    ports
}
