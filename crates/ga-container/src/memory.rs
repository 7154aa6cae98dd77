//! In-memory container runtime for tests

use crate::error::{ContainerError, ContainerResult};
use crate::runtime::{ContainerInfo, ContainerRuntime, ContainerSpec};
use async_trait::async_trait;
use ga_core::GraphName;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Runtime that keeps containers in a map and records every started spec
#[derive(Default)]
pub struct InMemoryRuntime {
    containers: Mutex<BTreeMap<String, ContainerInfo>>,
    started: Mutex<Vec<ContainerSpec>>,
}

impl InMemoryRuntime {
    /// Create an empty runtime
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing container without recording it as started
    pub fn insert(&self, info: ContainerInfo) {
        self.containers
            .lock()
            .unwrap()
            .insert(info.name.clone(), info);
    }

    /// Names of all containers, sorted
    pub fn names(&self) -> Vec<String> {
        self.containers.lock().unwrap().keys().cloned().collect()
    }

    /// Number of containers with `name`
    pub fn count_named(&self, name: &str) -> usize {
        self.containers
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.name == name)
            .count()
    }

    /// Specs passed to `run`, in order
    pub fn started(&self) -> Vec<ContainerSpec> {
        self.started.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContainerRuntime for InMemoryRuntime {
    async fn inspect(&self, name: &GraphName) -> ContainerResult<Option<ContainerInfo>> {
        Ok(self.containers.lock().unwrap().get(name.as_str()).cloned())
    }

    async fn remove(&self, name: &GraphName) -> ContainerResult<()> {
        self.containers
            .lock()
            .unwrap()
            .remove(name.as_str())
            .map(|_| ())
            .ok_or_else(|| ContainerError::ContainerNotFound {
                name: name.to_string(),
            })
    }

    async fn run(&self, spec: &ContainerSpec) -> ContainerResult<ContainerInfo> {
        let mut containers = self.containers.lock().unwrap();
        if containers.contains_key(spec.name.as_str()) {
            return Err(ContainerError::runtime(
                format!("create {}", spec.name),
                "name already in use",
            ));
        }

        let mut started = self.started.lock().unwrap();
        started.push(spec.clone());
        let seq = started.len();

        let info = ContainerInfo {
            id: format!("mem-{}", seq),
            name: spec.name.to_string(),
            image: spec.image.clone(),
            running: true,
            ip_address: Some(format!("172.17.0.{}", seq + 1)),
            ports: spec.ports.clone(),
        };
        containers.insert(info.name.clone(), info.clone());
        Ok(info)
    }

    fn runtime_type(&self) -> &'static str {
        "memory"
    }
}
