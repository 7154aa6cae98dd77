//! Configuration types and parsing for graph-admin.yml

use crate::backend::GraphBackend;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Config file looked up in the invocation directory
pub const CONFIG_FILE_NAME: &str = "graph-admin.yml";

/// Tool configuration. Every field has a default, so the file is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Host the published graph ports are reachable on
    #[serde(default = "default_host")]
    pub host: String,

    /// Blazegraph container and endpoint settings
    #[serde(default)]
    pub blazegraph: BlazegraphConfig,

    /// AllegroGraph container and endpoint settings
    #[serde(default)]
    pub agraph: AgraphConfig,

    /// YASGUI container settings
    #[serde(default)]
    pub yasgui: YasguiConfig,

    /// Readiness polling after a graph container starts
    #[serde(default)]
    pub readiness: ReadinessConfig,
}

/// Blazegraph settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlazegraphConfig {
    /// Container image
    #[serde(default = "default_blazegraph_image")]
    pub image: String,

    /// Namespace (knowledge base) data is loaded into
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for BlazegraphConfig {
    fn default() -> Self {
        Self {
            image: default_blazegraph_image(),
            namespace: default_namespace(),
        }
    }
}

/// AllegroGraph settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgraphConfig {
    /// Container image
    #[serde(default = "default_agraph_image")]
    pub image: String,

    /// Repository data is loaded into; created on first load
    #[serde(default = "default_namespace")]
    pub repository: String,

    /// Superuser the container is started with
    #[serde(default = "default_agraph_user")]
    pub user: String,

    /// Superuser password
    #[serde(default = "default_agraph_password")]
    pub password: String,
}

impl Default for AgraphConfig {
    fn default() -> Self {
        Self {
            image: default_agraph_image(),
            repository: default_namespace(),
            user: default_agraph_user(),
            password: default_agraph_password(),
        }
    }
}

/// YASGUI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YasguiConfig {
    /// Container image
    #[serde(default = "default_yasgui_image")]
    pub image: String,
}

impl Default for YasguiConfig {
    fn default() -> Self {
        Self {
            image: default_yasgui_image(),
        }
    }
}

/// Readiness polling: fixed interval, bounded total wait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadinessConfig {
    /// Seconds between readiness checks
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Seconds to wait before giving up
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ReadinessConfig {
    /// Delay between readiness checks
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Timeout ceiling
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_blazegraph_image() -> String {
    "lyrasis/blazegraph:2.1.5".to_string()
}

fn default_agraph_image() -> String {
    "franzinc/agraph:v7.3.0".to_string()
}

fn default_yasgui_image() -> String {
    "erikap/yasgui:latest".to_string()
}

fn default_namespace() -> String {
    "kb".to_string()
}

fn default_agraph_user() -> String {
    "admin".to_string()
}

fn default_agraph_password() -> String {
    "pass".to_string()
}

fn default_interval_secs() -> u64 {
    2
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            blazegraph: BlazegraphConfig::default(),
            agraph: AgraphConfig::default(),
            yasgui: YasguiConfig::default(),
            readiness: ReadinessConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `graph-admin.yml` from `dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            log::debug!("Loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Container image for a backend
    pub fn image_for(&self, backend: GraphBackend) -> &str {
        match backend {
            GraphBackend::Blazegraph => &self.blazegraph.image,
            GraphBackend::AGraph => &self.agraph.image,
        }
    }

    /// Path of the backend's SPARQL endpoint, e.g. `/bigdata/namespace/kb/sparql`
    pub fn sparql_path(&self, backend: GraphBackend) -> String {
        match backend {
            GraphBackend::Blazegraph => {
                format!("/bigdata/namespace/{}/sparql", self.blazegraph.namespace)
            }
            GraphBackend::AGraph => format!("/repositories/{}", self.agraph.repository),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.host.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "host cannot be empty".to_string(),
            });
        }

        for (field, image) in [
            ("blazegraph.image", &self.blazegraph.image),
            ("agraph.image", &self.agraph.image),
            ("yasgui.image", &self.yasgui.image),
        ] {
            if image.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{} cannot be empty", field),
                });
            }
        }

        if self.blazegraph.namespace.is_empty() || self.agraph.repository.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "blazegraph.namespace and agraph.repository cannot be empty".to_string(),
            });
        }

        let readiness = &self.readiness;
        if readiness.interval_secs == 0 || readiness.timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "readiness.interval_secs and readiness.timeout_secs must be positive"
                    .to_string(),
            });
        }
        if readiness.interval_secs > readiness.timeout_secs {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "readiness.interval_secs ({}) exceeds readiness.timeout_secs ({})",
                    readiness.interval_secs, readiness.timeout_secs
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
