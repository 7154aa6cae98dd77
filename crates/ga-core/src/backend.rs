//! Graph-database backends and the running instances built from them

use crate::graph_name::GraphName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host port published by a freshly initialized graph when none is given.
pub const DEFAULT_PORT: u16 = 8885;

/// Triplestore backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphBackend {
    /// Blazegraph (default)
    Blazegraph,
    /// Franz AllegroGraph
    AGraph,
}

impl GraphBackend {
    /// All supported backends
    pub const ALL: [GraphBackend; 2] = [GraphBackend::Blazegraph, GraphBackend::AGraph];

    /// Lowercase identifier used on the command line and in container names
    pub fn as_str(self) -> &'static str {
        match self {
            GraphBackend::Blazegraph => "blazegraph",
            GraphBackend::AGraph => "agraph",
        }
    }

    /// Port the backend's HTTP server listens on inside its container
    pub fn container_port(self) -> u16 {
        match self {
            GraphBackend::Blazegraph => 8080,
            GraphBackend::AGraph => 10035,
        }
    }

    /// Path answering `200 OK` once the backend accepts requests
    pub fn status_path(self) -> &'static str {
        match self {
            GraphBackend::Blazegraph => "/bigdata/status",
            GraphBackend::AGraph => "/version",
        }
    }

    /// Conventional container name for a backend published on `port`,
    /// e.g. `blazegraph8885`.
    pub fn default_container_name(self, port: u16) -> GraphName {
        GraphName::from_trusted(format!("{}{}", self.as_str(), port))
    }

    /// Detect the backend a container was started from by its image reference.
    pub fn from_image(image: &str) -> Option<Self> {
        let repository = image.rsplit('/').next().unwrap_or(image).to_ascii_lowercase();
        if repository.starts_with("blazegraph") {
            Some(GraphBackend::Blazegraph)
        } else if repository.starts_with("agraph") {
            Some(GraphBackend::AGraph)
        } else {
            None
        }
    }
}

impl fmt::Display for GraphBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GraphBackend::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown graph backend '{}'", s))
    }
}

/// A running graph-database container.
///
/// Built by `initialize_graph`, or rebuilt from the container runtime by name
/// for `load_data` and `run_yasgui`. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphTarget {
    /// Container name
    pub name: GraphName,
    /// Backend running in the container
    pub backend: GraphBackend,
    /// Host port the backend's HTTP server is published on
    pub port: u16,
    /// Container id assigned by the runtime
    pub container_id: String,
}

impl GraphTarget {
    /// Base URL of the backend's HTTP server as seen from the host
    pub fn base_url(&self, host: &str) -> String {
        format!("http://{}:{}", host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_container_name() {
        assert_eq!(
            GraphBackend::Blazegraph.default_container_name(8885),
            "blazegraph8885"
        );
        assert_eq!(GraphBackend::AGraph.default_container_name(10035), "agraph10035");
    }

    #[test]
    fn test_from_image() {
        assert_eq!(
            GraphBackend::from_image("lyrasis/blazegraph:2.1.5"),
            Some(GraphBackend::Blazegraph)
        );
        assert_eq!(
            GraphBackend::from_image("docker.io/franzinc/agraph:v7.3.0"),
            Some(GraphBackend::AGraph)
        );
        assert_eq!(GraphBackend::from_image("erikap/yasgui"), None);
    }

    #[test]
    fn test_parse_backend() {
        assert_eq!("Blazegraph".parse::<GraphBackend>(), Ok(GraphBackend::Blazegraph));
        assert_eq!("agraph".parse::<GraphBackend>(), Ok(GraphBackend::AGraph));
        assert!("virtuoso".parse::<GraphBackend>().is_err());
    }

    #[test]
    fn test_base_url() {
        let target = GraphTarget {
            name: GraphName::parse("blazegraph8885").unwrap(),
            backend: GraphBackend::Blazegraph,
            port: 8885,
            container_id: "abc".to_string(),
        };
        assert_eq!(target.base_url("localhost"), "http://localhost:8885");
    }
}
