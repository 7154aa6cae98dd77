//! `HOST:PORT` endpoints a UI container is published on

use std::fmt;
use std::str::FromStr;

/// Host interface and port to publish a container port on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEndpoint {
    /// Host interface; all interfaces when `None`
    pub host: Option<String>,
    /// Host port
    pub port: u16,
}

impl FromStr for ExternalEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected HOST:PORT, found '{}'", s))?;

        let port: u16 = port
            .parse()
            .map_err(|_| format!("invalid port '{}' in '{}'", port, s))?;
        if port == 0 {
            return Err(format!("port must be positive in '{}'", s));
        }

        let host = host.trim_start_matches('[').trim_end_matches(']');
        Ok(Self {
            host: (!host.is_empty()).then(|| host.to_string()),
            port,
        })
    }
}

impl fmt::Display for ExternalEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host.as_deref().unwrap_or("0.0.0.0"), self.port)
    }
}
