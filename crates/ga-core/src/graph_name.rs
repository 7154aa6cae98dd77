//! Strongly-typed container / graph name.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a graph-database container as known to the container runtime.
///
/// Container runtimes restrict names to `[a-zA-Z0-9][a-zA-Z0-9_.-]*`; the
/// same rule is enforced here so invalid names fail before any runtime call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GraphName(String);

impl GraphName {
    /// Validate and wrap a container name.
    pub fn parse(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        let invalid = |reason: &str| CoreError::InvalidGraphName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(invalid("name must not be empty")),
            Some(c) if !c.is_ascii_alphanumeric() => {
                return Err(invalid("name must start with a letter or digit"))
            }
            Some(_) => {}
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || "_.-".contains(*c))) {
            return Err(invalid(&format!("character '{}' is not allowed", bad)));
        }

        Ok(Self(name))
    }

    /// Wrap a name built from known-valid parts.
    pub(crate) fn from_trusted(name: String) -> Self {
        debug_assert!(Self::parse(name.clone()).is_ok());
        Self(name)
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the name of a companion container, e.g. `yasgui-blazegraph8885`.
    pub fn companion(&self, prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, self.0))
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GraphName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GraphName {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<GraphName> for String {
    fn from(name: GraphName) -> Self {
        name.0
    }
}

impl PartialEq<&str> for GraphName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["blazegraph8885", "my-graph", "a.b_c", "9lives"] {
            assert!(GraphName::parse(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        assert!(GraphName::parse("").is_err());
        assert!(GraphName::parse("-leading").is_err());
        assert!(GraphName::parse("has space").is_err());
        assert!(GraphName::parse("slash/name").is_err());
    }

    #[test]
    fn test_companion_name() {
        let name = GraphName::parse("blazegraph8885").unwrap();
        assert_eq!(name.companion("yasgui"), "yasgui-blazegraph8885");
    }
}
