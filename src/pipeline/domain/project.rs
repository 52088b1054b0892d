use crate::shared::Result;
use serde::Deserialize;

/// The (name, version) pair a project is tracked under on the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCoordinates {
    name: String,
    version: String,
}

impl ProjectCoordinates {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for ProjectCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// NewType wrapper for the service-assigned project identifier
///
/// The token is opaque; the only invariant is that it is never empty, so an
/// unresolved project can never reach the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectIdentifier(String);

impl ProjectIdentifier {
    pub fn new(identifier: String) -> Result<Self> {
        if identifier.trim().is_empty() {
            anyhow::bail!("Project identifier cannot be empty");
        }
        Ok(Self(identifier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the project lookup response
///
/// Only `uuid` matters to the pipeline; every other field the service
/// returns is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl ProjectRecord {
    pub fn with_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Self::default()
        }
    }
}
