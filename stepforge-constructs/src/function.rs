use serde::{Deserialize, Serialize};

pub const DEFAULT_DOCKER_MEMORY_MB: u32 = 512;
pub const DEFAULT_DOCKER_TIMEOUT_SECONDS: u32 = 900;
pub const DEFAULT_DOCKER_ALIAS: &str = "live";

/// Reference to an externally deployed compute function, by name or full
/// resource identifier, optionally pinned to a version or alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRef {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qualifier: Option<String>,
}

impl FunctionRef {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionRef {
            name: name.into(),
            qualifier: None,
        }
    }

    pub fn with_qualifier(name: impl Into<String>, qualifier: impl Into<String>) -> Self {
        FunctionRef {
            name: name.into(),
            qualifier: Some(qualifier.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `Resource` string an invoke-function task uses.
    pub fn invoke_resource(&self) -> String {
        match &self.qualifier {
            Some(qualifier) => format!("{}:{}", self.name, qualifier),
            None => self.name.clone(),
        }
    }
}

/// Declarative description of a container-image-backed function for the
/// external deployment mechanism to provision. Invocations go through the
/// published alias so a redeploy shifts traffic without rewiring the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerFunctionSpec {
    pub function_name: String,

    pub image_uri: String,

    #[serde(default = "default_memory_mb")]
    pub memory_mb: u32,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,

    #[serde(default = "default_alias")]
    pub alias: String,
}

fn default_memory_mb() -> u32 {
    DEFAULT_DOCKER_MEMORY_MB
}

fn default_timeout_seconds() -> u32 {
    DEFAULT_DOCKER_TIMEOUT_SECONDS
}

fn default_alias() -> String {
    DEFAULT_DOCKER_ALIAS.to_string()
}

impl DockerFunctionSpec {
    pub fn new(function_name: impl Into<String>, image_uri: impl Into<String>) -> Self {
        DockerFunctionSpec {
            function_name: function_name.into(),
            image_uri: image_uri.into(),
            memory_mb: DEFAULT_DOCKER_MEMORY_MB,
            timeout_seconds: DEFAULT_DOCKER_TIMEOUT_SECONDS,
            alias: DEFAULT_DOCKER_ALIAS.to_string(),
        }
    }

    /// The alias-qualified reference tasks invoke.
    pub fn function_ref(&self) -> FunctionRef {
        FunctionRef::with_qualifier(self.function_name.clone(), self.alias.clone())
    }
}
