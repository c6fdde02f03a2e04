//! Task definitions: immutable, versioned sets of containers.
//!
//! Registering a task definition never mutates an earlier one. Each
//! registration under a family yields the next revision, so an update is
//! really "register revision N+1 and hand back its identifier".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::environment::Environment;
use super::property::PropertyBag;
use crate::error::{Error, Result};

/// Field names used by the task-definition resource's property bag.
pub mod fields {
    pub const NAME: &str = "Name";
    pub const ENVIRONMENT: &str = "Environment";
    pub const TASKS: &str = "Tasks";
    pub const CPU: &str = "CPU";
    pub const MEMORY: &str = "Memory";
    pub const IMAGE: &str = "Image";
    pub const COMMAND: &str = "Command";
    pub const LINKS: &str = "Links";
    pub const PORT_MAPPINGS: &str = "PortMappings";
}

/// Host port to container port, parsed from `host:container`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

impl FromStr for PortMapping {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (host, container) = s.split_once(':').ok_or_else(|| {
            Error::invalid_property(
                fields::PORT_MAPPINGS,
                format!("invalid port mapping {s:?}, expected host:container"),
            )
        })?;

        let port = |value: &str| {
            value.trim().parse::<u16>().map_err(|e| {
                Error::invalid_property(
                    fields::PORT_MAPPINGS,
                    format!("invalid port {value:?} in {s:?}: {e}"),
                )
            })
        };

        Ok(Self {
            host: port(host)?,
            container: port(container)?,
        })
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

/// One container in a task definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub cpu: u32,
    pub memory: u32,
    pub essential: bool,
    /// Shell invocation, `["sh", "-c", <command>]`, when a command was given.
    pub command: Option<Vec<String>>,
    pub links: Vec<String>,
    pub port_mappings: Vec<PortMapping>,
    pub environment: Environment,
}

impl ContainerSpec {
    fn from_properties(props: &PropertyBag) -> Result<Self> {
        let name = props.required_str(fields::NAME)?.to_string();
        let image = props.required_str(fields::IMAGE)?.to_string();

        let cpu = resource_units(props, fields::CPU);
        let memory = resource_units(props, fields::MEMORY);

        let command = props
            .optional_str(fields::COMMAND)?
            .filter(|c| !c.is_empty())
            .map(|c| vec!["sh".to_string(), "-c".to_string(), c.to_string()]);

        let port_mappings = props
            .str_list(fields::PORT_MAPPINGS)?
            .iter()
            .map(|mapping| {
                mapping.parse::<PortMapping>().map_err(|err| match err {
                    Error::InvalidProperty { reason, .. } => Error::invalid_property(
                        props.field_path(fields::PORT_MAPPINGS),
                        reason,
                    ),
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            image,
            cpu,
            memory,
            essential: true,
            command,
            links: props.str_list(fields::LINKS)?,
            port_mappings,
            environment: Environment::new(),
        })
    }
}

/// CPU units and memory default to zero when missing or unparseable.
fn resource_units(props: &PropertyBag, field: &str) -> u32 {
    match props.lenient_u32(field) {
        Some(units) => units,
        None => {
            if props.contains(field) {
                warn!(
                    field = %props.field_path(field),
                    "Unparseable resource value, defaulting to 0"
                );
            }
            0
        }
    }
}

/// A task definition ready for registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub family: String,
    pub containers: Vec<ContainerSpec>,
}

impl TaskSpec {
    /// Decode family and containers. The environment is applied separately
    /// once the bundle has been fetched.
    pub fn from_properties(props: &PropertyBag) -> Result<Self> {
        let family = props.required_str(fields::NAME)?.to_string();
        let containers = props
            .object_list(fields::TASKS)?
            .iter()
            .map(ContainerSpec::from_properties)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { family, containers })
    }

    /// Copy every environment pair onto every container.
    #[must_use]
    pub fn with_environment(mut self, environment: &Environment) -> Self {
        for container in &mut self.containers {
            for (key, value) in environment.iter() {
                container.environment.insert(key, value);
            }
        }
        self
    }
}

/// Identifier of one registered task definition revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDefinitionId {
    pub arn: String,
    pub family: String,
    pub revision: u32,
}

impl TaskDefinitionId {
    /// Recover family and revision from an ARN ending in `task-definition/<family>:<revision>`.
    pub fn from_arn(arn: impl Into<String>) -> Result<Self> {
        let arn = arn.into();
        let tail = arn.rsplit('/').next().unwrap_or_default();
        let (family, revision) = tail
            .rsplit_once(':')
            .ok_or_else(|| Error::Parse(format!("task definition arn has no revision: {arn}")))?;
        let revision = revision
            .parse::<u32>()
            .map_err(|e| Error::Parse(format!("invalid revision in {arn}: {e}")))?;
        let family = family.to_string();

        Ok(Self {
            arn,
            family,
            revision,
        })
    }
}

impl fmt::Display for TaskDefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.arn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: serde_json::Value) -> PropertyBag {
        PropertyBag::from_value(value).unwrap()
    }

    #[test]
    fn port_mapping_parses() {
        let mapping: PortMapping = "8080:80".parse().unwrap();
        assert_eq!(
            mapping,
            PortMapping {
                host: 8080,
                container: 80
            }
        );
    }

    #[test]
    fn port_mapping_requires_colon_and_numbers() {
        assert!(matches!(
            "8080".parse::<PortMapping>(),
            Err(Error::InvalidProperty { .. })
        ));
        assert!(matches!(
            "web:80".parse::<PortMapping>(),
            Err(Error::InvalidProperty { .. })
        ));
    }

    #[test]
    fn containers_decode_with_defaults() {
        let spec = TaskSpec::from_properties(&props(json!({
            "Name": "myapp-web",
            "Tasks": [{
                "Name": "web",
                "Image": "registry/web:1",
                "CPU": "not-a-number",
                "Memory": "256",
                "Command": "bin/web",
                "Links": ["db:db"],
                "PortMappings": ["80:5000"],
            }, {
                "Name": "worker",
                "Image": "registry/worker:1",
                "Command": "",
                "PortMappings": [],
            }]
        })))
        .unwrap();

        assert_eq!(spec.family, "myapp-web");
        let web = &spec.containers[0];
        assert_eq!(web.cpu, 0);
        assert_eq!(web.memory, 256);
        assert!(web.essential);
        assert_eq!(
            web.command.as_deref(),
            Some(&["sh".to_string(), "-c".to_string(), "bin/web".to_string()][..])
        );
        assert_eq!(web.links, vec!["db:db".to_string()]);
        assert_eq!(web.port_mappings[0].container, 5000);

        let worker = &spec.containers[1];
        assert!(worker.command.is_none());
        assert!(worker.port_mappings.is_empty());
    }

    #[test]
    fn malformed_port_mapping_names_container_path() {
        let result = TaskSpec::from_properties(&props(json!({
            "Name": "app",
            "Tasks": [{"Name": "web", "Image": "img", "PortMappings": ["80"]}]
        })));
        match result {
            Err(Error::InvalidProperty { field, .. }) => {
                assert_eq!(field, "Tasks[0].PortMappings");
            }
            other => panic!("expected invalid property, got {other:?}"),
        }
    }

    #[test]
    fn environment_reaches_every_container() {
        let spec = TaskSpec::from_properties(&props(json!({
            "Name": "app",
            "Tasks": [
                {"Name": "a", "Image": "img"},
                {"Name": "b", "Image": "img"}
            ]
        })))
        .unwrap();
        let env: Environment = [("FOO", "bar")].into_iter().collect();
        let spec = spec.with_environment(&env);

        assert!(spec
            .containers
            .iter()
            .all(|c| c.environment.get("FOO") == Some("bar")));
    }

    #[test]
    fn task_definition_id_from_arn() {
        let id = TaskDefinitionId::from_arn(
            "arn:aws:ecs:us-east-1:123456789012:task-definition/myapp-web:7",
        )
        .unwrap();
        assert_eq!(id.family, "myapp-web");
        assert_eq!(id.revision, 7);
        assert!(TaskDefinitionId::from_arn("arn:task-definition/nope").is_err());
    }
}
