//! Compute service specifications.
//!
//! A service is a long-running set of task instances kept at a desired
//! count, optionally registered behind one load balancer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::property::PropertyBag;
use crate::error::{Error, Result};

/// Field names used by the service resource's property bag.
pub mod fields {
    pub const CLUSTER: &str = "Cluster";
    pub const NAME: &str = "Name";
    pub const DESIRED_COUNT: &str = "DesiredCount";
    pub const TASK_DEFINITION: &str = "TaskDefinition";
    pub const LOAD_BALANCERS: &str = "LoadBalancers";
    pub const ROLE: &str = "Role";
}

/// Attachment of one container port to a named load balancer.
///
/// Parsed from `name:container:port`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerBinding {
    pub name: String,
    pub container: String,
    pub port: u16,
}

impl FromStr for LoadBalancerBinding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let [name, container, port] = parts.as_slice() else {
            return Err(Error::invalid_property(
                fields::LOAD_BALANCERS,
                format!("invalid load balancer specification: {s}"),
            ));
        };

        if name.is_empty() || container.is_empty() {
            return Err(Error::invalid_property(
                fields::LOAD_BALANCERS,
                format!("invalid load balancer specification: {s}"),
            ));
        }

        let port = port.parse::<u16>().map_err(|e| {
            Error::invalid_property(
                fields::LOAD_BALANCERS,
                format!("invalid load balancer port in {s}: {e}"),
            )
        })?;

        Ok(Self {
            name: (*name).to_string(),
            container: (*container).to_string(),
            port,
        })
    }
}

impl fmt::Display for LoadBalancerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.container, self.port)
    }
}

/// Cluster plus service name; enough to address an existing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRef {
    pub cluster: String,
    pub name: String,
}

impl ServiceRef {
    pub fn from_properties(props: &PropertyBag) -> Result<Self> {
        Ok(Self {
            cluster: props.required_str(fields::CLUSTER)?.to_string(),
            name: props.required_str(fields::NAME)?.to_string(),
        })
    }
}

impl fmt::Display for ServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cluster, self.name)
    }
}

/// Desired state of a new compute service.
///
/// A service binds at most one load balancer. When the input lists more,
/// the first is honored and the rest are counted in `ignored_balancers`
/// so the caller can report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    pub service: ServiceRef,
    pub desired_count: u32,
    pub task_definition: String,
    pub load_balancer: Option<LoadBalancerBinding>,
    pub role: Option<String>,
    pub ignored_balancers: Vec<String>,
}

impl ServiceSpec {
    /// Decode a create request from the property bag.
    pub fn from_properties(props: &PropertyBag) -> Result<Self> {
        let service = ServiceRef::from_properties(props)?;
        let desired_count = props.required_u32(fields::DESIRED_COUNT)?;
        let task_definition = props.required_str(fields::TASK_DEFINITION)?.to_string();

        let mut balancers = props.str_list(fields::LOAD_BALANCERS)?.into_iter();
        let load_balancer = balancers
            .next()
            .map(|spec| spec.parse::<LoadBalancerBinding>())
            .transpose()?;
        let ignored_balancers: Vec<String> = balancers.collect();

        let role = props
            .optional_str(fields::ROLE)?
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        if load_balancer.is_some() && role.is_none() {
            return Err(Error::invalid_property(
                props.field_path(fields::ROLE),
                "required when a load balancer is attached",
            ));
        }

        Ok(Self {
            service,
            desired_count,
            task_definition,
            load_balancer,
            role,
            ignored_balancers,
        })
    }
}

/// Changes applied to an existing service.
///
/// `task_definition` is `None` when only the count changes (scale-down
/// before delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUpdate {
    pub service: ServiceRef,
    pub desired_count: u32,
    pub task_definition: Option<String>,
}

impl ServiceUpdate {
    pub fn from_properties(props: &PropertyBag) -> Result<Self> {
        Ok(Self {
            service: ServiceRef::from_properties(props)?,
            desired_count: props.required_u32(fields::DESIRED_COUNT)?,
            task_definition: Some(props.required_str(fields::TASK_DEFINITION)?.to_string()),
        })
    }

    /// Scale a service to zero without touching its task definition.
    #[must_use]
    pub const fn drain(service: ServiceRef) -> Self {
        Self {
            service,
            desired_count: 0,
            task_definition: None,
        }
    }
}
