//! Builders for domain values used across tests.
//!
//! Keeps property bags and wire requests short so tests focus on
//! assertions rather than construction boilerplate.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::domain::{CustomResourceRequest, PropertyBag, Stack};

/// Property bag for a service named `name` in `cluster` at `count`.
pub fn service_props(cluster: &str, name: &str, count: u32) -> Value {
    json!({
        "Cluster": cluster,
        "Name": name,
        "DesiredCount": count.to_string(),
        "TaskDefinition": format!("arn:aws:ecs:local:000000000000:task-definition/{name}:1"),
        "LoadBalancers": [],
    })
}

/// Property bag for a single-container task definition.
pub fn task_props(family: &str, environment_url: &str) -> Value {
    json!({
        "Name": family,
        "Environment": environment_url,
        "Tasks": [{
            "Name": "main",
            "Image": format!("registry.invalid/{family}:latest"),
            "CPU": "128",
            "Memory": "256",
            "Command": "",
            "PortMappings": [],
        }],
    })
}

pub fn bag(value: Value) -> PropertyBag {
    PropertyBag::from_value(value).expect("test properties must be an object")
}

/// A wire request for `resource_type` with `request_type`.
pub fn request(resource_type: &str, request_type: &str, props: Value) -> CustomResourceRequest {
    CustomResourceRequest {
        request_type: request_type.to_string(),
        resource_type: resource_type.to_string(),
        resource_properties: props,
        stack_id: "arn:aws:cloudformation:local:000000000000:stack/app/1".to_string(),
        request_id: "request-1".to_string(),
        logical_resource_id: "Resource".to_string(),
        ..Default::default()
    }
}

/// A stack in `status` with the given parameters.
pub fn stack(name: &str, status: &str, parameters: &[(&str, &str)]) -> Stack {
    Stack {
        name: name.to_string(),
        status: status.to_string(),
        parameters: parameters
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<BTreeMap<_, _>>(),
        ..Default::default()
    }
}
