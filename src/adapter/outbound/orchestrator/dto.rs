//! Wire shapes of the orchestration API.
//!
//! Compute operations use camelCase bodies, stack operations PascalCase.

use serde::{Deserialize, Serialize};

use crate::domain::{
    ContainerSpec, ServiceSpec, ServiceUpdate, Stack, StackDescription, StackUpdate, TaskSpec,
};

// ---------------------------------------------------------------------------
// Compute
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerDto {
    pub load_balancer_name: String,
    pub container_name: String,
    pub container_port: u16,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub cluster: String,
    pub service_name: String,
    pub task_definition: String,
    pub desired_count: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub load_balancers: Vec<LoadBalancerDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<&ServiceSpec> for CreateServiceRequest {
    fn from(spec: &ServiceSpec) -> Self {
        Self {
            cluster: spec.service.cluster.clone(),
            service_name: spec.service.name.clone(),
            task_definition: spec.task_definition.clone(),
            desired_count: spec.desired_count,
            load_balancers: spec
                .load_balancer
                .iter()
                .map(|lb| LoadBalancerDto {
                    load_balancer_name: lb.name.clone(),
                    container_name: lb.container.clone(),
                    container_port: lb.port,
                })
                .collect(),
            role: spec.role.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub cluster: String,
    pub service: String,
    pub desired_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_definition: Option<String>,
}

impl From<&ServiceUpdate> for UpdateServiceRequest {
    fn from(update: &ServiceUpdate) -> Self {
        Self {
            cluster: update.service.cluster.clone(),
            service: update.service.name.clone(),
            desired_count: update.desired_count,
            task_definition: update.task_definition.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteServiceRequest {
    pub cluster: String,
    pub service: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub service_arn: String,
}

#[derive(Debug, Deserialize)]
pub struct ServiceResponse {
    pub service: ServiceDto,
}

#[derive(Debug, Serialize)]
pub struct KeyValuePair {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMappingDto {
    pub host_port: u16,
    pub container_port: u16,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    pub name: String,
    pub image: String,
    pub cpu: u32,
    pub memory: u32,
    pub essential: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    pub links: Vec<String>,
    pub port_mappings: Vec<PortMappingDto>,
    pub environment: Vec<KeyValuePair>,
}

impl From<&ContainerSpec> for ContainerDefinition {
    fn from(container: &ContainerSpec) -> Self {
        Self {
            name: container.name.clone(),
            image: container.image.clone(),
            cpu: container.cpu,
            memory: container.memory,
            essential: container.essential,
            command: container.command.clone(),
            links: container.links.clone(),
            port_mappings: container
                .port_mappings
                .iter()
                .map(|m| PortMappingDto {
                    host_port: m.host,
                    container_port: m.container,
                })
                .collect(),
            environment: container
                .environment
                .iter()
                .map(|(name, value)| KeyValuePair {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTaskDefinitionRequest {
    pub family: String,
    pub container_definitions: Vec<ContainerDefinition>,
}

impl From<&TaskSpec> for RegisterTaskDefinitionRequest {
    fn from(spec: &TaskSpec) -> Self {
        Self {
            family: spec.family.clone(),
            container_definitions: spec.containers.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinitionDto {
    pub task_definition_arn: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTaskDefinitionResponse {
    pub task_definition: TaskDefinitionDto,
}

// ---------------------------------------------------------------------------
// Stacks
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeStacksRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterDto {
    pub parameter_key: String,
    #[serde(default)]
    pub parameter_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputDto {
    pub output_key: String,
    #[serde(default)]
    pub output_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagDto {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackDto {
    pub stack_name: String,
    pub stack_status: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDto>,
    #[serde(default)]
    pub outputs: Vec<OutputDto>,
    #[serde(default)]
    pub tags: Vec<TagDto>,
}

impl From<StackDto> for Stack {
    fn from(dto: StackDto) -> Self {
        Self {
            name: dto.stack_name,
            status: dto.stack_status,
            parameters: dto
                .parameters
                .into_iter()
                .map(|p| (p.parameter_key, p.parameter_value))
                .collect(),
            outputs: dto
                .outputs
                .into_iter()
                .map(|o| (o.output_key, o.output_value))
                .collect(),
            tags: dto.tags.into_iter().map(|t| (t.key, t.value)).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeStacksResponse {
    #[serde(default)]
    pub stacks: Vec<StackDto>,
}

impl From<DescribeStacksResponse> for StackDescription {
    fn from(response: DescribeStacksResponse) -> Self {
        Self::new(response.stacks.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterUpdateDto {
    pub parameter_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_value: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub use_previous_value: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateStackRequest {
    pub stack_name: String,
    #[serde(rename = "TemplateURL", skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub use_previous_template: bool,
    pub parameters: Vec<ParameterUpdateDto>,
    pub capabilities: Vec<String>,
}

impl From<&StackUpdate> for UpdateStackRequest {
    fn from(update: &StackUpdate) -> Self {
        Self {
            stack_name: update.name.clone(),
            template_url: update.template_url.clone(),
            use_previous_template: update.template_url.is_none(),
            parameters: update
                .parameters
                .iter()
                .map(|p| ParameterUpdateDto {
                    parameter_key: p.key.clone(),
                    parameter_value: p.value.clone(),
                    use_previous_value: p.value.is_none(),
                })
                .collect(),
            capabilities: update.capabilities.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "__type", default)]
    pub kind: String,
    #[serde(alias = "Message", default)]
    pub message: String,
}

impl ErrorBody {
    /// Error code without the namespace prefix (`ns#Code` becomes `Code`).
    pub fn code(&self) -> &str {
        self.kind.rsplit('#').next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LoadBalancerBinding, ParameterUpdate, ServiceRef};
    use serde_json::json;

    #[test]
    fn create_service_carries_single_balancer() {
        let spec = ServiceSpec {
            service: ServiceRef {
                cluster: "c".into(),
                name: "web".into(),
            },
            desired_count: 2,
            task_definition: "td".into(),
            load_balancer: Some(LoadBalancerBinding {
                name: "lb".into(),
                container: "web".into(),
                port: 80,
            }),
            role: Some("role".into()),
            ignored_balancers: vec!["other:web:81".into()],
        };

        let body = serde_json::to_value(CreateServiceRequest::from(&spec)).unwrap();
        assert_eq!(body["serviceName"], "web");
        assert_eq!(body["loadBalancers"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["loadBalancers"][0]["containerPort"], 80);
    }

    #[test]
    fn drain_update_omits_task_definition() {
        let update = ServiceUpdate::drain(ServiceRef {
            cluster: "c".into(),
            name: "web".into(),
        });
        let body = serde_json::to_value(UpdateServiceRequest::from(&update)).unwrap();
        assert_eq!(body, json!({"cluster": "c", "service": "web", "desiredCount": 0}));
    }

    #[test]
    fn stack_update_marks_kept_parameters() {
        let update = StackUpdate {
            name: "rack".into(),
            template_url: None,
            parameters: vec![
                ParameterUpdate::set("InstanceCount", "4"),
                ParameterUpdate::keep("Subnets"),
            ],
            capabilities: vec!["CAPABILITY_IAM".into()],
        };
        let body = serde_json::to_value(UpdateStackRequest::from(&update)).unwrap();

        assert_eq!(body["UsePreviousTemplate"], true);
        assert_eq!(
            body["Parameters"][0],
            json!({"ParameterKey": "InstanceCount", "ParameterValue": "4"})
        );
        assert_eq!(
            body["Parameters"][1],
            json!({"ParameterKey": "Subnets", "UsePreviousValue": true})
        );
    }

    #[test]
    fn describe_response_maps_to_stacks() {
        let response: DescribeStacksResponse = serde_json::from_value(json!({
            "Stacks": [{
                "StackName": "rack",
                "StackStatus": "UPDATE_COMPLETE",
                "Parameters": [{"ParameterKey": "InstanceCount", "ParameterValue": "3"}],
                "Tags": [{"Key": "Type", "Value": "rack"}]
            }]
        }))
        .unwrap();

        let description = StackDescription::from(response);
        let stack = description.single("rack").unwrap();
        assert_eq!(stack.parameter("InstanceCount"), Some("3"));
        assert_eq!(stack.tag("Type"), Some("rack"));
    }

    #[test]
    fn error_code_strips_namespace() {
        let body: ErrorBody = serde_json::from_value(json!({
            "__type": "com.amazonaws.ecs#ServiceNotFoundException",
            "message": "Service not found."
        }))
        .unwrap();
        assert_eq!(body.code(), "ServiceNotFoundException");
    }
}
