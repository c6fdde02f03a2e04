//! Resource lifecycle events and the responses sent back for them.
//!
//! The template engine delivers a [`CustomResourceRequest`] as JSON. It is
//! decoded into a [`ResourceEvent`] whose action and kind are closed enums,
//! so dispatch downstream is an exhaustive match.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::PhysicalId;
use super::outcome::{Disposition, Outcome};
use super::property::PropertyBag;
use crate::error::{Error, Result};

/// Lifecycle action requested for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "Create" => Ok(Self::Create),
            "Update" => Ok(Self::Update),
            "Delete" => Ok(Self::Delete),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource types this orchestrator reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Service,
    TaskDefinition,
}

impl ResourceKind {
    /// Resource type string used in templates.
    #[must_use]
    pub const fn resource_type(self) -> &'static str {
        match self {
            Self::Service => "Custom::ECSService",
            Self::TaskDefinition => "Custom::ECSTaskDefinition",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "Custom::ECSService" => Ok(Self::Service),
            "Custom::ECSTaskDefinition" => Ok(Self::TaskDefinition),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_type())
    }
}

/// Custom resource request as sent by the template engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceRequest {
    pub request_type: String,
    pub resource_type: String,
    #[serde(default)]
    pub resource_properties: Value,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default, rename = "ResponseURL")]
    pub response_url: Option<String>,
    #[serde(default)]
    pub stack_id: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub logical_resource_id: String,
}

impl CustomResourceRequest {
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// A decoded lifecycle notification for one resource.
#[derive(Debug, Clone)]
pub struct ResourceEvent {
    pub action: Action,
    pub kind: ResourceKind,
    pub properties: PropertyBag,
    /// Identifier returned by an earlier Create/Update; absent on Create.
    pub physical_id: Option<PhysicalId>,
    pub logical_id: String,
}

impl TryFrom<&CustomResourceRequest> for ResourceEvent {
    type Error = Error;

    fn try_from(request: &CustomResourceRequest) -> Result<Self> {
        let unsupported = || Error::UnsupportedResource {
            kind: request.resource_type.clone(),
            action: request.request_type.clone(),
        };
        let kind = request
            .resource_type
            .parse::<ResourceKind>()
            .map_err(|()| unsupported())?;
        let action = request
            .request_type
            .parse::<Action>()
            .map_err(|()| unsupported())?;

        Ok(Self {
            action,
            kind,
            properties: PropertyBag::from_value(request.resource_properties.clone())?,
            physical_id: request
                .physical_resource_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .map(PhysicalId::from),
            logical_id: request.logical_resource_id.clone(),
        })
    }
}

/// Final status reported to the template engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Body delivered to the request's `ResponseURL`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub data: serde_json::Map<String, Value>,
}

impl CustomResourceResponse {
    /// Build the response for a handled request.
    ///
    /// The template engine rejects empty physical ids, so an empty one falls
    /// back to the request's prior id and then to its logical id.
    #[must_use]
    pub fn for_result(request: &CustomResourceRequest, result: &Result<Outcome>) -> Self {
        let (status, reason, physical_id) = match result {
            Ok(outcome) => {
                let reason = match &outcome.disposition {
                    Disposition::Applied => String::new(),
                    Disposition::AlreadyAbsent => "resource already absent".to_string(),
                    Disposition::SoftFailed { reason } => {
                        format!("delete failed, treated as deleted: {reason}")
                    }
                };
                (ResponseStatus::Success, reason, outcome.physical_id.as_str())
            }
            Err(err) => (ResponseStatus::Failed, err.to_string(), ""),
        };

        let physical_resource_id = [
            physical_id,
            request.physical_resource_id.as_deref().unwrap_or_default(),
            request.logical_resource_id.as_str(),
        ]
        .into_iter()
        .find(|id| !id.is_empty())
        .unwrap_or_default()
        .to_string();

        Self {
            status,
            reason,
            physical_resource_id,
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            data: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(kind: &str, action: &str) -> CustomResourceRequest {
        CustomResourceRequest {
            request_type: action.into(),
            resource_type: kind.into(),
            resource_properties: json!({"Name": "web"}),
            logical_resource_id: "WebService".into(),
            ..Default::default()
        }
    }

    #[test]
    fn request_decodes_from_wire_json() {
        let request = CustomResourceRequest::from_json(
            r#"{
                "RequestType": "Update",
                "ResourceType": "Custom::ECSService",
                "ResponseURL": "https://example.invalid/response",
                "StackId": "stack-1",
                "RequestId": "req-1",
                "LogicalResourceId": "Web",
                "PhysicalResourceId": "arn:service/web",
                "ResourceProperties": {"Name": "web"}
            }"#,
        )
        .unwrap();

        let event = ResourceEvent::try_from(&request).unwrap();
        assert_eq!(event.action, Action::Update);
        assert_eq!(event.kind, ResourceKind::Service);
        assert_eq!(event.physical_id, Some(PhysicalId::from("arn:service/web")));
        assert_eq!(request.response_url.as_deref(), Some("https://example.invalid/response"));
    }

    #[test]
    fn unknown_kind_or_action_is_unsupported() {
        for (kind, action) in [
            ("Custom::Queue", "Create"),
            ("Custom::ECSService", "Rollback"),
        ] {
            match ResourceEvent::try_from(&request(kind, action)) {
                Err(Error::UnsupportedResource { kind: k, action: a }) => {
                    assert_eq!(k, kind);
                    assert_eq!(a, action);
                }
                other => panic!("expected unsupported resource, got {other:?}"),
            }
        }
    }

    #[test]
    fn response_falls_back_to_logical_id() {
        let req = request("Custom::ECSService", "Delete");
        let response = CustomResourceResponse::for_result(&req, &Ok(Outcome::already_absent()));
        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.physical_resource_id, "WebService");
    }

    #[test]
    fn soft_failure_is_success_with_reason() {
        let req = request("Custom::ECSService", "Delete");
        let response =
            CustomResourceResponse::for_result(&req, &Ok(Outcome::soft_failed("throttled")));
        assert_eq!(response.status, ResponseStatus::Success);
        assert!(response.reason.contains("throttled"));
    }

    #[test]
    fn failure_carries_error_text() {
        let req = request("Custom::ECSService", "Create");
        let result = Err(Error::invalid_property("DesiredCount", "required"));
        let response = CustomResourceResponse::for_result(&req, &result);
        assert_eq!(response.status, ResponseStatus::Failed);
        assert!(response.reason.contains("DesiredCount"));

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["Status"], "FAILED");
        assert_eq!(body["LogicalResourceId"], "WebService");
    }
}
