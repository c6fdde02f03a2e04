//! Orchestration API client.
//!
//! Every operation is a `POST` to the configured endpoint with the
//! operation named in the `X-Amz-Target` header and a JSON body. Failures
//! carry an error code in `__type`; the client maps them onto
//! [`Error::UpstreamNotFound`] or [`Error::Upstream`].

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, warn};

use super::dto::{
    CreateServiceRequest, DeleteServiceRequest, DescribeStacksRequest, DescribeStacksResponse,
    ErrorBody, RegisterTaskDefinitionRequest, RegisterTaskDefinitionResponse, ServiceResponse,
    UpdateServiceRequest, UpdateStackRequest,
};
use crate::domain::{
    ServiceRef, ServiceSpec, ServiceUpdate, StackDescription, StackUpdate, TaskDefinitionId,
    TaskSpec,
};
use crate::error::{Error, Result};
use crate::infrastructure::config::endpoint::OrchestratorConfig;
use crate::port::outbound::compute::SERVICE_NOT_FOUND;
use crate::port::{ComputeApi, StackApi};

pub const TARGET_HEADER: &str = "X-Amz-Target";
const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

const COMPUTE_TARGET: &str = "AmazonEC2ContainerServiceV20141113";
const STACK_TARGET: &str = "CloudFormation";

/// HTTP client for compute and stack operations.
pub struct OrchestratorClient {
    http: HttpClient,
    endpoint: String,
}

impl OrchestratorClient {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &OrchestratorConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            endpoint: config.endpoint.clone(),
        }
    }

    async fn call<Req, Resp>(&self, target: &str, operation: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let target = format!("{target}.{operation}");
        debug!(target = %target, "Orchestrator call");

        let response = self
            .http
            .post(&self.endpoint)
            .header(TARGET_HEADER, &target)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = classify_error(status, &bytes);
            debug!(target = %target, error = %err, "Orchestrator call failed");
            return Err(err);
        }

        if bytes.is_empty() {
            return Ok(serde_json::from_slice(b"{}")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Map a failed response onto the crate error taxonomy.
pub fn classify_error(status: StatusCode, body: &[u8]) -> Error {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let code = match parsed.code() {
        "" => status.as_u16().to_string(),
        code => code.to_string(),
    };
    let message = if parsed.message.is_empty() {
        String::from_utf8_lossy(body).trim().to_string()
    } else {
        parsed.message
    };

    if code == SERVICE_NOT_FOUND {
        Error::UpstreamNotFound { code, message }
    } else {
        Error::Upstream { code, message }
    }
}

#[async_trait]
impl ComputeApi for OrchestratorClient {
    async fn create_service(&self, spec: &ServiceSpec) -> Result<String> {
        let response: ServiceResponse = self
            .call(
                COMPUTE_TARGET,
                "CreateService",
                &CreateServiceRequest::from(spec),
            )
            .await?;
        Ok(response.service.service_arn)
    }

    async fn update_service(&self, update: &ServiceUpdate) -> Result<String> {
        let response: ServiceResponse = self
            .call(
                COMPUTE_TARGET,
                "UpdateService",
                &UpdateServiceRequest::from(update),
            )
            .await?;
        Ok(response.service.service_arn)
    }

    async fn delete_service(&self, service: &ServiceRef) -> Result<()> {
        let _: IgnoredAny = self
            .call(
                COMPUTE_TARGET,
                "DeleteService",
                &DeleteServiceRequest {
                    cluster: service.cluster.clone(),
                    service: service.name.clone(),
                },
            )
            .await?;
        Ok(())
    }

    async fn register_task_definition(&self, spec: &TaskSpec) -> Result<TaskDefinitionId> {
        let response: RegisterTaskDefinitionResponse = self
            .call(
                COMPUTE_TARGET,
                "RegisterTaskDefinition",
                &RegisterTaskDefinitionRequest::from(spec),
            )
            .await?;
        TaskDefinitionId::from_arn(response.task_definition.task_definition_arn)
    }
}

#[async_trait]
impl StackApi for OrchestratorClient {
    async fn describe_stacks(&self, name: Option<&str>) -> Result<StackDescription> {
        let response: DescribeStacksResponse = self
            .call(
                STACK_TARGET,
                "DescribeStacks",
                &DescribeStacksRequest {
                    stack_name: name.map(str::to_string),
                },
            )
            .await?;
        Ok(response.into())
    }

    async fn update_stack(&self, update: &StackUpdate) -> Result<()> {
        let _: IgnoredAny = self
            .call(STACK_TARGET, "UpdateStack", &UpdateStackRequest::from(update))
            .await?;
        Ok(())
    }
}
