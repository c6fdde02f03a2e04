//! Orchestration API port for compute services and task definitions.
//!
//! Implementations classify upstream failures: a missing target is
//! [`Error::UpstreamNotFound`](crate::error::Error::UpstreamNotFound), every
//! other API failure is [`Error::Upstream`](crate::error::Error::Upstream).

use async_trait::async_trait;

use crate::domain::{ServiceRef, ServiceSpec, ServiceUpdate, TaskDefinitionId, TaskSpec};
use crate::error::Result;

/// Error code the orchestration API uses for an unknown service.
pub const SERVICE_NOT_FOUND: &str = "ServiceNotFoundException";

#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// Create a service. Returns the service identifier (ARN).
    async fn create_service(&self, spec: &ServiceSpec) -> Result<String>;

    /// Change count and/or task definition of an existing service.
    async fn update_service(&self, update: &ServiceUpdate) -> Result<String>;

    /// Delete a service that has been scaled to zero.
    async fn delete_service(&self, service: &ServiceRef) -> Result<()>;

    /// Register a new revision of a task definition family.
    async fn register_task_definition(&self, spec: &TaskSpec) -> Result<TaskDefinitionId>;
}
