//! In-memory [`ComputeApi`] that records every call.
//!
//! Tracks live services and task-definition revisions so create, update
//! and delete behave like the real API: updating or deleting an unknown
//! service fails with a not-found error, and each registration under a
//! family yields the next revision.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{ServiceRef, ServiceSpec, ServiceUpdate, TaskDefinitionId, TaskSpec};
use crate::error::{Error, Result};
use crate::port::outbound::compute::SERVICE_NOT_FOUND;
use crate::port::ComputeApi;

const ARN_PREFIX: &str = "arn:aws:ecs:local:000000000000";

/// One call observed by [`RecordingCompute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputeCall {
    CreateService(ServiceSpec),
    UpdateService(ServiceUpdate),
    DeleteService(ServiceRef),
    RegisterTaskDefinition(TaskSpec),
}

/// Failure to inject into the next matching call.
#[derive(Debug, Clone, Copy)]
pub enum ComputeFailure {
    NotFound,
    Upstream(&'static str),
}

impl ComputeFailure {
    fn into_error(self, service: &ServiceRef) -> Error {
        match self {
            Self::NotFound => not_found(service),
            Self::Upstream(code) => Error::Upstream {
                code: code.to_string(),
                message: format!("injected failure for {service}"),
            },
        }
    }
}

fn not_found(service: &ServiceRef) -> Error {
    Error::UpstreamNotFound {
        code: SERVICE_NOT_FOUND.to_string(),
        message: format!("Service not found: {service}"),
    }
}

#[derive(Default)]
struct State {
    calls: Vec<ComputeCall>,
    services: HashSet<String>,
    revisions: HashMap<String, u32>,
    next_update_failure: Option<ComputeFailure>,
    next_delete_failure: Option<ComputeFailure>,
}

#[derive(Default)]
pub struct RecordingCompute {
    state: Mutex<State>,
}

impl RecordingCompute {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `service` already exists.
    #[must_use]
    pub fn with_service(self, cluster: &str, name: &str) -> Self {
        self.state.lock().services.insert(format!("{cluster}/{name}"));
        self
    }

    pub fn calls(&self) -> Vec<ComputeCall> {
        self.state.lock().calls.clone()
    }

    pub fn has_service(&self, cluster: &str, name: &str) -> bool {
        self.state.lock().services.contains(&format!("{cluster}/{name}"))
    }

    pub fn fail_next_update(&self, failure: ComputeFailure) {
        self.state.lock().next_update_failure = Some(failure);
    }

    pub fn fail_next_delete(&self, failure: ComputeFailure) {
        self.state.lock().next_delete_failure = Some(failure);
    }
}

fn service_arn(service: &ServiceRef) -> String {
    format!("{ARN_PREFIX}:service/{}/{}", service.cluster, service.name)
}

#[async_trait]
impl ComputeApi for RecordingCompute {
    async fn create_service(&self, spec: &ServiceSpec) -> Result<String> {
        let mut state = self.state.lock();
        state.calls.push(ComputeCall::CreateService(spec.clone()));
        state.services.insert(spec.service.to_string());
        Ok(service_arn(&spec.service))
    }

    async fn update_service(&self, update: &ServiceUpdate) -> Result<String> {
        let mut state = self.state.lock();
        state.calls.push(ComputeCall::UpdateService(update.clone()));

        if let Some(failure) = state.next_update_failure.take() {
            return Err(failure.into_error(&update.service));
        }
        if !state.services.contains(&update.service.to_string()) {
            return Err(not_found(&update.service));
        }
        Ok(service_arn(&update.service))
    }

    async fn delete_service(&self, service: &ServiceRef) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(ComputeCall::DeleteService(service.clone()));

        if let Some(failure) = state.next_delete_failure.take() {
            return Err(failure.into_error(service));
        }
        if !state.services.remove(&service.to_string()) {
            return Err(not_found(service));
        }
        Ok(())
    }

    async fn register_task_definition(&self, spec: &TaskSpec) -> Result<TaskDefinitionId> {
        let mut state = self.state.lock();
        state.calls.push(ComputeCall::RegisterTaskDefinition(spec.clone()));

        let revision = state.revisions.entry(spec.family.clone()).or_insert(0);
        *revision += 1;
        TaskDefinitionId::from_arn(format!(
            "{ARN_PREFIX}:task-definition/{}:{revision}",
            spec.family
        ))
    }
}
