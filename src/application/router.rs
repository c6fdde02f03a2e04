//! Resource event routing.

use std::sync::Arc;

use tracing::{info, instrument};

use super::reconcile::{ServiceReconciler, TaskDefinitionReconciler};
use crate::domain::{Action, CustomResourceRequest, Outcome, ResourceEvent, ResourceKind};
use crate::error::Result;
use crate::port::{ComputeApi, EnvironmentSource};

/// Dispatches lifecycle events to the reconciler for their kind.
///
/// Holds no mutable state; events for different resources may be handled
/// concurrently. Ordering per resource is the template engine's concern.
pub struct ResourceRouter {
    services: ServiceReconciler,
    tasks: TaskDefinitionReconciler,
}

impl ResourceRouter {
    pub fn new(compute: Arc<dyn ComputeApi>, environment: Arc<dyn EnvironmentSource>) -> Self {
        Self {
            services: ServiceReconciler::new(Arc::clone(&compute)),
            tasks: TaskDefinitionReconciler::new(compute, environment),
        }
    }

    /// Decode a wire request and handle it.
    ///
    /// Unknown resource types or request types fail with
    /// [`Error::UnsupportedResource`](crate::error::Error::UnsupportedResource).
    pub async fn dispatch(&self, request: &CustomResourceRequest) -> Result<Outcome> {
        let event = ResourceEvent::try_from(request)?;
        self.handle(&event).await
    }

    #[instrument(
        skip(self, event),
        fields(kind = %event.kind, action = %event.action, logical_id = %event.logical_id)
    )]
    pub async fn handle(&self, event: &ResourceEvent) -> Result<Outcome> {
        info!("Handling resource event");

        let props = &event.properties;
        match (event.kind, event.action) {
            (ResourceKind::Service, Action::Create) => self.services.create(props).await,
            (ResourceKind::Service, Action::Update) => self.services.update(props).await,
            (ResourceKind::Service, Action::Delete) => self.services.delete(props).await,
            (ResourceKind::TaskDefinition, Action::Create | Action::Update) => {
                self.tasks.register(props).await
            }
            (ResourceKind::TaskDefinition, Action::Delete) => {
                self.tasks.delete(event.physical_id.as_ref()).await
            }
        }
    }
}
