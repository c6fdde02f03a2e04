//! Compute service reconciliation.
//!
//! Delete never fails. A service that is already gone counts as deleted;
//! any other upstream failure is logged and reported as
//! [`Disposition::SoftFailed`](crate::domain::Disposition::SoftFailed), and
//! the enclosing stack teardown carries on.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::{
    Outcome, PhysicalId, PropertyBag, ServiceRef, ServiceSpec, ServiceUpdate,
};
use crate::error::Result;
use crate::port::ComputeApi;

pub struct ServiceReconciler {
    compute: Arc<dyn ComputeApi>,
}

impl ServiceReconciler {
    pub fn new(compute: Arc<dyn ComputeApi>) -> Self {
        Self { compute }
    }

    pub async fn create(&self, props: &PropertyBag) -> Result<Outcome> {
        let spec = ServiceSpec::from_properties(props)?;

        if !spec.ignored_balancers.is_empty() {
            warn!(
                service = %spec.service,
                ignored = ?spec.ignored_balancers,
                "Only the first load balancer is attached, ignoring the rest"
            );
        }

        let arn = self.compute.create_service(&spec).await?;
        info!(
            service = %spec.service,
            desired_count = spec.desired_count,
            arn = %arn,
            "Created service"
        );

        Ok(Outcome::applied(PhysicalId::new(arn)))
    }

    pub async fn update(&self, props: &PropertyBag) -> Result<Outcome> {
        let update = ServiceUpdate::from_properties(props)?;
        let arn = self.compute.update_service(&update).await?;
        info!(
            service = %update.service,
            desired_count = update.desired_count,
            arn = %arn,
            "Updated service"
        );

        Ok(Outcome::applied(PhysicalId::new(arn)))
    }

    /// Scale to zero, then delete.
    ///
    /// A bag that does not name a service can only come from a create that
    /// was itself rejected, so there is nothing to remove.
    pub async fn delete(&self, props: &PropertyBag) -> Result<Outcome> {
        let service = match ServiceRef::from_properties(props) {
            Ok(service) => service,
            Err(err) => {
                warn!(error = %err, "Delete does not name a service, treating it as absent");
                return Ok(Outcome::already_absent());
            }
        };

        if let Err(err) = self.compute.update_service(&ServiceUpdate::drain(service.clone())).await {
            return Ok(absorb_delete_error(&service, "scale down", err));
        }

        if let Err(err) = self.compute.delete_service(&service).await {
            return Ok(absorb_delete_error(&service, "delete", err));
        }

        info!(service = %service, "Deleted service");
        Ok(Outcome::applied(PhysicalId::empty()))
    }
}

fn absorb_delete_error(service: &ServiceRef, step: &str, err: crate::error::Error) -> Outcome {
    if err.is_not_found() {
        info!(service = %service, step, "Service already absent, treating delete as done");
        Outcome::already_absent()
    } else {
        error!(
            service = %service,
            step,
            error = %err,
            "Service delete failed, reporting success so teardown can proceed"
        );
        Outcome::soft_failed(format!("{step}: {err}"))
    }
}
