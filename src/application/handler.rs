//! End-to-end handling of one custom resource request.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::router::ResourceRouter;
use crate::domain::{CustomResourceRequest, CustomResourceResponse, ResponseStatus};
use crate::error::Result;
use crate::port::Responder;

/// Routes a request and reports the result to the template engine.
pub struct RequestHandler {
    router: ResourceRouter,
    responder: Arc<dyn Responder>,
}

impl RequestHandler {
    pub fn new(router: ResourceRouter, responder: Arc<dyn Responder>) -> Self {
        Self { router, responder }
    }

    /// Handle `request` and deliver the response to its `ResponseURL`.
    ///
    /// Reconciliation failures become a `FAILED` response, not an error.
    /// Only a failed delivery is returned as `Err`; without a response the
    /// template engine would wait until its own timeout.
    pub async fn handle(&self, request: &CustomResourceRequest) -> Result<CustomResourceResponse> {
        let result = self.router.dispatch(request).await;
        if let Err(err) = &result {
            error!(
                resource_type = %request.resource_type,
                request_type = %request.request_type,
                logical_id = %request.logical_resource_id,
                error = %err,
                "Resource request failed"
            );
        }

        let response = CustomResourceResponse::for_result(request, &result);

        match request.response_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => self.responder.respond(url, &response).await?,
            None => warn!(
                logical_id = %request.logical_resource_id,
                "Request has no ResponseURL, response not delivered"
            ),
        }

        if response.status == ResponseStatus::Success {
            info!(
                logical_id = %request.logical_resource_id,
                physical_id = %response.physical_resource_id,
                "Resource request succeeded"
            );
        }

        Ok(response)
    }
}
