//! Delivery of custom resource responses.

use async_trait::async_trait;

use crate::domain::CustomResourceResponse;
use crate::error::Result;

#[async_trait]
pub trait Responder: Send + Sync {
    /// Deliver `response` to the pre-signed `url` from the request.
    async fn respond(&self, url: &str, response: &CustomResourceResponse) -> Result<()>;
}
