//! Delivery of custom resource responses to pre-signed URLs.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{info, warn};

use crate::domain::CustomResourceResponse;
use crate::error::{Error, Result};
use crate::port::Responder;

/// PUTs the JSON response to the request's `ResponseURL`.
pub struct HttpResponder {
    http: HttpClient,
}

impl HttpResponder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
        }
    }
}

impl Default for HttpResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn respond(&self, url: &str, response: &CustomResourceResponse) -> Result<()> {
        // Pre-signed URLs reject a content type they were not signed with.
        let body = serde_json::to_vec(response)?;
        let result = self
            .http
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, "")
            .body(body)
            .send()
            .await?;

        let status = result.status();
        if !status.is_success() {
            let text = result.text().await.unwrap_or_default();
            warn!(status = %status, "Response delivery rejected");
            return Err(Error::Upstream {
                code: status.as_u16().to_string(),
                message: text,
            });
        }

        info!(
            status = ?response.status,
            physical_id = %response.physical_resource_id,
            "Delivered resource response"
        );
        Ok(())
    }
}
