//! Release template download over HTTP.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use crate::domain::StackTemplate;
use crate::error::{Error, Result};
use crate::infrastructure::config::endpoint::TemplateFetchConfig;
use crate::port::TemplateSource;

pub struct HttpTemplateSource {
    http: HttpClient,
}

impl HttpTemplateSource {
    #[must_use]
    pub fn from_config(config: &TemplateFetchConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self { http }
    }
}

fn template_error(url: &str, reason: impl ToString) -> Error {
    Error::DependencyFetch {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self, url: &str) -> Result<StackTemplate> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| template_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(template_error(url, format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| template_error(url, e))?;
        let template = StackTemplate::parse(&body).map_err(|e| template_error(url, e))?;
        debug!(url, "Downloaded release template");
        Ok(template)
    }
}
