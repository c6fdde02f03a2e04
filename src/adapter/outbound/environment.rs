//! Environment bundle download over HTTP.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use crate::domain::Environment;
use crate::error::{Error, Result};
use crate::infrastructure::config::endpoint::EnvironmentFetchConfig;
use crate::port::EnvironmentSource;

/// Fetches `KEY=VALUE` bundles with a plain `GET`.
pub struct HttpEnvironmentSource {
    http: HttpClient,
}

impl HttpEnvironmentSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &EnvironmentFetchConfig) -> Self {
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

impl Default for HttpEnvironmentSource {
    fn default() -> Self {
        Self::new()
    }
}

fn fetch_error(url: &str, reason: impl ToString) -> Error {
    Error::DependencyFetch {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl EnvironmentSource for HttpEnvironmentSource {
    async fn fetch(&self, url: &str) -> Result<Environment> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(url, format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| fetch_error(url, e))?;
        let environment = Environment::parse(&body);
        debug!(vars = environment.len(), "Downloaded environment bundle");
        Ok(environment)
    }
}
