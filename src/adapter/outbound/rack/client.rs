//! Rack API client: apps, releases and formations.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{latest, ReleaseDto};
use crate::domain::{App, Formation, Release};
use crate::error::{Error, Result};
use crate::infrastructure::config::endpoint::RackApiConfig;
use crate::port::AppRegistry;

const USERNAME: &str = "convox";

pub struct RackApiClient {
    http: HttpClient,
    base_url: String,
    password: Option<String>,
}

impl RackApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, password: Option<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
            password,
        }
    }

    #[must_use]
    pub fn from_config(config: &RackApiConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            password: config.password.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "Rack API request");

        let mut request = self.http.get(&url);
        if let Some(password) = &self.password {
            request = request.basic_auth(USERNAME, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                code: status.as_u16().to_string(),
                message: message.trim().to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AppRegistry for RackApiClient {
    async fn list_apps(&self) -> Result<Vec<App>> {
        self.get("/apps").await
    }

    async fn latest_release(&self, app: &str) -> Result<Option<Release>> {
        let releases: Vec<ReleaseDto> = self.get(&format!("/apps/{app}/releases")).await?;
        latest(releases)
    }

    async fn formation(&self, app: &str) -> Result<Formation> {
        self.get(&format!("/apps/{app}/formation")).await
    }
}
