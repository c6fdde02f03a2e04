//! Remote endpoint configuration: orchestration API, rack API, environment
//! bundle hosting and release templates.

use std::time::Duration;

use serde::Deserialize;

/// Env var holding the rack API password. Never read from the config file.
pub const RACK_PASSWORD_ENV: &str = "RACK_PASSWORD";

#[derive(Debug, Clone, Deserialize)]
pub struct OrchestratorConfig {
    /// Base URL of the JSON API serving compute and stack operations.
    #[serde(default = "default_orchestrator_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_orchestrator_endpoint() -> String {
    "http://127.0.0.1:4566".into()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl OrchestratorConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_orchestrator_endpoint(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RackApiConfig {
    #[serde(default = "default_rack_api_url")]
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Loaded from `RACK_PASSWORD`.
    #[serde(skip)]
    pub password: Option<String>,
}

fn default_rack_api_url() -> String {
    "http://127.0.0.1:5000".into()
}

impl RackApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RackApiConfig {
    fn default() -> Self {
        Self {
            url: default_rack_api_url(),
            timeout_ms: default_timeout_ms(),
            password: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentFetchConfig {
    #[serde(default = "default_fetch_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_fetch_timeout_ms() -> u64 {
    10_000
}

impl EnvironmentFetchConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EnvironmentFetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

/// Release template downloads made during rack upgrades.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateFetchConfig {
    #[serde(default = "default_fetch_timeout_ms")]
    pub timeout_ms: u64,
}

impl TemplateFetchConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TemplateFetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_fetch_timeout_ms(),
        }
    }
}
