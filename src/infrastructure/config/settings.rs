//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file with environment variable
//! overrides for the rack name, the rack API password and the cache
//! bypass switch.
//!
//! # Example
//!
//! ```no_run
//! use rackform::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("rackform.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::cache::{CacheConfig, ALWAYS_FRESH_ENV};
use super::endpoint::{
    EnvironmentFetchConfig, OrchestratorConfig, RackApiConfig, TemplateFetchConfig,
    RACK_PASSWORD_ENV,
};
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Env var naming the rack stack when the config file leaves it out.
pub const RACK_ENV: &str = "RACK";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Name of the stack hosting the rack itself.
    #[serde(default)]
    pub rack: String,

    /// Template applied when a scale request changes the rack version.
    /// `{version}` is replaced with the requested version.
    #[serde(default)]
    pub release_template_url: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Stack description cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Orchestration API (compute services, task definitions, stacks).
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    /// Rack API serving apps, releases and formations.
    #[serde(default)]
    pub rack_api: RackApiConfig,

    /// Environment bundle downloads.
    #[serde(default)]
    pub environment: EnvironmentFetchConfig,

    /// Release template downloads.
    #[serde(default)]
    pub templates: TemplateFetchConfig,
}

impl Config {
    /// Parse configuration from TOML content, then apply environment
    /// overrides and validate.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.rack.is_empty() {
            if let Some(rack) = lookup(RACK_ENV) {
                self.rack = rack;
            }
        }

        if lookup(ALWAYS_FRESH_ENV).as_deref() == Some("1") {
            self.cache.always_fresh = true;
        }

        self.rack_api.password = lookup(RACK_PASSWORD_ENV).filter(|p| !p.is_empty());
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.rack.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "rack" }.into());
        }
        if self.cache.ttl_secs == 0 && !self.cache.always_fresh {
            return Err(ConfigError::InvalidValue {
                field: "ttl_secs",
                reason: "must be greater than 0 (use always_fresh to disable caching)"
                    .to_string(),
            }
            .into());
        }

        for (field, value) in [
            ("orchestrator.endpoint", &self.orchestrator.endpoint),
            ("rack_api.url", &self.rack_api.url),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
            if let Err(e) = url::Url::parse(value) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: e.to_string(),
                }
                .into());
            }
        }

        if let Some(template) = &self.release_template_url {
            if let Err(e) = url::Url::parse(template) {
                return Err(ConfigError::InvalidValue {
                    field: "release_template_url",
                    reason: e.to_string(),
                }
                .into());
            }
        }

        for (field, value) in [
            ("orchestrator.timeout_ms", self.orchestrator.timeout_ms),
            (
                "orchestrator.connect_timeout_ms",
                self.orchestrator.connect_timeout_ms,
            ),
            ("rack_api.timeout_ms", self.rack_api.timeout_ms),
            ("environment.timeout_ms", self.environment.timeout_ms),
            ("templates.timeout_ms", self.templates.timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("expected pretty or json, got {other}"),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::Error;

    fn parse(content: &str) -> Config {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let config = parse("rack = \"convox\"");
        assert_eq!(config.cache.ttl_secs, 5);
        assert!(!config.cache.always_fresh);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("RACK", "from-env"),
            ("RACKFORM_ALWAYS_FRESH", "1"),
            ("RACK_PASSWORD", "hunter2"),
        ]
        .into_iter()
        .collect();

        let mut config = parse("");
        config.apply_env(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.rack, "from-env");
        assert!(config.cache.always_fresh);
        assert_eq!(config.rack_api.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn file_rack_name_wins_over_env() {
        let mut config = parse("rack = \"file\"");
        config.apply_env(|key| (key == RACK_ENV).then(|| "env".to_string()));
        assert_eq!(config.rack, "file");
    }

    #[test]
    fn always_fresh_requires_exact_one() {
        let mut config = parse("rack = \"r\"");
        config.apply_env(|key| (key == ALWAYS_FRESH_ENV).then(|| "true".to_string()));
        assert!(!config.cache.always_fresh);
    }

    #[test]
    fn missing_rack_is_rejected() {
        assert!(matches!(
            parse("").validate(),
            Err(Error::Config(ConfigError::MissingField { field: "rack" }))
        ));
    }

    #[test]
    fn zero_ttl_needs_always_fresh() {
        let config = parse("rack = \"r\"\n[cache]\nttl_secs = 0\n");
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue { field: "ttl_secs", .. }))
        ));

        let config = parse("rack = \"r\"\n[cache]\nttl_secs = 0\nalways_fresh = true\n");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_endpoint_is_rejected() {
        let config = parse("rack = \"r\"\n[orchestrator]\nendpoint = \"not a url\"\n");
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "orchestrator.endpoint",
                ..
            }))
        ));
    }

    #[test]
    fn release_template_must_be_a_url() {
        let config = parse("rack = \"r\"\nrelease_template_url = \"release/{version}\"\n");
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "release_template_url",
                ..
            }))
        ));

        let config = parse(
            "rack = \"r\"\nrelease_template_url = \"https://releases.invalid/{version}/formation.json\"\n",
        );
        assert!(config.validate().is_ok());
    }
}
