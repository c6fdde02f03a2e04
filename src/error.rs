use thiserror::Error;

use crate::domain::rack::capacity_floor;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A property in the event's property bag is missing or malformed.
    #[error("invalid property {field}: {reason}")]
    InvalidProperty { field: String, reason: String },

    /// No reconciler handles this resource kind / action pairing.
    #[error("unsupported resource: kind={kind} action={action}")]
    UnsupportedResource { kind: String, action: String },

    /// The environment bundle could not be fetched or read.
    #[error("failed to fetch dependency {url}: {reason}")]
    DependencyFetch { url: String, reason: String },

    /// The orchestration API reported the target as absent.
    #[error("upstream resource not found ({code}): {message}")]
    UpstreamNotFound { code: String, message: String },

    /// Any other orchestration API failure.
    #[error("upstream error ({code}): {message}")]
    Upstream { code: String, message: String },

    /// A rack resize would drop below the capacity floor.
    #[error("max process concurrency is {max}, can't scale rack below {floor} instances (requested {requested})", floor = floor_for(.max))]
    ScaleViolation { max: u32, requested: u32 },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::InvalidProperty`] for `field`.
    pub fn invalid_property(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the orchestration API reported the target missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UpstreamNotFound { .. })
    }

}

fn floor_for(max: &u32) -> u32 {
    capacity_floor(*max)
}
