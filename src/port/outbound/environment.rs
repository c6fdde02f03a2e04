//! Environment bundle source.

use async_trait::async_trait;

use crate::domain::Environment;
use crate::error::Result;

#[async_trait]
pub trait EnvironmentSource: Send + Sync {
    /// Fetch and decode the bundle at `url`.
    ///
    /// Any failure is reported as
    /// [`Error::DependencyFetch`](crate::error::Error::DependencyFetch).
    async fn fetch(&self, url: &str) -> Result<Environment>;
}
