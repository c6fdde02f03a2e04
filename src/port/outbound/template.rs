//! Release template source.

use async_trait::async_trait;

use crate::domain::StackTemplate;
use crate::error::Result;

#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetch the template at `url`. Failures are
    /// [`Error::DependencyFetch`](crate::error::Error::DependencyFetch).
    async fn fetch(&self, url: &str) -> Result<StackTemplate>;
}
