//! Read-only view of managed applications.

use async_trait::async_trait;

use crate::domain::{App, Formation, Release};
use crate::error::Result;

#[async_trait]
pub trait AppRegistry: Send + Sync {
    async fn list_apps(&self) -> Result<Vec<App>>;

    /// Most recent release of `app`, or `None` if it was never released.
    async fn latest_release(&self, app: &str) -> Result<Option<Release>>;

    /// Current per-process instance counts of `app`.
    async fn formation(&self, app: &str) -> Result<Formation>;
}
