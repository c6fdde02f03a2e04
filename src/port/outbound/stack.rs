//! Stack API port.

use async_trait::async_trait;

use crate::domain::{StackDescription, StackUpdate};
use crate::error::Result;

#[async_trait]
pub trait StackApi: Send + Sync {
    /// Describe one stack by name, or every stack when `name` is `None`.
    async fn describe_stacks(&self, name: Option<&str>) -> Result<StackDescription>;

    /// Apply an update to a named stack.
    async fn update_stack(&self, update: &StackUpdate) -> Result<()>;
}
