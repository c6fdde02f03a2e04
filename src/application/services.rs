//! The application services one process runs with.

use std::sync::Arc;

use super::cache::stack::StackCache;
use super::handler::RequestHandler;
use super::rack::RackService;

/// Everything the inbound adapters need, wired once per process.
pub struct Services {
    pub handler: RequestHandler,
    pub cache: Arc<StackCache>,
    pub rack: RackService,
}
