//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate outbound ports
//! to implement resource reconciliation, stack reads and rack resizing.

pub mod cache;
pub mod handler;
pub mod rack;
pub mod reconcile;
pub mod router;
pub mod scale;
pub mod services;

pub use cache::stack::{StackCache, StackCacheConfig};
pub use handler::RequestHandler;
pub use rack::RackService;
pub use router::ResourceRouter;
pub use scale::ScaleValidator;
pub use services::Services;
