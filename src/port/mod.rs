//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  router · reconcilers   │
//!     ┌──────────────┤  stack cache · scale    ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────────┐        ┌─────────────┐              ┌────────────┐
//! │Orchestration│        │  Registry   │              │ Environment│
//! │   Adapter   │        │   Adapter   │              │  Adapter   │
//! └─────────────┘        └─────────────┘              └────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ComputeApi`] - services and task definitions
//! - [`StackApi`] - stack describe and update
//! - [`EnvironmentSource`] - environment bundle downloads
//! - [`AppRegistry`] - apps, releases and formations
//! - [`TemplateSource`] - release templates for rack upgrades
//! - [`Responder`] - response delivery to the template engine
//! - [`Clock`] - time source for cache TTLs

pub mod outbound;

pub use outbound::clock::{Clock, SystemClock};
pub use outbound::compute::ComputeApi;
pub use outbound::environment::EnvironmentSource;
pub use outbound::registry::AppRegistry;
pub use outbound::responder::Responder;
pub use outbound::stack::StackApi;
pub use outbound::template::TemplateSource;
