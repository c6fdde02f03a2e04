//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the collaborators the orchestrator talks to:
//! the orchestration API, the stack API, environment bundle hosting, the
//! application registry, release templates and the response endpoint.

pub mod clock;
pub mod compute;
pub mod environment;
pub mod registry;
pub mod responder;
pub mod stack;
pub mod template;
