//! Outbound adapters implementing the driven ports over HTTP.

pub mod environment;
pub mod orchestrator;
pub mod rack;
pub mod response;
pub mod template;

pub use environment::HttpEnvironmentSource;
pub use orchestrator::OrchestratorClient;
pub use rack::RackApiClient;
pub use response::HttpResponder;
pub use template::HttpTemplateSource;
