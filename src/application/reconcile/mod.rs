//! Reconcilers: one per resource kind.
//!
//! Each reconciler decodes the event's property bag into a typed spec,
//! issues the orchestration API calls for the requested action and returns
//! an [`Outcome`](crate::domain::Outcome). Reconcilers hold only shared
//! handles to stateless ports and are safe to call concurrently.

pub mod service;
pub mod task;

pub use service::ServiceReconciler;
pub use task::TaskDefinitionReconciler;
