//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`compute`] - `RecordingCompute`, an in-memory compute API
//! - [`stack`] - `ScriptedStacks`, a stack API with in-flight tracking
//! - [`registry`] - `StaticRegistry` of apps, releases and formations
//! - [`environment`] - `StaticEnvironment` serving fixed bundles
//! - [`template`] - `StaticTemplates` serving release templates
//! - [`responder`] - `RecordingResponder` capturing delivered responses
//! - [`clock`] - `ManualClock` for TTL tests
//! - [`domain`] - Builders for property bags, requests and stacks
//! - [`config`] - Canonical test configuration

pub mod clock;
pub mod compute;
pub mod config;
pub mod domain;
pub mod environment;
pub mod registry;
pub mod responder;
pub mod stack;
pub mod template;
