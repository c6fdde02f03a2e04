//! Rackform - custom resource orchestrator for a container rack.
//!
//! A template engine hands lifecycle events (Create, Update, Delete) for
//! two custom resource kinds to this crate:
//!
//! - **`Custom::ECSService`** - a long-running compute service kept at a
//!   desired count, optionally behind one load balancer
//! - **`Custom::ECSTaskDefinition`** - an immutable, versioned set of
//!   containers; every change registers a new revision
//!
//! Alongside event handling the crate keeps a short-lived cache of stack
//! descriptions and guards rack resizes so the rack never shrinks below
//! the largest externally reachable process plus one instance.
//!
//! # Architecture
//!
//! - [`domain`] - plain data and decoding: events, specs, stacks, apps
//! - [`port`] - traits the application depends on
//! - [`application`] - router, reconcilers, stack cache, scale gate
//! - [`adapter`] - CLI and HTTP implementations of the ports
//! - [`infrastructure`] - configuration, logging, wiring
//! - [`error`] - error types for the crate
//!
//! # Features
//!
//! - `testkit` - in-memory port implementations for integration tests
//!
//! # Example
//!
//! ```no_run
//! use rackform::infrastructure::bootstrap::services_from_config;
//! use rackform::infrastructure::config::settings::Config;
//! use rackform::domain::CustomResourceRequest;
//!
//! # async fn run(event: &str) -> rackform::error::Result<()> {
//! let config = Config::load("rackform.toml")?;
//! let services = services_from_config(&config);
//! let request = CustomResourceRequest::from_json(event)?;
//! let response = services.handler.handle(&request).await?;
//! println!("{:?}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
