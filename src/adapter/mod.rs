//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - the `rackform` command line
//! - [`outbound`] - HTTP clients for the orchestration API, rack API,
//!   environment bundles and response delivery

pub mod inbound;
pub mod outbound;
