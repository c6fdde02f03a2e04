//! Runtime caches used by application services.
//!
//! - [`stack::StackCache`]: TTL read-through cache of stack descriptions,
//!   shared by every component that needs infrastructure topology

pub mod stack;
