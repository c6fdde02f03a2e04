//! Infrastructure configuration modules.

pub mod cache;
pub mod endpoint;
pub mod logging;
pub mod settings;
