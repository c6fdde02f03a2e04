//! Stack cache configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::cache::stack::StackCacheConfig;

/// Env var that forces every stack read to hit the API.
pub const ALWAYS_FRESH_ENV: &str = "RACKFORM_ALWAYS_FRESH";

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime in seconds (default: 5).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Bypass cache hits entirely (default: false).
    #[serde(default)]
    pub always_fresh: bool,
}

const fn default_ttl_secs() -> u64 {
    5
}

impl CacheConfig {
    #[must_use]
    pub const fn stack_cache(&self) -> StackCacheConfig {
        StackCacheConfig {
            ttl: Duration::from_secs(self.ttl_secs),
            always_fresh: self.always_fresh,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            always_fresh: false,
        }
    }
}
