#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use rackform::application::{StackCache, StackCacheConfig};
use rackform::testkit::clock::ManualClock;
use rackform::testkit::stack::ScriptedStacks;

/// Cache over `stacks` with a manual clock and the default TTL.
pub fn cache(stacks: Arc<ScriptedStacks>) -> (Arc<StackCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(StackCache::new(
        stacks,
        clock.clone(),
        StackCacheConfig::default(),
    ));
    (cache, clock)
}

pub fn cache_with(stacks: Arc<ScriptedStacks>, config: StackCacheConfig) -> Arc<StackCache> {
    Arc::new(StackCache::new(stacks, Arc::new(ManualClock::new()), config))
}

pub const SLOW: Duration = Duration::from_millis(20);

pub mod architecture;
