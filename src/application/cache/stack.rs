//! Read-through cache of stack descriptions.
//!
//! Every describe goes through one lock that is held for the whole
//! read-through, including the upstream call on a miss. Describes are
//! therefore serialized across all stack names, which bounds the rate of
//! upstream calls at the cost of head-of-line latency.
//!
//! A failed refresh leaves the previous entry in place; the next caller
//! tries again. Writes go through [`StackCache::update_stack`], which drops
//! the written stack's entry so the next read refetches.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{StackDescription, StackUpdate};
use crate::error::Result;
use crate::port::{Clock, StackApi};

/// Cache key of the describe-all variant.
pub const ALL_STACKS: &str = "<blank>";

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Cache settings.
#[derive(Debug, Clone, Copy)]
pub struct StackCacheConfig {
    pub ttl: Duration,
    /// Treat every entry as stale. Used by test rigs that mutate stacks
    /// underneath the process.
    pub always_fresh: bool,
}

impl Default for StackCacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            always_fresh: false,
        }
    }
}

/// Most recent description of one stack name.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub description: Arc<StackDescription>,
    pub fetched_at: Instant,
    pub fetched_wall: DateTime<Utc>,
}

/// Process-wide stack description cache.
pub struct StackCache {
    api: Arc<dyn StackApi>,
    clock: Arc<dyn Clock>,
    config: StackCacheConfig,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl StackCache {
    pub fn new(api: Arc<dyn StackApi>, clock: Arc<dyn Clock>, config: StackCacheConfig) -> Self {
        Self {
            api,
            clock,
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn config(&self) -> StackCacheConfig {
        self.config
    }

    /// Describe one stack, served from cache while fresh.
    pub async fn describe_stack(&self, name: &str) -> Result<Arc<StackDescription>> {
        self.read_through(name, Some(name)).await
    }

    /// Describe every stack, cached under [`ALL_STACKS`].
    pub async fn describe_stacks(&self) -> Result<Arc<StackDescription>> {
        self.read_through(ALL_STACKS, None).await
    }

    async fn read_through(&self, key: &str, name: Option<&str>) -> Result<Arc<StackDescription>> {
        let mut entries = self.entries.lock().await;
        let now = self.clock.now();

        if let Some(entry) = entries.get(key) {
            let age = now.saturating_duration_since(entry.fetched_at);
            if age < self.config.ttl && !self.config.always_fresh {
                debug!(stack = %key, age_ms = age.as_millis() as u64, "Stack cache hit");
                return Ok(Arc::clone(&entry.description));
            }
            debug!(stack = %key, age_ms = age.as_millis() as u64, "Stack cache stale");
        } else {
            debug!(stack = %key, "Stack cache miss");
        }

        match self.api.describe_stacks(name).await {
            Ok(description) => {
                let description = Arc::new(description);
                entries.insert(
                    key.to_string(),
                    CacheEntry {
                        description: Arc::clone(&description),
                        fetched_at: self.clock.now(),
                        fetched_wall: Utc::now(),
                    },
                );
                Ok(description)
            }
            Err(err) => {
                warn!(stack = %key, error = %err, "Stack describe failed, keeping previous entry");
                Err(err)
            }
        }
    }

    /// Drop the cached entry for `name`.
    ///
    /// The describe-all entry is dropped too, since it also contains `name`.
    pub async fn invalidate(&self, name: &str) {
        let mut entries = self.entries.lock().await;
        let removed = entries.remove(name).is_some();
        entries.remove(ALL_STACKS);
        debug!(stack = %name, removed, "Stack cache invalidated");
    }

    /// Update a stack, invalidating its entry around the write.
    ///
    /// The entry is dropped before the write is issued and again after it
    /// succeeds, so a describe that raced the write cannot leave pre-write
    /// state behind.
    pub async fn update_stack(&self, update: &StackUpdate) -> Result<()> {
        info!(stack = %update.name, "Updating stack");
        self.invalidate(&update.name).await;
        self.api.update_stack(update).await?;
        self.invalidate(&update.name).await;
        Ok(())
    }

    /// Snapshot of cached entries, for diagnostics.
    pub async fn entries(&self) -> Vec<(String, CacheEntry)> {
        let entries = self.entries.lock().await;
        let mut snapshot: Vec<_> = entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect();
        snapshot.sort_by(|a, b| a.0.cmp(&b.0));
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stack;
    use crate::testkit::clock::ManualClock;
    use crate::testkit::stack::ScriptedStacks;

    fn cache(stacks: Arc<ScriptedStacks>, clock: Arc<ManualClock>) -> StackCache {
        StackCache::new(stacks, clock, StackCacheConfig::default())
    }

    fn stack(name: &str) -> Stack {
        Stack {
            name: name.into(),
            status: "CREATE_COMPLETE".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn hit_within_ttl_then_refetch_after() {
        let stacks = Arc::new(ScriptedStacks::new(vec![stack("x")]));
        let clock = Arc::new(ManualClock::new());
        let cache = cache(stacks.clone(), clock.clone());

        cache.describe_stack("x").await.unwrap();
        clock.advance(Duration::from_secs(1));
        cache.describe_stack("x").await.unwrap();
        assert_eq!(stacks.describe_calls(), 1);

        clock.advance(Duration::from_secs(5));
        cache.describe_stack("x").await.unwrap();
        assert_eq!(stacks.describe_calls(), 2);
    }

    #[tokio::test]
    async fn entry_exactly_ttl_old_is_stale() {
        let stacks = Arc::new(ScriptedStacks::new(vec![stack("x")]));
        let clock = Arc::new(ManualClock::new());
        let cache = cache(stacks.clone(), clock.clone());

        cache.describe_stack("x").await.unwrap();
        clock.advance(DEFAULT_TTL);
        cache.describe_stack("x").await.unwrap();
        assert_eq!(stacks.describe_calls(), 2);
    }

    #[tokio::test]
    async fn always_fresh_bypasses_hits() {
        let stacks = Arc::new(ScriptedStacks::new(vec![stack("x")]));
        let clock = Arc::new(ManualClock::new());
        let cache = StackCache::new(
            stacks.clone(),
            clock,
            StackCacheConfig {
                always_fresh: true,
                ..Default::default()
            },
        );

        cache.describe_stack("x").await.unwrap();
        cache.describe_stack("x").await.unwrap();
        assert_eq!(stacks.describe_calls(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_stale_entry() {
        let stacks = Arc::new(ScriptedStacks::new(vec![stack("x")]));
        let clock = Arc::new(ManualClock::new());
        let cache = cache(stacks.clone(), clock.clone());

        cache.describe_stack("x").await.unwrap();
        clock.advance(Duration::from_secs(10));
        stacks.fail_describes(true);
        assert!(cache.describe_stack("x").await.is_err());
        assert_eq!(cache.entries().await.len(), 1);

        stacks.fail_describes(false);
        cache.describe_stack("x").await.unwrap();
        assert_eq!(stacks.describe_calls(), 3);
    }

    #[tokio::test]
    async fn describe_all_uses_blank_key() {
        let stacks = Arc::new(ScriptedStacks::new(vec![stack("a"), stack("b")]));
        let clock = Arc::new(ManualClock::new());
        let cache = cache(stacks.clone(), clock);

        let all = cache.describe_stacks().await.unwrap();
        assert_eq!(all.stacks.len(), 2);
        cache.describe_stacks().await.unwrap();
        assert_eq!(stacks.describe_calls(), 1);

        let keys: Vec<String> = cache.entries().await.into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![ALL_STACKS.to_string()]);
    }

    #[tokio::test]
    async fn update_invalidates_written_stack() {
        let stacks = Arc::new(ScriptedStacks::new(vec![stack("x"), stack("y")]));
        let clock = Arc::new(ManualClock::new());
        let cache = cache(stacks.clone(), clock);

        cache.describe_stack("x").await.unwrap();
        cache.describe_stack("y").await.unwrap();
        cache
            .update_stack(&StackUpdate {
                name: "x".into(),
                template_url: None,
                parameters: vec![],
                capabilities: vec![],
            })
            .await
            .unwrap();

        cache.describe_stack("x").await.unwrap();
        cache.describe_stack("y").await.unwrap();
        assert_eq!(stacks.describe_calls(), 3);
    }
}
