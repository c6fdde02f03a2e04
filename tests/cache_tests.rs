//! Stack cache behavior under concurrency and writes.

mod support;

use std::sync::Arc;
use std::time::Duration;

use rackform::application::StackCacheConfig;
use rackform::domain::{ParameterUpdate, StackUpdate};
use rackform::testkit::domain::stack;
use rackform::testkit::stack::ScriptedStacks;
use tokio::task::JoinSet;

fn rack() -> ScriptedStacks {
    ScriptedStacks::new(vec![
        stack("rack", "CREATE_COMPLETE", &[("InstanceCount", "3")]),
        stack("app", "CREATE_COMPLETE", &[]),
    ])
}

/// Concurrent readers of one stack produce a single upstream call.
#[tokio::test]
async fn concurrent_reads_coalesce_into_one_fetch() {
    let stacks = Arc::new(rack().with_delay(support::SLOW));
    let (cache, _clock) = support::cache(stacks.clone());

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let cache = cache.clone();
        tasks.spawn(async move { cache.describe_stack("rack").await.map(|d| d.stacks.len()) });
    }
    while let Some(result) = tasks.join_next().await {
        assert_eq!(result.unwrap().unwrap(), 1);
    }

    assert_eq!(stacks.describe_calls(), 1);
}

/// Describes for different stacks never overlap upstream.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn describes_are_serialized_across_names() {
    let stacks = Arc::new(rack().with_delay(support::SLOW));
    let (cache, _clock) = support::cache(stacks.clone());

    let mut tasks = JoinSet::new();
    for name in ["rack", "app", "rack", "app"] {
        let cache = cache.clone();
        tasks.spawn(async move { cache.describe_stack(name).await.is_ok() });
    }
    tasks.spawn({
        let cache = cache.clone();
        async move { cache.describe_stacks().await.is_ok() }
    });
    while let Some(result) = tasks.join_next().await {
        assert!(result.unwrap());
    }

    assert_eq!(stacks.max_in_flight(), 1);
    assert_eq!(stacks.describe_calls(), 3);
}

/// A read after an update sees the written parameters, even within the TTL.
#[tokio::test]
async fn read_after_write_is_fresh() {
    let stacks = Arc::new(rack());
    let (cache, clock) = support::cache(stacks.clone());

    let before = cache.describe_stack("rack").await.unwrap();
    assert_eq!(before.stacks[0].parameter("InstanceCount"), Some("3"));

    cache
        .update_stack(&StackUpdate {
            name: "rack".into(),
            template_url: None,
            parameters: vec![ParameterUpdate::set("InstanceCount", "5")],
            capabilities: vec![],
        })
        .await
        .unwrap();

    clock.advance(Duration::from_millis(10));
    let after = cache.describe_stack("rack").await.unwrap();
    assert_eq!(after.stacks[0].parameter("InstanceCount"), Some("5"));
}

/// An update also drops the describe-all entry.
#[tokio::test]
async fn write_invalidates_describe_all() {
    let stacks = Arc::new(rack());
    let (cache, _clock) = support::cache(stacks.clone());

    cache.describe_stacks().await.unwrap();
    cache.invalidate("rack").await;
    cache.describe_stacks().await.unwrap();

    assert_eq!(stacks.describe_calls(), 2);
}

/// Out-of-band changes stay invisible until the entry expires.
#[tokio::test]
async fn out_of_band_change_visible_after_ttl() {
    let stacks = Arc::new(rack());
    let (cache, clock) = support::cache(stacks.clone());

    cache.describe_stack("rack").await.unwrap();
    stacks.set_parameter("rack", "InstanceCount", "9");

    let cached = cache.describe_stack("rack").await.unwrap();
    assert_eq!(cached.stacks[0].parameter("InstanceCount"), Some("3"));

    clock.advance(Duration::from_secs(5));
    let fresh = cache.describe_stack("rack").await.unwrap();
    assert_eq!(fresh.stacks[0].parameter("InstanceCount"), Some("9"));
}

#[tokio::test]
async fn always_fresh_sees_out_of_band_change_immediately() {
    let stacks = Arc::new(rack());
    let cache = support::cache_with(
        stacks.clone(),
        StackCacheConfig {
            always_fresh: true,
            ..Default::default()
        },
    );

    cache.describe_stack("rack").await.unwrap();
    stacks.set_parameter("rack", "InstanceCount", "9");
    let fresh = cache.describe_stack("rack").await.unwrap();
    assert_eq!(fresh.stacks[0].parameter("InstanceCount"), Some("9"));
}

#[tokio::test]
async fn unknown_stack_is_an_error_and_not_cached() {
    let stacks = Arc::new(rack());
    let (cache, _clock) = support::cache(stacks.clone());

    assert!(cache.describe_stack("missing").await.is_err());
    assert!(cache.entries().await.is_empty());
}
