//! Scripted [`StackApi`] with call accounting.
//!
//! Counts describes, tracks how many are in flight at once and records
//! updates. Updates apply their `set` parameters to the stored stack so a
//! later describe observes the write.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Stack, StackDescription, StackUpdate};
use crate::error::{Error, Result};
use crate::port::StackApi;

pub struct ScriptedStacks {
    stacks: Mutex<Vec<Stack>>,
    updates: Mutex<Vec<StackUpdate>>,
    describe_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fail_describes: AtomicBool,
    delay: Option<Duration>,
}

impl ScriptedStacks {
    pub fn new(stacks: Vec<Stack>) -> Self {
        Self {
            stacks: Mutex::new(stacks),
            updates: Mutex::new(Vec::new()),
            describe_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            fail_describes: AtomicBool::new(false),
            delay: None,
        }
    }

    /// Hold every describe for `delay` before answering.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn describe_calls(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    /// Highest number of describes observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn fail_describes(&self, fail: bool) {
        self.fail_describes.store(fail, Ordering::SeqCst);
    }

    pub fn updates(&self) -> Vec<StackUpdate> {
        self.updates.lock().clone()
    }

    /// Change a parameter behind the cache's back.
    pub fn set_parameter(&self, stack: &str, key: &str, value: &str) {
        if let Some(stack) = self.stacks.lock().iter_mut().find(|s| s.name == stack) {
            stack.parameters.insert(key.to_string(), value.to_string());
        }
    }

    fn lookup(&self, name: Option<&str>) -> Result<StackDescription> {
        let stacks = self.stacks.lock();
        match name {
            None => Ok(StackDescription::new(stacks.clone())),
            Some(name) => stacks
                .iter()
                .find(|s| s.name == name)
                .map(|s| StackDescription::new(vec![s.clone()]))
                .ok_or_else(|| missing(name)),
        }
    }
}

fn missing(name: &str) -> Error {
    Error::Upstream {
        code: "ValidationError".to_string(),
        message: format!("Stack with id {name} does not exist"),
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StackApi for ScriptedStacks {
    async fn describe_stacks(&self, name: Option<&str>) -> Result<StackDescription> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_describes.load(Ordering::SeqCst) {
            return Err(Error::Upstream {
                code: "Throttling".to_string(),
                message: "Rate exceeded".to_string(),
            });
        }

        self.lookup(name)
    }

    async fn update_stack(&self, update: &StackUpdate) -> Result<()> {
        let mut stacks = self.stacks.lock();
        let stack = stacks
            .iter_mut()
            .find(|s| s.name == update.name)
            .ok_or_else(|| missing(&update.name))?;

        for parameter in &update.parameters {
            if let Some(value) = &parameter.value {
                stack.parameters.insert(parameter.key.clone(), value.clone());
            }
        }
        stack.status = "UPDATE_IN_PROGRESS".to_string();

        self.updates.lock().push(update.clone());
        Ok(())
    }
}
