//! Fixed-content [`EnvironmentSource`].

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::Environment;
use crate::error::{Error, Result};
use crate::port::EnvironmentSource;

/// Serves pre-registered bundles by URL; unknown URLs fail like a 404.
#[derive(Default)]
pub struct StaticEnvironment {
    bundles: HashMap<String, String>,
    fetches: Mutex<Vec<String>>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bundle(mut self, url: &str, body: &str) -> Self {
        self.bundles.insert(url.to_string(), body.to_string());
        self
    }

    /// URLs fetched so far, in order.
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().clone()
    }
}

#[async_trait]
impl EnvironmentSource for StaticEnvironment {
    async fn fetch(&self, url: &str) -> Result<Environment> {
        self.fetches.lock().push(url.to_string());

        self.bundles
            .get(url)
            .map(|body| Environment::parse(body))
            .ok_or_else(|| Error::DependencyFetch {
                url: url.to_string(),
                reason: "404 Not Found".to_string(),
            })
    }
}
