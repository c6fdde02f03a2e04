//! Fixed-content [`TemplateSource`].

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::StackTemplate;
use crate::error::{Error, Result};
use crate::port::TemplateSource;

/// Serves templates declaring fixed parameter names; unknown URLs fail
/// like a 404.
#[derive(Default)]
pub struct StaticTemplates {
    templates: HashMap<String, StackTemplate>,
    fetches: Mutex<Vec<String>>,
}

impl StaticTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_template(mut self, url: &str, parameters: &[&str]) -> Self {
        self.templates.insert(
            url.to_string(),
            StackTemplate::with_parameters(parameters.iter().copied()),
        );
        self
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().clone()
    }
}

#[async_trait]
impl TemplateSource for StaticTemplates {
    async fn fetch(&self, url: &str) -> Result<StackTemplate> {
        self.fetches.lock().push(url.to_string());

        self.templates
            .get(url)
            .cloned()
            .ok_or_else(|| Error::DependencyFetch {
                url: url.to_string(),
                reason: "404 Not Found".to_string(),
            })
    }
}
