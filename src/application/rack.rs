//! Rack system view and capacity changes.

use std::sync::Arc;

use tracing::{debug, info};

use super::cache::stack::StackCache;
use super::scale::ScaleValidator;
use crate::domain::rack::parameters;
use crate::domain::{ParameterUpdate, RackScaleRequest, RackSystem, Stack, StackUpdate};
use crate::error::{Error, Result};
use crate::port::TemplateSource;

/// Capability the rack template needs to manage its own IAM roles.
pub const CAPABILITY_IAM: &str = "CAPABILITY_IAM";

/// Placeholder in the release template URL replaced by the target version.
pub const VERSION_PLACEHOLDER: &str = "{version}";

struct ReleaseTemplate {
    url: String,
    source: Arc<dyn TemplateSource>,
}

impl ReleaseTemplate {
    fn url_for(&self, version: &str) -> String {
        self.url.replace(VERSION_PLACEHOLDER, version)
    }
}

/// Reads and resizes the rack stack.
pub struct RackService {
    rack: String,
    cache: Arc<StackCache>,
    validator: ScaleValidator,
    release: Option<ReleaseTemplate>,
}

impl RackService {
    pub fn new(rack: impl Into<String>, cache: Arc<StackCache>, validator: ScaleValidator) -> Self {
        Self {
            rack: rack.into(),
            cache,
            validator,
            release: None,
        }
    }

    /// Template to apply on version changes, fetched from `source` so
    /// parameters it no longer declares can be dropped. Without one, the
    /// current template is kept.
    #[must_use]
    pub fn with_release_template(
        mut self,
        url: impl Into<String>,
        source: Arc<dyn TemplateSource>,
    ) -> Self {
        self.release = Some(ReleaseTemplate {
            url: url.into(),
            source,
        });
        self
    }

    pub fn rack(&self) -> &str {
        &self.rack
    }

    pub const fn validator(&self) -> &ScaleValidator {
        &self.validator
    }

    /// Current rack system, from the rack stack's parameters.
    pub async fn system(&self) -> Result<RackSystem> {
        let description = self.cache.describe_stack(&self.rack).await?;
        let stack = description.single(&self.rack)?;
        system_from_stack(stack)
    }

    /// Validate the request against the capacity floor, then update the rack stack.
    pub async fn scale(&self, request: &RackScaleRequest) -> Result<RackSystem> {
        let current = self.system().await?;
        let max = self.validator.validate(request).await?;

        let description = self.cache.describe_stack(&self.rack).await?;
        let stack = description.single(&self.rack)?;

        let instance_type = request
            .instance_type
            .clone()
            .unwrap_or_else(|| current.instance_type.clone());
        let version = request
            .version
            .clone()
            .unwrap_or_else(|| current.version.clone());

        let mut updates = vec![
            ParameterUpdate::set(parameters::INSTANCE_COUNT, request.count.to_string()),
            ParameterUpdate::set(parameters::INSTANCE_TYPE, instance_type.clone()),
            ParameterUpdate::set(parameters::VERSION, version.clone()),
        ];
        updates.extend(
            stack
                .parameters
                .keys()
                .filter(|key| !is_capacity_parameter(key))
                .map(ParameterUpdate::keep),
        );

        let mut template_url = None;
        if let Some(release) = self.release.as_ref().filter(|_| version != current.version) {
            let url = release.url_for(&version);
            let template = release.source.fetch(&url).await?;
            updates.retain(|update| {
                let declared = template.declares(&update.key);
                if !declared {
                    debug!(
                        parameter = %update.key,
                        "Dropping parameter the release template no longer declares"
                    );
                }
                declared
            });
            template_url = Some(url);
        }

        info!(
            rack = %self.rack,
            from = current.count,
            to = request.count,
            max_concurrency = max,
            "Scaling rack"
        );

        self.cache
            .update_stack(&StackUpdate {
                name: self.rack.clone(),
                template_url,
                parameters: updates,
                capabilities: vec![CAPABILITY_IAM.to_string()],
            })
            .await?;

        Ok(RackSystem {
            name: self.rack.clone(),
            count: request.count,
            instance_type,
            version,
            status: "updating".to_string(),
        })
    }
}

fn is_capacity_parameter(key: &str) -> bool {
    matches!(
        key,
        parameters::INSTANCE_COUNT | parameters::INSTANCE_TYPE | parameters::VERSION
    )
}

fn system_from_stack(stack: &Stack) -> Result<RackSystem> {
    let count = stack.parameter(parameters::INSTANCE_COUNT).unwrap_or("0");
    let count = count.parse::<u32>().map_err(|e| {
        Error::invalid_property(
            parameters::INSTANCE_COUNT,
            format!("expected an integer, got {count:?}: {e}"),
        )
    })?;

    Ok(RackSystem {
        name: stack.name.clone(),
        count,
        instance_type: stack
            .parameter(parameters::INSTANCE_TYPE)
            .unwrap_or_default()
            .to_string(),
        version: stack
            .parameter(parameters::VERSION)
            .unwrap_or_default()
            .to_string(),
        status: stack.human_status().to_string(),
    })
}
