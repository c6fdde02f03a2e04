//! Composition root: builds application services from configuration.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::{
    HttpEnvironmentSource, HttpResponder, HttpTemplateSource, OrchestratorClient, RackApiClient,
};
use crate::application::{
    RackService, RequestHandler, ResourceRouter, ScaleValidator, Services, StackCache,
};
use crate::infrastructure::config::settings::Config;
use crate::port::{
    AppRegistry, ComputeApi, EnvironmentSource, Responder, StackApi, SystemClock, TemplateSource,
};

/// Outbound port implementations used by one process.
#[derive(Clone)]
pub struct Ports {
    pub compute: Arc<dyn ComputeApi>,
    pub stacks: Arc<dyn StackApi>,
    pub environment: Arc<dyn EnvironmentSource>,
    pub registry: Arc<dyn AppRegistry>,
    pub responder: Arc<dyn Responder>,
    pub templates: Arc<dyn TemplateSource>,
}

impl Ports {
    /// HTTP-backed ports. Compute and stack operations share one client.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let orchestrator = Arc::new(OrchestratorClient::from_config(&config.orchestrator));
        Self {
            compute: orchestrator.clone(),
            stacks: orchestrator,
            environment: Arc::new(HttpEnvironmentSource::from_config(&config.environment)),
            registry: Arc::new(RackApiClient::from_config(&config.rack_api)),
            responder: Arc::new(HttpResponder::new()),
            templates: Arc::new(HttpTemplateSource::from_config(&config.templates)),
        }
    }
}

/// Wire application services over `ports`.
#[must_use]
pub fn build_services(config: &Config, ports: Ports) -> Services {
    let cache = Arc::new(StackCache::new(
        ports.stacks,
        Arc::new(SystemClock),
        config.cache.stack_cache(),
    ));

    let router = ResourceRouter::new(ports.compute, ports.environment);
    let handler = RequestHandler::new(router, ports.responder);

    let mut rack = RackService::new(
        config.rack.clone(),
        Arc::clone(&cache),
        ScaleValidator::new(ports.registry),
    );
    if let Some(url) = &config.release_template_url {
        rack = rack.with_release_template(url.clone(), ports.templates);
    }

    info!(
        rack = %config.rack,
        ttl_secs = config.cache.ttl_secs,
        always_fresh = config.cache.always_fresh,
        "Services initialized"
    );

    Services {
        handler,
        cache,
        rack,
    }
}

/// Wire application services over HTTP-backed ports.
#[must_use]
pub fn services_from_config(config: &Config) -> Services {
    build_services(config, Ports::from_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RackScaleRequest, ResponseStatus};
    use crate::testkit::compute::RecordingCompute;
    use crate::testkit::config::config;
    use crate::testkit::domain::{request, stack, task_props};
    use crate::testkit::environment::StaticEnvironment;
    use crate::testkit::registry::StaticRegistry;
    use crate::testkit::responder::RecordingResponder;
    use crate::testkit::stack::ScriptedStacks;
    use crate::testkit::template::StaticTemplates;

    fn fake_ports(stacks: Arc<ScriptedStacks>) -> Ports {
        Ports {
            compute: Arc::new(RecordingCompute::new()),
            stacks,
            environment: Arc::new(StaticEnvironment::new()),
            registry: Arc::new(StaticRegistry::new()),
            responder: Arc::new(RecordingResponder::new()),
            templates: Arc::new(StaticTemplates::new()),
        }
    }

    #[tokio::test]
    async fn wired_services_share_one_cache() {
        let stacks = Arc::new(ScriptedStacks::new(vec![stack(
            "convox",
            "CREATE_COMPLETE",
            &[("InstanceCount", "2")],
        )]));
        let services = build_services(&config("convox"), fake_ports(stacks.clone()));

        services.cache.describe_stack("convox").await.unwrap();
        assert_eq!(services.rack.system().await.unwrap().count, 2);
        assert_eq!(stacks.describe_calls(), 1);

        services.rack.scale(&RackScaleRequest::count(3)).await.unwrap();
        services.cache.describe_stack("convox").await.unwrap();
        assert_eq!(stacks.describe_calls(), 2);
    }

    #[tokio::test]
    async fn wired_handler_routes_requests() {
        let services = build_services(
            &config("convox"),
            fake_ports(Arc::new(ScriptedStacks::new(vec![]))),
        );

        let response = services
            .handler
            .handle(&request(
                "Custom::ECSTaskDefinition",
                "Create",
                task_props("app-web", ""),
            ))
            .await
            .unwrap();
        assert_eq!(response.status, ResponseStatus::Success);
    }
}
