//! Task definition reconciliation.
//!
//! Task definitions are immutable per revision: Create and Update both
//! register a new revision and return its identifier, which becomes the
//! resource's new physical id. Delete is a no-op because revisions are
//! never deregistered here; it must still succeed so dependent resources
//! can be torn down.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::task::fields;
use crate::domain::{Environment, Outcome, PhysicalId, PropertyBag, TaskSpec};
use crate::error::Result;
use crate::port::{ComputeApi, EnvironmentSource};

pub struct TaskDefinitionReconciler {
    compute: Arc<dyn ComputeApi>,
    environment: Arc<dyn EnvironmentSource>,
}

impl TaskDefinitionReconciler {
    pub fn new(compute: Arc<dyn ComputeApi>, environment: Arc<dyn EnvironmentSource>) -> Self {
        Self {
            compute,
            environment,
        }
    }

    /// Register a new revision. Serves both Create and Update.
    pub async fn register(&self, props: &PropertyBag) -> Result<Outcome> {
        let spec = TaskSpec::from_properties(props)?;

        let environment = match props.optional_str(fields::ENVIRONMENT)? {
            Some(url) if !url.is_empty() => {
                let env = self.environment.fetch(url).await?;
                debug!(family = %spec.family, vars = env.len(), "Fetched environment");
                env
            }
            _ => Environment::new(),
        };

        let spec = spec.with_environment(&environment);
        let id = self.compute.register_task_definition(&spec).await?;
        info!(
            family = %id.family,
            revision = id.revision,
            containers = spec.containers.len(),
            "Registered task definition"
        );

        Ok(Outcome::applied(PhysicalId::new(id.arn)))
    }

    pub async fn delete(&self, physical_id: Option<&PhysicalId>) -> Result<Outcome> {
        debug!(
            task_definition = physical_id.map(PhysicalId::as_str).unwrap_or_default(),
            "Task definitions are not deregistered, nothing to delete"
        );
        Ok(Outcome::applied(PhysicalId::empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Disposition;
    use crate::error::Error;
    use crate::testkit::compute::{ComputeCall, RecordingCompute};
    use crate::testkit::environment::StaticEnvironment;
    use serde_json::json;

    const ENV_URL: &str = "https://bundles.invalid/app/env";

    fn task_props(env: &str) -> PropertyBag {
        PropertyBag::from_value(json!({
            "Name": "myapp-web",
            "Environment": env,
            "Tasks": [{
                "Name": "web",
                "Image": "registry/web:3",
                "CPU": "200",
                "Memory": "512",
                "Command": "",
                "PortMappings": ["80:5000"],
            }]
        }))
        .unwrap()
    }

    fn reconciler(
        compute: Arc<RecordingCompute>,
        env: Arc<StaticEnvironment>,
    ) -> TaskDefinitionReconciler {
        TaskDefinitionReconciler::new(compute, env)
    }

    #[tokio::test]
    async fn register_applies_fetched_environment() {
        let compute = Arc::new(RecordingCompute::new());
        let env = Arc::new(StaticEnvironment::new().with_bundle(ENV_URL, "DATABASE_URL=pg://db\n"));
        let reconciler = reconciler(compute.clone(), env.clone());

        reconciler.register(&task_props(ENV_URL)).await.unwrap();

        assert_eq!(env.fetches(), vec![ENV_URL.to_string()]);
        match compute.calls().as_slice() {
            [ComputeCall::RegisterTaskDefinition(spec)] => {
                let web = &spec.containers[0];
                assert_eq!(web.environment.get("DATABASE_URL"), Some("pg://db"));
                assert_eq!(web.cpu, 200);
                assert!(web.command.is_none());
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_registers_next_revision() {
        let compute = Arc::new(RecordingCompute::new());
        let reconciler = reconciler(compute.clone(), Arc::new(StaticEnvironment::new()));

        let first = reconciler.register(&task_props("")).await.unwrap();
        let second = reconciler.register(&task_props("")).await.unwrap();

        assert_ne!(first.physical_id, second.physical_id);
        assert!(second.physical_id.as_str().ends_with("myapp-web:2"));
    }

    #[tokio::test]
    async fn no_url_means_no_fetch() {
        let env = Arc::new(StaticEnvironment::new());
        let reconciler = reconciler(Arc::new(RecordingCompute::new()), env.clone());

        reconciler.register(&task_props("")).await.unwrap();
        assert!(env.fetches().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_fails_reconciliation() {
        let compute = Arc::new(RecordingCompute::new());
        let reconciler = reconciler(compute.clone(), Arc::new(StaticEnvironment::new()));

        let result = reconciler.register(&task_props(ENV_URL)).await;
        assert!(matches!(result, Err(Error::DependencyFetch { .. })));
        assert!(compute.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_is_a_successful_no_op() {
        let compute = Arc::new(RecordingCompute::new());
        let reconciler = reconciler(compute.clone(), Arc::new(StaticEnvironment::new()));

        let outcome = reconciler
            .delete(Some(&PhysicalId::from("arn:task-definition/myapp-web:4")))
            .await
            .unwrap();
        assert_eq!(outcome.disposition, Disposition::Applied);
        assert!(compute.calls().is_empty());
    }
}
