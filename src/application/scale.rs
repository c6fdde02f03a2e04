//! Rack capacity safety check.
//!
//! The rack must always keep one instance of headroom above the largest
//! externally reachable process, otherwise a rolling deploy of that process
//! has nowhere to place its replacement tasks.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::rack::capacity_floor;
use crate::domain::RackScaleRequest;
use crate::error::{Error, Result};
use crate::port::AppRegistry;

pub struct ScaleValidator {
    registry: Arc<dyn AppRegistry>,
}

impl ScaleValidator {
    pub fn new(registry: Arc<dyn AppRegistry>) -> Self {
        Self { registry }
    }

    /// Largest instance count of any process that publishes an external port.
    ///
    /// Any failure loading an app's release or formation fails the whole
    /// computation; a partial view would understate the floor.
    pub async fn max_required_concurrency(&self) -> Result<u32> {
        let mut max = 0;

        for app in self.registry.list_apps().await? {
            let Some(release) = self.registry.latest_release(&app.name).await? else {
                debug!(app = %app.name, "App has no release, skipping");
                continue;
            };
            let formation = self.registry.formation(&app.name).await?;

            for entry in release.manifest.external_entries() {
                if let Some(scale) = formation.entry(&entry.name) {
                    if scale.count > max {
                        debug!(
                            app = %app.name,
                            process = %entry.name,
                            count = scale.count,
                            "New max process concurrency"
                        );
                        max = scale.count;
                    }
                }
            }
        }

        Ok(max)
    }

    /// Reject requests below max concurrency plus one. Returns the max.
    pub async fn validate(&self, request: &RackScaleRequest) -> Result<u32> {
        let max = self.max_required_concurrency().await?;

        if request.count < capacity_floor(max) {
            warn!(
                max,
                requested = request.count,
                "Rejecting rack scale below capacity floor"
            );
            return Err(Error::ScaleViolation {
                max,
                requested: request.count,
            });
        }

        Ok(max)
    }
}
