//! Rack-wide capacity.

use serde::Serialize;

/// Stack parameter names that carry rack capacity.
pub mod parameters {
    pub const INSTANCE_COUNT: &str = "InstanceCount";
    pub const INSTANCE_TYPE: &str = "InstanceType";
    pub const VERSION: &str = "Version";
}

/// The rack as currently described by its stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RackSystem {
    pub name: String,
    pub count: u32,
    pub instance_type: String,
    pub version: String,
    pub status: String,
}

/// A proposed change to rack capacity. Unset fields keep their current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackScaleRequest {
    pub count: u32,
    pub instance_type: Option<String>,
    pub version: Option<String>,
}

impl RackScaleRequest {
    #[must_use]
    pub const fn count(count: u32) -> Self {
        Self {
            count,
            instance_type: None,
            version: None,
        }
    }
}

/// Minimum rack size: one spare instance above the largest external workload.
#[must_use]
pub const fn capacity_floor(max_concurrency: u32) -> u32 {
    max_concurrency.saturating_add(1)
}
