//! Results of reconciling one resource event.

use serde::Serialize;

use super::id::PhysicalId;

/// How a reconciliation ended. The template engine sees all three as success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "disposition", rename_all = "snake_case")]
pub enum Disposition {
    /// The orchestration API accepted the change.
    Applied,
    /// Delete found nothing to delete.
    AlreadyAbsent,
    /// Delete failed upstream but is reported as done so teardown can continue.
    SoftFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub physical_id: PhysicalId,
    #[serde(flatten)]
    pub disposition: Disposition,
}

impl Outcome {
    #[must_use]
    pub const fn applied(physical_id: PhysicalId) -> Self {
        Self {
            physical_id,
            disposition: Disposition::Applied,
        }
    }

    #[must_use]
    pub const fn already_absent() -> Self {
        Self {
            physical_id: PhysicalId::empty(),
            disposition: Disposition::AlreadyAbsent,
        }
    }

    pub fn soft_failed(reason: impl Into<String>) -> Self {
        Self {
            physical_id: PhysicalId::empty(),
            disposition: Disposition::SoftFailed {
                reason: reason.into(),
            },
        }
    }

    #[must_use]
    pub const fn is_soft_failure(&self) -> bool {
        matches!(self.disposition, Disposition::SoftFailed { .. })
    }
}
