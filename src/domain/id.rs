//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical resource identifier handed back to the template engine.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors. An empty id is valid: deletes and no-op
/// reconciliations report one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalId(String);

impl PhysicalId {
    /// Create a new `PhysicalId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// An empty identifier.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PhysicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PhysicalId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PhysicalId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
