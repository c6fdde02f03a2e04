//! Infrastructure stack descriptions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One stack as reported by the stack API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub outputs: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Stack {
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Human-friendly status: `UPDATE_IN_PROGRESS` becomes `updating`.
    #[must_use]
    pub fn human_status(&self) -> &'static str {
        match self.status.as_str() {
            "CREATE_IN_PROGRESS" => "creating",
            "CREATE_COMPLETE" | "UPDATE_COMPLETE" | "ROLLBACK_COMPLETE"
            | "UPDATE_ROLLBACK_COMPLETE" => "running",
            "UPDATE_IN_PROGRESS"
            | "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS"
            | "UPDATE_ROLLBACK_IN_PROGRESS"
            | "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS"
            | "ROLLBACK_IN_PROGRESS" => "updating",
            "DELETE_IN_PROGRESS" => "deleting",
            "DELETE_FAILED" => "error",
            "CREATE_FAILED" | "UPDATE_ROLLBACK_FAILED" | "ROLLBACK_FAILED" => "failed",
            _ => "unknown",
        }
    }
}

/// The payload returned by a describe call: zero or more stacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackDescription {
    pub stacks: Vec<Stack>,
}

impl StackDescription {
    #[must_use]
    pub const fn new(stacks: Vec<Stack>) -> Self {
        Self { stacks }
    }

    /// The single stack a by-name describe is expected to return.
    pub fn single(&self, name: &str) -> Result<&Stack> {
        match self.stacks.as_slice() {
            [stack] => Ok(stack),
            _ => Err(Error::Parse(format!("could not load stack: {name}"))),
        }
    }
}

/// One parameter in a stack update. `value: None` keeps the previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterUpdate {
    pub key: String,
    pub value: Option<String>,
}

impl ParameterUpdate {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    pub fn keep(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

/// A write against a named stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackUpdate {
    pub name: String,
    /// New template location; `None` reuses the current template.
    pub template_url: Option<String>,
    pub parameters: Vec<ParameterUpdate>,
    pub capabilities: Vec<String>,
}

/// The parts of a stack template the rack cares about: which parameters it
/// declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTemplate {
    parameters: BTreeSet<String>,
}

#[derive(Deserialize)]
struct TemplateBody {
    #[serde(rename = "Parameters", default)]
    parameters: BTreeMap<String, serde_json::Value>,
}

impl StackTemplate {
    /// Decode a JSON template body.
    pub fn parse(body: &str) -> Result<Self> {
        let body: TemplateBody = serde_json::from_str(body)?;
        Ok(Self {
            parameters: body.parameters.into_keys().collect(),
        })
    }

    pub fn with_parameters<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameters: names.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn declares(&self, key: &str) -> bool {
        self.parameters.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_requires_exactly_one_stack() {
        let empty = StackDescription::default();
        assert!(empty.single("rack").is_err());

        let one = StackDescription::new(vec![Stack {
            name: "rack".into(),
            ..Default::default()
        }]);
        assert_eq!(one.single("rack").unwrap().name, "rack");
    }

    #[test]
    fn human_status_maps_known_states() {
        let mut stack = Stack {
            status: "UPDATE_IN_PROGRESS".into(),
            ..Default::default()
        };
        assert_eq!(stack.human_status(), "updating");
        stack.status = "CREATE_COMPLETE".into();
        assert_eq!(stack.human_status(), "running");
        stack.status = "SOMETHING_NEW".into();
        assert_eq!(stack.human_status(), "unknown");
    }

    #[test]
    fn template_lists_declared_parameters() {
        let template = StackTemplate::parse(
            r#"{"Parameters": {"InstanceCount": {"Type": "Number"}, "Version": {}}, "Resources": {}}"#,
        )
        .unwrap();
        assert!(template.declares("InstanceCount"));
        assert!(template.declares("Version"));
        assert!(!template.declares("Subnets"));

        assert!(!StackTemplate::parse("{}").unwrap().declares("Version"));
        assert!(StackTemplate::parse("not json").is_err());
    }
}
