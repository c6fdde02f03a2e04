//! Managed applications, their releases and process formations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    #[serde(default)]
    pub status: String,
}

/// A release: one immutable build plus environment, described by a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub id: String,
    pub app: String,
    pub manifest: Manifest,
    pub created: DateTime<Utc>,
}

/// One process declared in a release manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub ports: Vec<String>,
}

impl ManifestEntry {
    /// Ports published on the host (`"80:5000"`); bare container ports are internal.
    pub fn external_ports(&self) -> impl Iterator<Item = &str> {
        self.ports
            .iter()
            .map(String::as_str)
            .filter(|port| port.contains(':'))
    }

    #[must_use]
    pub fn is_external(&self) -> bool {
        self.external_ports().next().is_some()
    }
}

/// Processes declared by a release, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct RawManifestEntry {
    #[serde(default)]
    ports: Vec<serde_yaml::Value>,
}

impl Manifest {
    /// Parse a docker-compose style YAML manifest.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: BTreeMap<String, Option<RawManifestEntry>> = serde_yaml::from_str(yaml)
            .map_err(|e| Error::Parse(format!("invalid manifest: {e}")))?;

        let entries = raw
            .into_iter()
            .map(|(name, entry)| {
                let ports = entry
                    .map(|e| e.ports)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|port| match port {
                        serde_yaml::Value::String(s) => Ok(s),
                        serde_yaml::Value::Number(n) => Ok(n.to_string()),
                        other => Err(Error::Parse(format!(
                            "invalid port for process {name}: {other:?}"
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ManifestEntry { name, ports })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn external_entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter().filter(|e| e.is_external())
    }
}

/// Current scale of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationEntry {
    pub name: String,
    pub count: u32,
    #[serde(default)]
    pub memory: u32,
}

/// Current scale of every process of an app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Formation {
    pub entries: Vec<FormationEntry>,
}

impl Formation {
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&FormationEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}
