//! In-memory [`AppRegistry`].

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::domain::{App, Formation, FormationEntry, Manifest, Release};
use crate::error::{Error, Result};
use crate::port::AppRegistry;

enum AppState {
    Released { release: Release, formation: Formation },
    Unreleased,
    Broken,
}

struct Entry {
    app: App,
    state: AppState,
}

/// Registry built up front from manifests and process counts.
#[derive(Default)]
pub struct StaticRegistry {
    entries: Vec<Entry>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a released app. `manifest` is compose-style YAML.
    #[must_use]
    pub fn with_app(mut self, name: &str, manifest: &str, counts: &[(&str, u32)]) -> Self {
        let manifest = Manifest::parse(manifest).expect("test manifest must parse");
        let formation = Formation {
            entries: counts
                .iter()
                .map(|(process, count)| FormationEntry {
                    name: (*process).to_string(),
                    count: *count,
                    memory: 256,
                })
                .collect(),
        };
        let release = Release {
            id: format!("R{}", self.entries.len() + 1),
            app: name.to_string(),
            manifest,
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        self.push(name, AppState::Released { release, formation });
        self
    }

    #[must_use]
    pub fn with_unreleased_app(mut self, name: &str) -> Self {
        self.push(name, AppState::Unreleased);
        self
    }

    /// Add an app whose release lookup fails.
    #[must_use]
    pub fn with_broken_app(mut self, name: &str) -> Self {
        self.push(name, AppState::Broken);
        self
    }

    fn push(&mut self, name: &str, state: AppState) {
        self.entries.push(Entry {
            app: App {
                name: name.to_string(),
                status: "running".to_string(),
            },
            state,
        });
    }

    fn entry(&self, app: &str) -> Result<&Entry> {
        self.entries
            .iter()
            .find(|e| e.app.name == app)
            .ok_or_else(|| Error::Upstream {
                code: "404".to_string(),
                message: format!("no such app: {app}"),
            })
    }
}

fn broken(app: &str) -> Error {
    Error::Upstream {
        code: "500".to_string(),
        message: format!("could not load {app}"),
    }
}

#[async_trait]
impl AppRegistry for StaticRegistry {
    async fn list_apps(&self) -> Result<Vec<App>> {
        Ok(self.entries.iter().map(|e| e.app.clone()).collect())
    }

    async fn latest_release(&self, app: &str) -> Result<Option<Release>> {
        match &self.entry(app)?.state {
            AppState::Released { release, .. } => Ok(Some(release.clone())),
            AppState::Unreleased => Ok(None),
            AppState::Broken => Err(broken(app)),
        }
    }

    async fn formation(&self, app: &str) -> Result<Formation> {
        match &self.entry(app)?.state {
            AppState::Released { formation, .. } => Ok(formation.clone()),
            AppState::Unreleased => Ok(Formation::default()),
            AppState::Broken => Err(broken(app)),
        }
    }
}
