//! Rack API payloads.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{Manifest, Release};
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct ReleaseDto {
    pub id: String,
    pub app: String,
    #[serde(default)]
    pub manifest: String,
    pub created: DateTime<Utc>,
}

impl ReleaseDto {
    pub fn into_release(self) -> Result<Release> {
        Ok(Release {
            manifest: Manifest::parse(&self.manifest)?,
            id: self.id,
            app: self.app,
            created: self.created,
        })
    }
}

/// Newest release in `releases`, by creation time.
pub fn latest(releases: Vec<ReleaseDto>) -> Result<Option<Release>> {
    releases
        .into_iter()
        .max_by_key(|r| r.created)
        .map(ReleaseDto::into_release)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn latest_picks_newest_and_parses_manifest() {
        let releases: Vec<ReleaseDto> = serde_json::from_value(json!([
            {"id": "R1", "app": "shop", "manifest": "", "created": "2024-01-01T00:00:00Z"},
            {"id": "R2", "app": "shop", "manifest": "web:\n  ports:\n    - \"80:3000\"\n",
             "created": "2024-02-01T00:00:00Z"}
        ]))
        .unwrap();

        let release = latest(releases).unwrap().unwrap();
        assert_eq!(release.id, "R2");
        assert_eq!(release.manifest.external_entries().count(), 1);
    }

    #[test]
    fn no_releases_is_none() {
        assert!(latest(Vec::new()).unwrap().is_none());
    }
}
