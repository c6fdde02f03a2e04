//! Environment bundles applied to every container of a task definition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered `KEY=VALUE` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment(BTreeMap<String, String>);

impl Environment {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse a newline-delimited `KEY=VALUE` payload.
    ///
    /// Blank lines, `#` comments and lines without `=` are skipped. Values
    /// keep everything after the first `=`, including further `=` signs.
    #[must_use]
    pub fn parse(data: &str) -> Self {
        let vars = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .filter(|(key, _)| !key.trim().is_empty())
            .map(|(key, value)| (key.trim().to_string(), value.to_string()))
            .collect();
        Self(vars)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_noise() {
        let env = Environment::parse("FOO=bar\n\n# comment\nnot-a-pair\nURL=postgres://u:p@h/db?a=b\n");
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("FOO"), Some("bar"));
        assert_eq!(env.get("URL"), Some("postgres://u:p@h/db?a=b"));
    }

    #[test]
    fn parse_handles_crlf_and_empty_values() {
        let env = Environment::parse("A=1\r\nB=\r\n");
        assert_eq!(env.get("A"), Some("1"));
        assert_eq!(env.get("B"), Some(""));
    }

    #[test]
    fn iteration_is_sorted() {
        let env: Environment = [("Z", "1"), ("A", "2")].into_iter().collect();
        let keys: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "Z"]);
    }
}
