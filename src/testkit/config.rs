//! Canonical test configuration.

use crate::infrastructure::config::settings::Config;

/// Minimal valid configuration for rack `rack` with unreachable endpoints.
pub fn config(rack: &str) -> Config {
    Config::parse_toml(&toml(rack)).expect("test config must parse")
}

/// TOML text of [`config`], for tests that go through a file.
pub fn toml(rack: &str) -> String {
    format!(
        concat!(
            "rack = \"{rack}\"\n",
            "\n",
            "[logging]\n",
            "level = \"warn\"\n",
            "format = \"pretty\"\n",
            "\n",
            "[orchestrator]\n",
            "endpoint = \"http://127.0.0.1:9\"\n",
            "timeout_ms = 500\n",
            "connect_timeout_ms = 200\n",
            "\n",
            "[rack_api]\n",
            "url = \"http://127.0.0.1:9\"\n",
        ),
        rack = rack
    )
}
