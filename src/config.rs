use std::time::Duration;

use serde::Deserialize;
use snafu::{ResultExt, Snafu};

/// Runtime knobs, read from `SENSEI_*` environment variables. Everything has
/// a default so a bare environment just works.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory receiving the daily JSON log files.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Seconds between a lesson completing and the next one starting.
    #[serde(default = "default_advance_delay")]
    pub advance_delay_seconds: u64,

    /// Number of courses in the featured carousel.
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        envy::prefixed("SENSEI_").from_env().context(EnvironmentSnafu)
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_secs(self.advance_delay_seconds)
    }
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_advance_delay() -> u64 {
    2
}

fn default_featured_count() -> usize {
    3
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("could not parse configuration from the environment: {source}"))]
    Environment { source: envy::Error },
}
