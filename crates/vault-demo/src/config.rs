//! Configuration loading for the demo binary.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Demo configuration read from unprefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build vault-demo configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise vault-demo configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}
