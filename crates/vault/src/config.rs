//! Configuration for the software authenticator.
//!
//! Values are read from `AUTHENTICATOR_*` environment variables; every field
//! has a default, so an empty environment yields a usable configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated software authenticator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatorConfig {
    /// Relying party identifier that scopes credentials.
    #[serde(default = "default_rp_id")]
    pub rp_id: String,

    /// PRF evaluation input. Every credential answers the same input, so
    /// changing it changes every derived secret.
    #[serde(default = "default_prf_input")]
    pub prf_input: String,

    /// How long (seconds) a ceremony waits for a user gesture.
    #[serde(default = "default_ceremony_timeout")]
    pub ceremony_timeout_secs: u64,

    /// Emulate authenticators that only evaluate the PRF during assertion.
    #[serde(default)]
    pub withhold_prf_on_create: bool,
}

fn default_rp_id() -> String {
    "localhost".into()
}
fn default_prf_input() -> String {
    "prf-vault".into()
}
fn default_ceremony_timeout() -> u64 {
    60
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            rp_id: default_rp_id(),
            prf_input: default_prf_input(),
            ceremony_timeout_secs: default_ceremony_timeout(),
            withhold_prf_on_create: false,
        }
    }
}

impl AuthenticatorConfig {
    /// Load and validate configuration from `AUTHENTICATOR_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("AUTHENTICATOR"))
            .build()
            .context("failed to build authenticator configuration from environment")?;

        let c: AuthenticatorConfig = cfg
            .try_deserialize()
            .context("failed to deserialise authenticator configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Ceremony timeout as a [`Duration`].
    pub fn ceremony_timeout(&self) -> Duration {
        Duration::from_secs(self.ceremony_timeout_secs)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    pub fn validate(&self) -> Result<()> {
        if self.rp_id.trim().is_empty() {
            anyhow::bail!("AUTHENTICATOR_RP_ID must not be empty");
        }
        if self.prf_input.is_empty() {
            anyhow::bail!("AUTHENTICATOR_PRF_INPUT must not be empty");
        }
        if self.ceremony_timeout_secs == 0 {
            anyhow::bail!("AUTHENTICATOR_CEREMONY_TIMEOUT_SECS must be > 0");
        }
        Ok(())
    }
}
