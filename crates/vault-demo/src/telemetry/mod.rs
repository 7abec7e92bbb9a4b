//! Telemetry initialisation for the demo binary.
//!
//! Structured JSON logs on stderr, so stdout carries only the blob and the
//! recovered text.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber at the configured level.
///
/// # Errors
///
/// Returns an error if the level does not parse or a subscriber is already set.
pub fn init(log_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter(log_level)?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise vault-demo tracing subscriber: {e}"))
}

/// `RUST_LOG` when set, otherwise `log_level`.
fn filter(log_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level {log_level:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_level_and_directives() {
        assert!(filter("debug").is_ok());
        assert!(filter("info,vault=trace").is_ok());
    }

    #[test]
    fn rejects_malformed_level() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(filter("vault=notalevel").is_err());
        }
    }
}
