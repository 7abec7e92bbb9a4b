//! `vault-demo` — encrypts text with a software authenticator and decrypts it back.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] and the authenticator configuration.
//! 2. Initialise structured JSON logging.
//! 3. Enroll, encrypt, print the blob; retrieve, decrypt, print the text.

mod config;
mod telemetry;

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use config::Config;
use vault::config::AuthenticatorConfig;
use vault::secret::{AutoApprove, SoftwareAuthenticator};

/// Round-trip text through an authenticator-keyed blob.
#[derive(Debug, Parser)]
#[command(name = "vault-demo", version, about)]
struct Cli {
    /// Text to encrypt. Read from stdin when omitted.
    #[arg(short, long)]
    text: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: vault-demo configuration invalid: {e}");
        e
    })?;
    let auth_cfg = AuthenticatorConfig::from_env()?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        rp_id = %auth_cfg.rp_id,
        "vault-demo starting"
    );

    // -----------------------------------------------------------------------
    // 3. Round trip
    // -----------------------------------------------------------------------
    let plaintext = match cli.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read plaintext from stdin")?;
            buf
        }
    };

    let authenticator = SoftwareAuthenticator::new(auth_cfg, Arc::new(AutoApprove));

    let blob = vault::encrypt(&authenticator, &plaintext)
        .await
        .context("encryption failed")?;
    println!("{blob}");

    let recovered = vault::decrypt(&authenticator, &blob)
        .await
        .context("decryption failed")?;
    anyhow::ensure!(recovered == plaintext, "decrypted text differs from input");
    println!("{recovered}");

    info!("round trip complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_text_flag() {
        let cli = Cli::try_parse_from(["vault-demo", "--text", "hi"]).unwrap();
        assert_eq!(cli.text.as_deref(), Some("hi"));
    }

    #[test]
    fn cli_text_is_optional() {
        let cli = Cli::try_parse_from(["vault-demo"]).unwrap();
        assert!(cli.text.is_none());
    }
}
