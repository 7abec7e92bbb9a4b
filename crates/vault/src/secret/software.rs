//! [`SoftwareAuthenticator`]: in-process emulation of a PRF-capable authenticator.
//!
//! Models the CTAP2 `hmac-secret` extension as exposed through WebAuthn `prf`:
//!
//! ```text
//! cred_random = HMAC-SHA-256(device_secret, SHA-256(rp_id) || credential_id)
//! prf_salt    = SHA-256("WebAuthn PRF" || 0x00 || prf_input)
//! output      = HMAC-SHA-256(cred_random, prf_salt)
//! ```
//!
//! Only credential ids are stored; `cred_random` is recomputed on every
//! evaluation, so the device secret is the sole long-lived key.

use std::sync::Arc;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use common::protocol::SECRET_LEN;
use common::AuthenticatorError;

use super::presence::{Ceremony, UserPresence};
use super::{Secret, SecretProvider};
use crate::config::AuthenticatorConfig;

type HmacSha256 = Hmac<Sha256>;

/// Length of generated credential ids.
pub const CREDENTIAL_ID_LEN: usize = 16;

/// Domain label prepended to PRF inputs before hashing.
const PRF_LABEL: &[u8] = b"WebAuthn PRF";

#[derive(Clone)]
struct Credential {
    id: [u8; CREDENTIAL_ID_LEN],
    rp_id: String,
}

/// Software stand-in for a platform authenticator.
///
/// Clones share the device secret and the credential list, like two browser
/// tabs talking to the same hardware key.
#[derive(Clone)]
pub struct SoftwareAuthenticator {
    device_secret: Arc<Zeroizing<[u8; SECRET_LEN]>>,
    config: AuthenticatorConfig,
    prf_salt: [u8; 32],
    presence: Arc<dyn UserPresence>,
    credentials: Arc<RwLock<Vec<Credential>>>,
}

impl SoftwareAuthenticator {
    /// Create an authenticator with a fresh random device secret.
    pub fn new(config: AuthenticatorConfig, presence: Arc<dyn UserPresence>) -> Self {
        let mut device_secret = [0u8; SECRET_LEN];
        OsRng.fill_bytes(&mut device_secret);
        Self::with_device_secret(device_secret, config, presence)
    }

    /// Create an authenticator with a caller-supplied device secret.
    pub fn with_device_secret(
        device_secret: [u8; SECRET_LEN],
        config: AuthenticatorConfig,
        presence: Arc<dyn UserPresence>,
    ) -> Self {
        let prf_salt = prf_salt(config.prf_input.as_bytes());
        Self {
            device_secret: Arc::new(Zeroizing::new(device_secret)),
            config,
            prf_salt,
            presence,
            credentials: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// The same device, answering for a different relying party.
    pub fn scoped_to(&self, rp_id: impl Into<String>) -> Self {
        let mut scoped = self.clone();
        scoped.config.rp_id = rp_id.into();
        scoped
    }

    /// The same device, with a different user answering its prompts.
    pub fn with_presence(&self, presence: Arc<dyn UserPresence>) -> Self {
        Self {
            presence,
            ..self.clone()
        }
    }

    /// Returns `true` if a credential exists for the configured relying party.
    pub async fn is_enrolled(&self) -> bool {
        self.newest_credential().await.is_some()
    }

    async fn newest_credential(&self) -> Option<[u8; CREDENTIAL_ID_LEN]> {
        let credentials = self.credentials.read().await;
        credentials
            .iter()
            .rev()
            .find(|c| c.rp_id == self.config.rp_id)
            .map(|c| c.id)
    }

    /// Wait for the user's gesture, bounded by the ceremony timeout.
    async fn gesture(&self, ceremony: Ceremony) -> Result<(), AuthenticatorError> {
        let answer =
            tokio::time::timeout(self.config.ceremony_timeout(), self.presence.confirm(ceremony))
                .await;
        match answer {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(ceremony = %ceremony, "user declined ceremony");
                Err(AuthenticatorError::Cancelled)
            }
            Err(_) => {
                warn!(
                    ceremony = %ceremony,
                    timeout_secs = self.config.ceremony_timeout_secs,
                    "ceremony timed out"
                );
                Err(AuthenticatorError::Timeout)
            }
        }
    }

    fn evaluate_prf(&self, credential_id: &[u8]) -> Result<Secret, AuthenticatorError> {
        let mut mac = HmacSha256::new_from_slice(&self.device_secret[..])
            .map_err(|_| AuthenticatorError::ExtensionUnavailable)?;
        mac.update(&Sha256::digest(self.config.rp_id.as_bytes()));
        mac.update(credential_id);
        let mut cred_random = Zeroizing::new([0u8; 32]);
        cred_random.copy_from_slice(&mac.finalize().into_bytes());

        let mut mac = HmacSha256::new_from_slice(&cred_random[..])
            .map_err(|_| AuthenticatorError::ExtensionUnavailable)?;
        mac.update(&self.prf_salt);
        Secret::from_slice(&mac.finalize().into_bytes())
    }
}

fn prf_salt(prf_input: &[u8]) -> [u8; 32] {
    Sha256::new()
        .chain_update(PRF_LABEL)
        .chain_update([0u8])
        .chain_update(prf_input)
        .finalize()
        .into()
}

#[async_trait]
impl SecretProvider for SoftwareAuthenticator {
    async fn enroll(&self) -> Result<Option<Secret>, AuthenticatorError> {
        self.gesture(Ceremony::Registration).await?;

        let mut id = [0u8; CREDENTIAL_ID_LEN];
        OsRng.fill_bytes(&mut id);
        self.credentials.write().await.push(Credential {
            id,
            rp_id: self.config.rp_id.clone(),
        });
        info!(rp_id = %self.config.rp_id, "credential created");

        if self.config.withhold_prf_on_create {
            debug!("withholding PRF output at registration");
            return Ok(None);
        }
        self.evaluate_prf(&id).map(Some)
    }

    async fn retrieve(&self) -> Result<Secret, AuthenticatorError> {
        let Some(id) = self.newest_credential().await else {
            warn!(rp_id = %self.config.rp_id, "no credential for relying party");
            return Err(AuthenticatorError::NoCredential);
        };
        self.gesture(Ceremony::Assertion).await?;
        self.evaluate_prf(&id)
    }
}

impl std::fmt::Debug for SoftwareAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareAuthenticator")
            .field("rp_id", &self.config.rp_id)
            .field("device_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
