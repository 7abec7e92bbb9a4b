//! Authenticator-backed secret material.
//!
//! # Contract
//!
//! A [`SecretProvider`] stands in for a platform authenticator with a PRF
//! (`hmac-secret`) extension:
//!
//! 1. [`SecretProvider::enroll`] creates a durable credential and returns its
//!    PRF output, or `Ok(None)` when the platform created the credential but
//!    withheld the output.
//! 2. [`SecretProvider::retrieve`] asserts an existing credential and returns
//!    the same 32 bytes every time.
//!
//! Some authenticators only evaluate the PRF during an assertion, so
//! [`enroll_secret`] always follows a withheld enrollment with exactly one
//! retrieve.
//!
//! # Security invariants
//!
//! - Secret bytes are **never** written to disk, logged, or included in traces.
//! - [`Secret`] zeroes its buffer on drop and redacts itself in `Debug`.

pub mod presence;
pub mod software;

pub use presence::{AutoApprove, AutoDeny, Ceremony, UserPresence};
pub use software::SoftwareAuthenticator;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroize;

use common::protocol::SECRET_LEN;
use common::AuthenticatorError;

/// Fixed-size buffer holding exactly [`SECRET_LEN`] bytes of PRF output.
///
/// Boxed so moves do not leave stray copies on the stack; overwritten with
/// zeroes when dropped.
pub struct Secret(Box<[u8; SECRET_LEN]>);

impl Secret {
    /// Wrap an owned array.
    pub fn new(bytes: [u8; SECRET_LEN]) -> Self {
        Self(Box::new(bytes))
    }

    /// Copy secret material out of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticatorError::InvalidSecretLength`] if the slice is not
    /// exactly [`SECRET_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AuthenticatorError> {
        if bytes.len() != SECRET_LEN {
            return Err(AuthenticatorError::InvalidSecretLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; SECRET_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Borrow the raw bytes.
    pub fn expose(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// Source of deterministic, credential-bound secret material.
///
/// Both calls may suspend on user interaction. Implementations own any
/// timeout policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Create a new credential and try to return its secret.
    ///
    /// `Ok(None)` means the credential exists but the secret was withheld.
    async fn enroll(&self) -> Result<Option<Secret>, AuthenticatorError>;

    /// Reproduce the secret of a previously enrolled credential.
    async fn retrieve(&self) -> Result<Secret, AuthenticatorError>;
}

/// Enroll a credential and obtain its secret, falling back to one retrieve
/// when enrollment withholds it.
///
/// # Errors
///
/// Propagates the provider's [`AuthenticatorError`] from either call.
pub async fn enroll_secret<P>(provider: &P) -> Result<Secret, AuthenticatorError>
where
    P: SecretProvider + ?Sized,
{
    match provider.enroll().await? {
        Some(secret) => {
            debug!("secret returned at enrollment");
            Ok(secret)
        }
        None => {
            info!("enrollment withheld PRF output; retrieving via assertion");
            provider.retrieve().await
        }
    }
}
