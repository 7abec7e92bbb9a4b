//! Error types shared by the vault library and its callers.

use thiserror::Error;

use crate::protocol::{HEADER_LEN, SECRET_LEN};

/// Top-level error returned by `encrypt` and `decrypt`.
///
/// Each variant has a stable machine-readable code (see [`VaultError::code`])
/// so callers can present failures without matching on display strings:
/// - [`VaultError::Authenticator`] → `authenticator_error`
/// - [`VaultError::Format`] → `format_error`
/// - [`VaultError::Integrity`] → `integrity_error`
/// - [`VaultError::Decode`] → `decode_error`
/// - [`VaultError::Crypto`] → `crypto_error`
#[derive(Debug, Error)]
pub enum VaultError {
    /// Enrollment or assertion was declined, cancelled, or found no credential.
    #[error("authenticator error: {0}")]
    Authenticator(#[from] AuthenticatorError),

    /// The encoded blob is not valid base64 or is too short to parse.
    #[error("malformed blob: {0}")]
    Format(#[from] FormatError),

    /// AEAD tag verification failed.
    ///
    /// Tampering, a wrong secret and a corrupted ciphertext all land here and
    /// carry no further detail.
    #[error("integrity check failed")]
    Integrity,

    /// The authenticated plaintext has an invalid padding marker or is not UTF-8.
    #[error("decrypted content could not be decoded")]
    Decode,

    /// A derivation or encryption primitive failed unexpectedly.
    #[error("crypto failure: {0}")]
    Crypto(&'static str),
}

impl VaultError {
    /// Returns the stable error code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            VaultError::Authenticator(_) => "authenticator_error",
            VaultError::Format(_) => "format_error",
            VaultError::Integrity => "integrity_error",
            VaultError::Decode => "decode_error",
            VaultError::Crypto(_) => "crypto_error",
        }
    }
}

/// Failures reported by a secret provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticatorError {
    /// No credential matching this relying party has been enrolled.
    #[error("no matching credential")]
    NoCredential,

    /// The user declined or failed verification.
    #[error("ceremony cancelled by user")]
    Cancelled,

    /// The user did not respond within the ceremony timeout.
    #[error("ceremony timed out")]
    Timeout,

    /// The authenticator does not support the PRF extension.
    #[error("PRF extension output unavailable")]
    ExtensionUnavailable,

    /// The provider returned secret material of the wrong length.
    #[error("invalid secret length: expected {SECRET_LEN} bytes, got {0}")]
    InvalidSecretLength(usize),
}

/// Reasons an encoded blob could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The input is not standard-alphabet base64.
    #[error("invalid base64")]
    InvalidBase64,

    /// The decoded blob is shorter than salt + iv.
    #[error("blob too short: expected at least {HEADER_LEN} bytes, got {len}")]
    Truncated {
        /// Decoded length in bytes.
        len: usize,
    },
}
