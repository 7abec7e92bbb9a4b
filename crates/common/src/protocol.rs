//! Blob layout and key-derivation constants.
//!
//! ```text
//! base64_standard( salt(64) || iv(12) || ciphertext || tag(16) )
//! ```
//!
//! Every parameter needed to decrypt, other than the authenticator secret,
//! travels inside the blob.

/// Length of the authenticator PRF output used as key material.
pub const SECRET_LEN: usize = 32;

/// Length of the per-encryption HKDF salt.
pub const SALT_LEN: usize = 64;

/// Length of the AES-GCM nonce.
pub const IV_LEN: usize = 12;

/// Length of the AES-GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Length of the derived AES-256 key.
pub const KEY_LEN: usize = 32;

/// Bytes preceding the ciphertext: salt followed by iv.
pub const HEADER_LEN: usize = SALT_LEN + IV_LEN;

/// Fixed HKDF `info` string identifying this protocol.
///
/// Changing it makes every existing blob undecryptable.
pub const KDF_INFO: &[u8] = b"prf-vault/v1 aes-256-gcm";
