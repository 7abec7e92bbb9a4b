//! `encrypt` and `decrypt`: the two operations of the protocol.
//!
//! Both are linear pipelines. The only branch is the enroll → retrieve
//! fallback inside [`enroll_secret`]. Nothing is kept between calls; the
//! credential behind the [`SecretProvider`] is the only durable state.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use tracing::debug;
use zeroize::Zeroizing;

use common::protocol::{IV_LEN, KDF_INFO, SALT_LEN};
use common::VaultError;

use crate::crypto::cipher::{self, CipherError};
use crate::crypto::{kdf, padding, EncodedBlob};
use crate::secret::{enroll_secret, SecretProvider};

/// Encrypt `plaintext` under a key bound to a newly enrolled credential.
///
/// A fresh 64-byte salt and 12-byte IV are drawn from the OS CSPRNG for every
/// call, so encrypting the same text twice gives different blobs.
///
/// # Errors
///
/// Returns [`VaultError::Authenticator`] if enrollment (or its retrieve
/// fallback) fails, and [`VaultError::Crypto`] if a primitive fails.
pub async fn encrypt<P>(provider: &P, plaintext: &str) -> Result<String, VaultError>
where
    P: SecretProvider + ?Sized,
{
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);
    encrypt_with(provider, plaintext, salt, iv).await
}

/// [`encrypt`] with caller-chosen salt and IV.
pub(crate) async fn encrypt_with<P>(
    provider: &P,
    plaintext: &str,
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
) -> Result<String, VaultError>
where
    P: SecretProvider + ?Sized,
{
    let padded = padding::pad(plaintext.as_bytes());

    let secret = enroll_secret(provider).await?;
    let key = kdf::derive_key(secret.expose(), &salt, KDF_INFO)
        .map_err(|_| VaultError::Crypto("key derivation failed"))?;

    let ciphertext =
        cipher::seal(&key[..], &iv, &padded).map_err(|_| VaultError::Crypto("encryption failed"))?;

    let blob = EncodedBlob {
        salt,
        iv,
        ciphertext,
    };
    let encoded = blob.to_string_repr();
    debug!(blob_len = encoded.len(), "plaintext sealed");
    Ok(encoded)
}

/// Decrypt a blob produced by [`encrypt`].
///
/// The blob is parsed before the authenticator is consulted, so malformed
/// input never triggers a prompt.
///
/// # Errors
///
/// - [`VaultError::Format`] if `content` is not base64 or is shorter than
///   salt + iv.
/// - [`VaultError::Authenticator`] if no credential matches or the user
///   cancels.
/// - [`VaultError::Integrity`] if the tag does not verify.
/// - [`VaultError::Decode`] if the authenticated plaintext has a bad padding
///   marker or is not UTF-8.
pub async fn decrypt<P>(provider: &P, content: &str) -> Result<String, VaultError>
where
    P: SecretProvider + ?Sized,
{
    let blob = EncodedBlob::parse(content)?;

    let secret = provider.retrieve().await?;
    let key = kdf::derive_key(secret.expose(), &blob.salt, KDF_INFO)
        .map_err(|_| VaultError::Crypto("key derivation failed"))?;

    let padded = cipher::open(&key[..], &blob.iv, &blob.ciphertext)
        .map(Zeroizing::new)
        .map_err(|e| match e {
            CipherError::AeadFailure => VaultError::Integrity,
            CipherError::InvalidKeyLength => VaultError::Crypto("invalid derived key length"),
        })?;

    let plaintext = padding::unpad(&padded).ok_or(VaultError::Decode)?;
    let text = std::str::from_utf8(plaintext).map_err(|_| VaultError::Decode)?;
    debug!(ciphertext_len = blob.ciphertext.len(), "blob opened");
    Ok(text.to_owned())
}
