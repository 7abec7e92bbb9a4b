//! AES-256-GCM sealing and opening of padded plaintext.
//!
//! **Nonce reuse:** every call to [`seal`] is paired with a key derived from a
//! fresh 64-byte salt, so an IV never repeats under the same key even though
//! the IV itself is only 96 bits.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use thiserror::Error;

use common::protocol::{IV_LEN, KEY_LEN};

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// AES-GCM encryption or tag verification failed.
    #[error("aead operation failed")]
    AeadFailure,
}

/// Encrypt `plaintext` under `key` and `iv` with no associated data.
///
/// Returns the ciphertext with the 16-byte tag appended.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error.
pub fn seal(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    cipher
        .encrypt(Nonce::from_slice(iv), plaintext)
        .map_err(|_| CipherError::AeadFailure)
}

/// Decrypt and authenticate `ciphertext` (tag included) under `key` and `iv`.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AeadFailure`] if authentication fails (wrong key,
/// tampered data, or input shorter than a tag).
pub fn open(key: &[u8], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| CipherError::AeadFailure)
}

fn build_cipher(key: &[u8]) -> Result<Aes256Gcm, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::protocol::TAG_LEN;

    const IV: [u8; IV_LEN] = [7u8; IV_LEN];

    #[test]
    fn seal_open_round_trip() {
        let key = [0x42u8; KEY_LEN];
        let sealed = seal(&key, &IV, b"\x01hello").unwrap();
        assert_eq!(sealed.len(), 6 + TAG_LEN);
        assert_eq!(open(&key, &IV, &sealed).unwrap(), b"\x01hello");
    }

    #[test]
    fn wrong_key_fails_open() {
        let sealed = seal(&[1u8; KEY_LEN], &IV, b"secret").unwrap();
        assert!(matches!(
            open(&[2u8; KEY_LEN], &IV, &sealed),
            Err(CipherError::AeadFailure)
        ));
    }

    #[test]
    fn wrong_iv_fails_open() {
        let key = [1u8; KEY_LEN];
        let sealed = seal(&key, &IV, b"secret").unwrap();
        assert!(open(&key, &[8u8; IV_LEN], &sealed).is_err());
    }

    #[test]
    fn invalid_key_length_rejected() {
        assert!(matches!(
            seal(&[0u8; 16], &IV, b"x"),
            Err(CipherError::InvalidKeyLength)
        ));
    }

    #[test]
    fn input_shorter_than_tag_fails_open() {
        let key = [1u8; KEY_LEN];
        assert!(open(&key, &IV, &[0u8; TAG_LEN - 1]).is_err());
        assert!(open(&key, &IV, &[]).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let key = [3u8; KEY_LEN];
        let mut sealed = seal(&key, &IV, b"tamper me").unwrap();
        sealed[0] ^= 0xFF;
        assert!(open(&key, &IV, &sealed).is_err());
    }
}
