//! The encoded blob: the only externally visible artifact.
//!
//! The string representation is
//! `base64_standard(salt(64) || iv(12) || ciphertext+tag)`.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use common::protocol::{HEADER_LEN, IV_LEN, SALT_LEN};
use common::FormatError;

/// A parsed blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlob {
    /// HKDF salt.
    pub salt: [u8; SALT_LEN],
    /// AES-GCM nonce.
    pub iv: [u8; IV_LEN],
    /// Ciphertext with the authentication tag appended.
    pub ciphertext: Vec<u8>,
}

impl EncodedBlob {
    /// Raw packed bytes: salt, then iv, then ciphertext.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Encode this blob to its canonical string representation.
    pub fn to_string_repr(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Parse a blob string.
    ///
    /// Surrounding whitespace is ignored. Anything at least [`HEADER_LEN`]
    /// bytes long parses; whether the ciphertext is authentic is left to the
    /// AEAD.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidBase64`] if `s` is not standard base64 and
    /// [`FormatError::Truncated`] if it decodes to fewer than [`HEADER_LEN`]
    /// bytes.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        let bytes = STANDARD
            .decode(s.trim())
            .map_err(|_| FormatError::InvalidBase64)?;
        if bytes.len() < HEADER_LEN {
            return Err(FormatError::Truncated { len: bytes.len() });
        }

        let (salt_bytes, rest) = bytes.split_at(SALT_LEN);
        let (iv_bytes, ciphertext) = rest.split_at(IV_LEN);

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(salt_bytes);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(iv_bytes);

        Ok(Self {
            salt,
            iv,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EncodedBlob {
        EncodedBlob {
            salt: [1u8; SALT_LEN],
            iv: [2u8; IV_LEN],
            ciphertext: vec![3u8; 20],
        }
    }

    #[test]
    fn string_repr_round_trip() {
        let blob = sample();
        let parsed = EncodedBlob::parse(&blob.to_string_repr()).unwrap();
        assert_eq!(parsed, blob);
    }

    #[test]
    fn layout_is_salt_iv_ciphertext() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), HEADER_LEN + 20);
        assert!(bytes[..SALT_LEN].iter().all(|&b| b == 1));
        assert!(bytes[SALT_LEN..HEADER_LEN].iter().all(|&b| b == 2));
        assert!(bytes[HEADER_LEN..].iter().all(|&b| b == 3));
    }

    #[test]
    fn parse_trims_whitespace() {
        let s = format!("  {}\n", sample().to_string_repr());
        assert_eq!(EncodedBlob::parse(&s).unwrap(), sample());
    }

    #[test]
    fn parse_accepts_padded_base64() {
        // 77 bytes is not a multiple of 3, so the encoder emits `=`.
        let s = STANDARD.encode([0u8; HEADER_LEN + 1]);
        assert!(s.ends_with('='));
        let blob = EncodedBlob::parse(&s).unwrap();
        assert_eq!(blob.ciphertext, vec![0u8]);
    }

    #[test]
    fn parse_accepts_header_only() {
        let s = STANDARD.encode([0u8; HEADER_LEN]);
        assert!(EncodedBlob::parse(&s).unwrap().ciphertext.is_empty());
    }

    #[test]
    fn parse_rejects_bad_base64() {
        assert_eq!(
            EncodedBlob::parse("!!!not base64!!!"),
            Err(FormatError::InvalidBase64)
        );
    }

    #[test]
    fn parse_rejects_url_safe_alphabet() {
        // 0xFB 0xFF encodes to "-_" in the URL-safe alphabet.
        let s = base64::engine::general_purpose::URL_SAFE.encode([0xFBu8, 0xFF, 0xFF].repeat(30));
        assert_eq!(EncodedBlob::parse(&s), Err(FormatError::InvalidBase64));
    }

    #[test]
    fn parse_rejects_short_blob() {
        let s = STANDARD.encode([0u8; HEADER_LEN - 1]);
        assert_eq!(
            EncodedBlob::parse(&s),
            Err(FormatError::Truncated { len: HEADER_LEN - 1 })
        );
        assert_eq!(
            EncodedBlob::parse(""),
            Err(FormatError::Truncated { len: 0 })
        );
    }
}
