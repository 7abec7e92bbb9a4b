//! HKDF-SHA-512 derivation of the per-blob AES key.

use hkdf::{Hkdf, InvalidLength};
use sha2::Sha512;
use zeroize::Zeroizing;

use common::protocol::{KEY_LEN, SALT_LEN, SECRET_LEN};

/// AES-256 key that is zeroed when dropped.
pub type DerivedKey = Zeroizing<[u8; KEY_LEN]>;

/// Derive a [`KEY_LEN`]-byte key from the authenticator secret.
///
/// Extract uses `salt` as the HKDF salt and `secret` as input key material;
/// expand uses `info` as context. Same inputs always give the same key.
///
/// # Errors
///
/// Returns [`InvalidLength`] only if the requested output exceeds what
/// SHA-512 HKDF can expand to, which a 32-byte key never does.
pub fn derive_key(
    secret: &[u8; SECRET_LEN],
    salt: &[u8; SALT_LEN],
    info: &[u8],
) -> Result<DerivedKey, InvalidLength> {
    let hkdf = Hkdf::<Sha512>::new(Some(&salt[..]), secret);
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    hkdf.expand(info, &mut key[..])?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::protocol::KDF_INFO;

    #[test]
    fn derive_is_deterministic() {
        let secret = [9u8; SECRET_LEN];
        let salt = [1u8; SALT_LEN];
        let a = derive_key(&secret, &salt, KDF_INFO).unwrap();
        let b = derive_key(&secret, &salt, KDF_INFO).unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn different_salts_produce_different_keys() {
        let secret = [9u8; SECRET_LEN];
        let a = derive_key(&secret, &[1u8; SALT_LEN], KDF_INFO).unwrap();
        let b = derive_key(&secret, &[2u8; SALT_LEN], KDF_INFO).unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn different_secrets_produce_different_keys() {
        let salt = [1u8; SALT_LEN];
        let a = derive_key(&[0u8; SECRET_LEN], &salt, KDF_INFO).unwrap();
        let b = derive_key(&[1u8; SECRET_LEN], &salt, KDF_INFO).unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn info_separates_domains() {
        let secret = [9u8; SECRET_LEN];
        let salt = [1u8; SALT_LEN];
        let a = derive_key(&secret, &salt, KDF_INFO).unwrap();
        let b = derive_key(&secret, &salt, b"some other protocol").unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn known_answer_for_zero_inputs() {
        let key = derive_key(&[0u8; SECRET_LEN], &[0u8; SALT_LEN], KDF_INFO).unwrap();
        let expected: [u8; KEY_LEN] = [
            0x95, 0x32, 0x4e, 0x24, 0x9c, 0x20, 0x2e, 0x1e, 0x5e, 0xe6, 0x1d, 0x8a, 0x60, 0xf4,
            0xa0, 0xbc, 0x04, 0x8b, 0x72, 0xa6, 0xc1, 0x92, 0x61, 0x1d, 0xf6, 0x95, 0xc8, 0x12,
            0x93, 0x6f, 0x84, 0x10,
        ];
        assert_eq!(*key, expected);
    }

    #[test]
    fn matches_direct_hkdf_expand() {
        let secret = [5u8; SECRET_LEN];
        let salt = [6u8; SALT_LEN];
        let key = derive_key(&secret, &salt, KDF_INFO).unwrap();

        let (_, hk) = Hkdf::<Sha512>::extract(Some(&salt[..]), &secret);
        let mut expected = [0u8; KEY_LEN];
        hk.expand(KDF_INFO, &mut expected).unwrap();
        assert_eq!(*key, expected);
    }
}
