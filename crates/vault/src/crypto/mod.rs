//! Cryptographic building blocks for the blob format.
//!
//! Free of authenticator and configuration dependencies: every function here
//! is a pure transformation of its inputs.
//!
//! # Pipeline
//!
//! ```text
//! secret(32) ─┐
//! salt(64) ───┼─ HKDF-SHA-512(info = KDF_INFO) ─▶ key(32)
//!             │
//! plaintext ─ pad ─ AES-256-GCM(key, iv(12)) ─▶ ciphertext+tag
//!
//! blob = base64(salt || iv || ciphertext+tag)
//! ```

pub mod blob;
pub mod cipher;
pub mod kdf;
pub mod padding;

pub use blob::EncodedBlob;
