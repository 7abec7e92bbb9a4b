//! `vault` — text encryption keyed by a platform authenticator's PRF output.
//!
//! The key is never stored. Each blob carries a fresh salt; the 32-byte
//! secret that authenticator produces for the credential is re-derived
//! through HKDF-SHA-512 into an AES-256-GCM key on every call.
//!
//! ```no_run
//! # async fn demo() -> Result<(), vault::VaultError> {
//! use std::sync::Arc;
//! use vault::config::AuthenticatorConfig;
//! use vault::secret::{AutoApprove, SoftwareAuthenticator};
//!
//! let authenticator =
//!     SoftwareAuthenticator::new(AuthenticatorConfig::default(), Arc::new(AutoApprove));
//! let blob = vault::encrypt(&authenticator, "Hello, world!").await?;
//! assert_eq!(vault::decrypt(&authenticator, &blob).await?, "Hello, world!");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crypto;
pub mod secret;
mod vault;

pub use common::{AuthenticatorError, FormatError, VaultError};
pub use secret::{Secret, SecretProvider};
pub use vault::{decrypt, encrypt};
