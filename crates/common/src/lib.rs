//! Common error types and protocol constants shared across `prf-vault` crates.

pub mod error;
pub mod protocol;

pub use error::{AuthenticatorError, FormatError, VaultError};
