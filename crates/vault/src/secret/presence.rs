//! User-presence gestures consulted by the software authenticator.

use async_trait::async_trait;

/// Which authenticator ceremony is asking for a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ceremony {
    /// Credential creation.
    Registration,
    /// Proof of possession of an existing credential.
    Assertion,
}

impl Ceremony {
    /// Short name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Ceremony::Registration => "registration",
            Ceremony::Assertion => "assertion",
        }
    }
}

impl std::fmt::Display for Ceremony {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether the user approves a ceremony.
///
/// `false` means the user declined or failed verification.
#[async_trait]
pub trait UserPresence: Send + Sync {
    /// Wait for the user's answer to `ceremony`.
    async fn confirm(&self, ceremony: Ceremony) -> bool;
}

/// Approves every ceremony immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

#[async_trait]
impl UserPresence for AutoApprove {
    async fn confirm(&self, _ceremony: Ceremony) -> bool {
        true
    }
}

/// Declines every ceremony immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDeny;

#[async_trait]
impl UserPresence for AutoDeny {
    async fn confirm(&self, _ceremony: Ceremony) -> bool {
        false
    }
}
