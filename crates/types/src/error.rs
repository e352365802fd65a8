//! Unified error type for the payswitch workspace.

use thiserror::Error;

/// Enumerates all error kinds that can occur across payswitch crates.
#[derive(Debug, Error)]
pub enum SwitchError {
    /// The destination URL is malformed, the companion app is not installed,
    /// or the OS refused the hand-off. Fatal; retrying is a user action at a
    /// higher layer.
    #[error("destination unavailable: {0}")]
    DestinationUnavailable(String),

    /// The pending request could not be persisted or read back. When raised
    /// by `begin_switch` the hand-off was aborted, so no untrackable switch
    /// is in flight.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The external context returned control with a payload that cannot be
    /// interpreted. Delivered inside `SwitchOutcome::Error`; the pending
    /// record is still cleared.
    #[error("malformed result: {0}")]
    MalformedResult(String),

    /// Metadata encryption or decryption failure.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted slot key does not name any known slot.
    #[error("unknown slot: {0}")]
    UnknownSlot(String),
}

// ── Feature-gated From impls ──────────────────────────────────────────────────

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for SwitchError {
    fn from(e: sqlx::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}

impl SwitchError {
    /// Returns `true` if the error ends the switch attempt outright.
    ///
    /// Nothing in this SDK retries automatically; a fatal error means the
    /// hand-off never happened (or was rolled back) and the host may offer
    /// the user a fresh attempt.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DestinationUnavailable(_) | Self::Persistence(_) | Self::Crypto(_)
        )
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SwitchError>;
