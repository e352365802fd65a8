//! Async traits shared across all payswitch crates.
//!
//! Every cross-crate abstraction is defined here so that higher layers depend
//! only on `payswitch-types`, not on each other.

use crate::{Destination, ReturnData, Slot, SwitchConfig, SwitchError, SwitchRequest};
use async_trait::async_trait;
use serde_json::Value;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SwitchError>;

/// Durable storage for pending switch requests, keyed by slot.
///
/// Exactly one record is outstanding per slot; `save` overwrites. For
/// browser switches the backend must survive host process death — the
/// external browser can outlive the host.
#[async_trait]
pub trait PendingRequestStore: Send + Sync {
    /// Persist (or overwrite) the pending record for the request's slot.
    async fn save(&self, request: &SwitchRequest) -> Result<()>;
    /// Load the pending record for a slot, if one is outstanding.
    async fn load(&self, slot: Slot) -> Result<Option<SwitchRequest>>;
    /// Remove the pending record for a slot. Clearing an empty slot is not
    /// an error.
    async fn clear(&self, slot: Slot) -> Result<()>;
    /// Load every outstanding record, for return-URI matching.
    async fn load_all(&self) -> Result<Vec<SwitchRequest>>;
}

/// The seam through which the SDK relinquishes control to the OS.
///
/// Hosts substitute their platform's browser/app launching here; the SDK
/// never touches the OS directly.
pub trait HostLauncher: Send + Sync {
    /// Open the external browser at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::DestinationUnavailable`] if the OS cannot
    /// perform the hand-off.
    fn open_url(&self, url: &str) -> Result<()>;

    /// Whether the companion app's entry point exists on this device.
    fn companion_available(&self, app_id: &str) -> bool;

    /// Invoke the companion app directly (app-to-app).
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::DestinationUnavailable`] if the launch fails.
    fn launch_companion(&self, app_id: &str, request: &SwitchRequest) -> Result<()>;
}

/// Per-payment-method capability plugged in by domain adapters.
///
/// Adapters only build destinations and interpret returned data; the
/// orchestrator owns persistence, launching, matching, and delivery.
pub trait PaymentAdapter: Send + Sync {
    /// The slot this adapter's switches occupy.
    fn slot(&self) -> Slot;

    /// Build the destination for a new switch from the host config and the
    /// adapter's opaque metadata document.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::DestinationUnavailable`] if a destination
    /// cannot be built from the given metadata.
    fn build_destination(&self, config: &SwitchConfig, metadata: &Value) -> Result<Destination>;

    /// Interpret the raw returned data into the adapter's structured result.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::MalformedResult`] if the data cannot be
    /// interpreted.
    fn interpret(&self, data: &ReturnData) -> Result<Value>;
}
