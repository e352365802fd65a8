//! Switch requests and the payloads the host receives back.

use crate::Slot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Where a switch hands control to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// A URL opened in the external browser (must be `http`/`https`).
    Url(String),
    /// The identifier of a separately installed companion app invoked
    /// app-to-app.
    CompanionApp(String),
}

/// An immutable record of a switch about to leave the host.
///
/// Persisted (serialized) as the pending request record, keyed by slot.
/// Metadata is an opaque structured document owned by the domain adapter;
/// it never travels in the return URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchRequest {
    pub slot: Slot,
    pub destination: Destination,
    #[serde(default)]
    pub metadata: Value,
    /// Unix milliseconds; used to prefer the most recent record when more
    /// than one pending record could match a return URI.
    pub created_at: u64,
}

impl SwitchRequest {
    /// Create a new request stamped with the current time.
    #[must_use]
    pub fn new(slot: Slot, destination: Destination) -> Self {
        Self {
            slot,
            destination,
            metadata: Value::Null,
            created_at: now_millis(),
        }
    }

    /// Attach an opaque metadata document (e.g. merchant account id,
    /// payment id from the gateway).
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

fn now_millis() -> u64 {
    u64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis(),
    )
    .unwrap_or(u64::MAX)
}

/// What the host hands to the Result Interceptor when it regains control.
#[derive(Debug, Clone)]
pub enum ReturnPayload {
    /// A deep-link return URI routed by the OS's URI-scheme mechanism.
    Uri(String),
    /// A structured in-process response from a companion app.
    Companion(CompanionResult),
}

/// OS-level result of a companion-app switch.
#[derive(Debug, Clone)]
pub struct CompanionResult {
    pub slot: Slot,
    pub status: CompanionStatus,
    /// Structured payload on success; a companion cancel legitimately
    /// carries no document.
    pub document: Option<Value>,
}

/// How the OS classified the companion app's exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionStatus {
    Completed,
    Canceled,
}
