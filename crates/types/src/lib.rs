//! Core types and traits for the payswitch workspace.
//!
//! This crate defines the shared abstractions used across the SDK: the
//! unified error type, slot identifiers, switch request/outcome
//! representations, and the async traits that the store and flow layers
//! implement.

pub mod config;
pub mod error;
pub mod outcome;
pub mod request;
pub mod slot;
pub mod traits;

pub use config::SwitchConfig;
pub use error::SwitchError;
pub use outcome::{ReturnData, SwitchOutcome};
pub use request::{CompanionResult, CompanionStatus, Destination, ReturnPayload, SwitchRequest};
pub use slot::Slot;
pub use traits::{HostLauncher, PaymentAdapter, PendingRequestStore};
