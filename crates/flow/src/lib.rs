//! Switch orchestration: initiating browser/companion-app hand-offs and
//! reconciling the results when the host regains control.
//!
//! [`SwitchClient`] persists a pending record, relinquishes control through
//! a [`payswitch_types::HostLauncher`], and later matches and classifies
//! whatever the OS hands back. [`LifecycleBridge`] hooks that capture into
//! the host's resume events and forwards outcomes to registered handlers,
//! at most once per slot. Domain adapters live under [`adapters`].

pub mod adapters;
pub mod bridge;
pub mod client;
pub mod launcher;

pub use bridge::{LifecycleBridge, SlotState};
pub use client::SwitchClient;
pub use launcher::SystemLauncher;
