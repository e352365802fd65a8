//! payswitch — app-switch orchestration for payment authentication flows.
//!
//! Integrates a host application with payment flows that switch to an
//! external browser or an installed companion app and later hand control
//! back. The SDK persists a pending record before every hand-off, matches
//! and classifies whatever the OS returns (even in a new process instance),
//! and delivers each outcome to its slot's handler at most once.
//!
//! ```no_run
//! use payswitch::{
//!     Destination, InMemoryPendingStore, LifecycleBridge, Slot, SwitchClient, SwitchConfig,
//!     SwitchRequest, SystemLauncher,
//! };
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), payswitch::SwitchError> {
//! let client = Arc::new(SwitchClient::new(
//!     SwitchConfig::new("com.example.shop.payments"),
//!     Arc::new(InMemoryPendingStore::new()),
//!     Arc::new(SystemLauncher),
//! ));
//! let bridge = LifecycleBridge::new(client);
//! bridge.register(Slot::LocalPayment, |outcome| {
//!     println!("local payment settled: {outcome:?}");
//! });
//!
//! bridge
//!     .begin_switch(SwitchRequest::new(
//!         Slot::LocalPayment,
//!         Destination::Url("https://bank.example/auth?txn=1".into()),
//!     ))
//!     .await?;
//! // ... the host resumes later, possibly in a new process:
//! bridge.on_resume(None).await?;
//! # Ok(())
//! # }
//! ```

pub use payswitch_flow::{LifecycleBridge, SlotState, SwitchClient, SystemLauncher, adapters};
pub use payswitch_store::{InMemoryPendingStore, MetadataCipher, SqlitePendingStore};
pub use payswitch_types::{
    CompanionResult, CompanionStatus, Destination, HostLauncher, PaymentAdapter,
    PendingRequestStore, ReturnData, ReturnPayload, Slot, SwitchConfig, SwitchError,
    SwitchOutcome, SwitchRequest,
};
