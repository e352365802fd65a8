//! Built-in domain adapters.
//!
//! Each sub-module implements one payment method's capability surface:
//! destination building and returned-payload interpretation. Adapters never
//! touch the store or the launcher; the orchestrator owns both.

pub mod local_payment;
pub mod wallet;

pub use local_payment::LocalPaymentAdapter;
pub use wallet::WalletAdapter;
