//! Pending-request storage backends.
//!
//! Provides an in-memory store for tests and companion-only hosts, and a
//! SQLite-backed store that survives host process death (the external
//! browser may outlive the host). Request metadata is encrypted at rest.

pub mod cipher;
pub mod memory;
pub mod sqlite;

pub use cipher::MetadataCipher;
pub use memory::InMemoryPendingStore;
pub use sqlite::SqlitePendingStore;
