//! In-memory pending-request store backed by a `HashMap` behind a `Mutex`.

use async_trait::async_trait;
use payswitch_types::{PendingRequestStore, Slot, SwitchRequest, traits::Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory [`PendingRequestStore`] for tests and for hosts that only
/// perform companion-app switches (which cannot outlive the process when
/// the host opts out of durable tracking).
pub struct InMemoryPendingStore {
    /// Slot-keyed pending requests.
    data: Mutex<HashMap<Slot, SwitchRequest>>,
}

impl InMemoryPendingStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPendingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PendingRequestStore for InMemoryPendingStore {
    /// Saves (or overwrites) the pending record for the request's slot.
    async fn save(&self, request: &SwitchRequest) -> Result<()> {
        self.data
            .lock()
            .unwrap()
            .insert(request.slot, request.clone());
        Ok(())
    }

    /// Loads the pending record for the given slot, if present.
    async fn load(&self, slot: Slot) -> Result<Option<SwitchRequest>> {
        Ok(self.data.lock().unwrap().get(&slot).cloned())
    }

    /// Removes the pending record for the given slot.
    async fn clear(&self, slot: Slot) -> Result<()> {
        self.data.lock().unwrap().remove(&slot);
        Ok(())
    }

    /// Returns every outstanding record.
    async fn load_all(&self) -> Result<Vec<SwitchRequest>> {
        Ok(self.data.lock().unwrap().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payswitch_types::Destination;

    fn request(slot: Slot) -> SwitchRequest {
        SwitchRequest::new(slot, Destination::Url("https://bank.example/auth".into()))
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = InMemoryPendingStore::new();
        store.save(&request(Slot::LocalPayment)).await.unwrap();
        let loaded = store.load(Slot::LocalPayment).await.unwrap().unwrap();
        assert_eq!(loaded.slot, Slot::LocalPayment);
    }

    #[tokio::test]
    async fn test_load_missing() {
        let store = InMemoryPendingStore::new();
        assert!(store.load(Slot::Venmo).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemoryPendingStore::new();
        store.save(&request(Slot::ThreeDSecure)).await.unwrap();
        store.clear(Slot::ThreeDSecure).await.unwrap();
        assert!(store.load(Slot::ThreeDSecure).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_empty_slot_is_ok() {
        let store = InMemoryPendingStore::new();
        store.clear(Slot::SepaDebit).await.unwrap();
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = InMemoryPendingStore::new();
        let first = request(Slot::LocalPayment);
        store.save(&first).await.unwrap();
        let second = SwitchRequest::new(
            Slot::LocalPayment,
            Destination::Url("https://other.example/auth".into()),
        );
        store.save(&second).await.unwrap();
        let loaded = store.load(Slot::LocalPayment).await.unwrap().unwrap();
        assert_eq!(
            loaded.destination,
            Destination::Url("https://other.example/auth".into())
        );
    }

    #[tokio::test]
    async fn test_load_all_spans_slots() {
        let store = InMemoryPendingStore::new();
        store.save(&request(Slot::LocalPayment)).await.unwrap();
        store.save(&request(Slot::Venmo)).await.unwrap();
        let all = store.load_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
