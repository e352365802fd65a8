//! The switch orchestrator: initiation (`begin_switch`) and result
//! interception (`capture_result`).
//!
//! Per-slot operations are serialized by a per-slot async lock; distinct
//! slots proceed concurrently. `begin_switch` is fire-and-forget — it
//! returns as soon as the record is persisted and control is handed off,
//! and the outcome arrives through a later `capture_result`, possibly in a
//! new process instance.

use payswitch_types::{
    CompanionResult, CompanionStatus, Destination, HostLauncher, PendingRequestStore,
    ReturnData, ReturnPayload, Slot, SwitchConfig, SwitchError, SwitchOutcome, SwitchRequest,
    traits::Result,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use url::Url;

/// Lazily created per-slot async locks.
struct SlotLocks {
    inner: Mutex<HashMap<Slot, Arc<tokio::sync::Mutex<()>>>>,
}

impl SlotLocks {
    fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    fn for_slot(&self, slot: Slot) -> Arc<tokio::sync::Mutex<()>> {
        self.inner.lock().unwrap().entry(slot).or_default().clone()
    }
}

/// Orchestrates switches to an external browser or companion app and
/// reconciles the returns.
pub struct SwitchClient {
    config: SwitchConfig,
    store: Arc<dyn PendingRequestStore>,
    launcher: Arc<dyn HostLauncher>,
    locks: SlotLocks,
    /// Companion switches tracked only in-process when the host opted out
    /// of durable companion persistence. Keeps per-slot uniqueness so a
    /// cancel still matches something.
    in_process_pending: Mutex<HashSet<Slot>>,
}

impl SwitchClient {
    pub fn new(
        config: SwitchConfig,
        store: Arc<dyn PendingRequestStore>,
        launcher: Arc<dyn HostLauncher>,
    ) -> Self {
        Self {
            config,
            store,
            launcher,
            locks: SlotLocks::new(),
            in_process_pending: Mutex::new(HashSet::new()),
        }
    }

    /// Validate the destination, persist the pending record, and hand
    /// control to the OS.
    ///
    /// The record is persisted **before** the hand-off: once the browser
    /// owns control the host process may die, and an unpersisted switch
    /// would be untrackable. If persistence fails, no hand-off happens. If
    /// the hand-off itself fails, the record is cleared again.
    ///
    /// A new switch on an occupied slot overwrites the prior record; that
    /// overwrite is the eviction policy for orphaned records (no timeouts).
    ///
    /// # Errors
    ///
    /// [`SwitchError::DestinationUnavailable`] for a malformed URL, a
    /// missing companion app, or a failed OS hand-off;
    /// [`SwitchError::Persistence`] (and friends) if the record cannot be
    /// saved — in which case the switch never left the host.
    pub async fn begin_switch(&self, request: SwitchRequest) -> Result<()> {
        let lock = self.locks.for_slot(request.slot);
        let _guard = lock.lock().await;

        match &request.destination {
            Destination::Url(raw) => self.begin_browser(&request, raw).await,
            Destination::CompanionApp(app_id) => self.begin_companion(&request, app_id).await,
        }
    }

    async fn begin_browser(&self, request: &SwitchRequest, raw: &str) -> Result<()> {
        let url = Url::parse(raw).map_err(|e| {
            SwitchError::DestinationUnavailable(format!("invalid destination url: {e}"))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SwitchError::DestinationUnavailable(format!(
                "unsupported destination scheme: {}",
                url.scheme()
            )));
        }

        self.store.save(request).await?;

        if let Err(e) = self.launcher.open_url(url.as_str()) {
            self.store.clear(request.slot).await?;
            warn!(slot = %request.slot, "browser hand-off failed, pending record cleared");
            return Err(e);
        }

        info!(slot = %request.slot, "switched to external browser");
        Ok(())
    }

    async fn begin_companion(&self, request: &SwitchRequest, app_id: &str) -> Result<()> {
        if !self.launcher.companion_available(app_id) {
            return Err(SwitchError::DestinationUnavailable(format!(
                "companion app not installed: {app_id}"
            )));
        }

        if self.config.persist_companion_requests {
            self.store.save(request).await?;
        } else {
            self.in_process_pending.lock().unwrap().insert(request.slot);
        }

        if let Err(e) = self.launcher.launch_companion(app_id, request) {
            self.forget(request.slot).await?;
            warn!(slot = %request.slot, "companion hand-off failed, pending record cleared");
            return Err(e);
        }

        info!(slot = %request.slot, app_id, "switched to companion app");
        Ok(())
    }

    /// Match an incoming return against the pending records and classify it.
    ///
    /// Returns `Ok(None)` for anything that matches no pending record — an
    /// unrelated deep link, a stale return for an already-cleared slot, or
    /// a duplicate capture of the same physical return. The matched slot's
    /// record is cleared before the outcome is returned, on every branch,
    /// so delivery is at most once.
    ///
    /// # Errors
    ///
    /// Propagates store failures; classification itself never fails (a
    /// malformed companion payload becomes [`SwitchOutcome::Error`]).
    pub async fn capture_result(
        &self,
        incoming: &ReturnPayload,
    ) -> Result<Option<(Slot, SwitchOutcome)>> {
        match incoming {
            ReturnPayload::Uri(raw) => self.capture_uri(raw).await,
            ReturnPayload::Companion(result) => self.capture_companion(result).await,
        }
    }

    async fn capture_uri(&self, raw: &str) -> Result<Option<(Slot, SwitchOutcome)>> {
        let Ok(url) = Url::parse(raw) else {
            debug!("unparseable return uri dropped");
            return Ok(None);
        };
        if url.scheme() != self.config.return_url_scheme {
            debug!(scheme = url.scheme(), "return uri scheme mismatch, dropped");
            return Ok(None);
        }
        let Some(host) = url.host_str() else {
            debug!("return uri without host dropped");
            return Ok(None);
        };

        // Candidates among outstanding records; most recently created wins.
        let mut candidates: Vec<SwitchRequest> = self
            .store
            .load_all()
            .await?
            .into_iter()
            .filter(|r| host == r.slot.success_host() || host == r.slot.cancel_host())
            .collect();
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let Some(matched) = candidates.into_iter().next() else {
            debug!(host, "no pending record matches return uri, dropped as stale");
            return Ok(None);
        };
        let slot = matched.slot;

        let lock = self.locks.for_slot(slot);
        let _guard = lock.lock().await;

        // Re-check under the slot lock: a concurrent capture of the same
        // physical return must deliver only once.
        if self.store.load(slot).await?.is_none() {
            debug!(%slot, "record already cleared, duplicate return dropped");
            return Ok(None);
        }
        self.store.clear(slot).await?;

        let outcome = if host == slot.cancel_host() {
            info!(%slot, "return uri carries the cancel marker");
            SwitchOutcome::UserCanceled
        } else {
            info!(%slot, "browser switch returned successfully");
            SwitchOutcome::Success(ReturnData::Uri(raw.to_string()))
        };
        Ok(Some((slot, outcome)))
    }

    async fn capture_companion(
        &self,
        result: &CompanionResult,
    ) -> Result<Option<(Slot, SwitchOutcome)>> {
        let slot = result.slot;
        let lock = self.locks.for_slot(slot);
        let _guard = lock.lock().await;

        let tracked_in_process = self.in_process_pending.lock().unwrap().remove(&slot);
        let stored = self.store.load(slot).await?.is_some();
        if !tracked_in_process && !stored {
            debug!(%slot, "companion result for an idle slot dropped");
            return Ok(None);
        }
        if stored {
            self.store.clear(slot).await?;
        }

        let outcome = match result.status {
            // An OS-level cancel legitimately carries no payload.
            CompanionStatus::Canceled => {
                info!(%slot, "companion switch canceled by user");
                SwitchOutcome::UserCanceled
            }
            CompanionStatus::Completed => match &result.document {
                Some(document) => {
                    info!(%slot, "companion switch returned successfully");
                    SwitchOutcome::Success(ReturnData::Document(document.clone()))
                }
                None => {
                    warn!(%slot, "companion switch completed without a payload");
                    SwitchOutcome::Error(SwitchError::MalformedResult(
                        "companion app returned no payload".into(),
                    ))
                }
            },
        };
        Ok(Some((slot, outcome)))
    }

    /// Explicitly drop any pending record for a slot.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn clear(&self, slot: Slot) -> Result<()> {
        let lock = self.locks.for_slot(slot);
        let _guard = lock.lock().await;
        self.forget(slot).await
    }

    /// The pending record for a slot, if one is durably outstanding.
    ///
    /// Companion switches tracked only in-process have no record here.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn pending(&self, slot: Slot) -> Result<Option<SwitchRequest>> {
        self.store.load(slot).await
    }

    async fn forget(&self, slot: Slot) -> Result<()> {
        self.in_process_pending.lock().unwrap().remove(&slot);
        self.store.clear(slot).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Store stub whose `save` always fails.
    struct FailingStore;

    #[async_trait::async_trait]
    impl PendingRequestStore for FailingStore {
        async fn save(&self, _request: &SwitchRequest) -> Result<()> {
            Err(SwitchError::Persistence("disk full".into()))
        }
        async fn load(&self, _slot: Slot) -> Result<Option<SwitchRequest>> {
            Ok(None)
        }
        async fn clear(&self, _slot: Slot) -> Result<()> {
            Ok(())
        }
        async fn load_all(&self) -> Result<Vec<SwitchRequest>> {
            Ok(Vec::new())
        }
    }

    struct RecordingLauncher {
        opened: Mutex<Vec<String>>,
    }

    impl RecordingLauncher {
        fn new() -> Self {
            Self {
                opened: Mutex::new(Vec::new()),
            }
        }
    }

    impl HostLauncher for RecordingLauncher {
        fn open_url(&self, url: &str) -> Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
        fn companion_available(&self, _app_id: &str) -> bool {
            true
        }
        fn launch_companion(&self, _app_id: &str, _request: &SwitchRequest) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_persistence_failure_aborts_before_hand_off() {
        let launcher = Arc::new(RecordingLauncher::new());
        let client = SwitchClient::new(
            SwitchConfig::new("app"),
            Arc::new(FailingStore),
            launcher.clone(),
        );
        let err = client
            .begin_switch(SwitchRequest::new(
                Slot::LocalPayment,
                Destination::Url("https://bank.example/auth".into()),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, SwitchError::Persistence(_)));
        assert!(launcher.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_destination_url_rejected() {
        let client = SwitchClient::new(
            SwitchConfig::new("app"),
            Arc::new(FailingStore),
            Arc::new(RecordingLauncher::new()),
        );
        let err = client
            .begin_switch(SwitchRequest::new(
                Slot::LocalPayment,
                Destination::Url("not a url".into()),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, SwitchError::DestinationUnavailable(_)));
    }

    #[tokio::test]
    async fn test_non_http_destination_rejected() {
        let client = SwitchClient::new(
            SwitchConfig::new("app"),
            Arc::new(FailingStore),
            Arc::new(RecordingLauncher::new()),
        );
        let err = client
            .begin_switch(SwitchRequest::new(
                Slot::LocalPayment,
                Destination::Url("ftp://bank.example/auth".into()),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, SwitchError::DestinationUnavailable(_)));
    }
}
