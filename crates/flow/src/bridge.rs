//! Hooks result capture into the host's lifecycle.
//!
//! The host calls [`LifecycleBridge::on_resume`] at every point it regains
//! control — resume after a return, and redelivery when the OS recreates
//! the host container. The bridge runs the Result Interceptor and forwards
//! non-`None` outcomes to the slot's registered handler, at most once per
//! physical return. Register handlers before the first possible resume, or
//! an early-arriving result is dropped.

use crate::SwitchClient;
use payswitch_types::{ReturnPayload, Slot, SwitchOutcome, SwitchRequest, traits::Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Callback a domain adapter registers for a slot's outcomes.
///
/// Runs on whatever context the host's resume event arrives on (typically
/// the host's main sequencing context); never assume background execution.
pub type OutcomeHandler = Arc<dyn Fn(SwitchOutcome) + Send + Sync>;

/// In-memory view of a slot's progress. The durable truth is the pending
/// request store; after process death every slot reads `Idle` here while a
/// persisted record keeps `on_resume` working.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    /// A switch left the host and no return has been reconciled yet.
    Pending,
    /// An outcome is being handed to the slot's handler.
    Delivered,
}

/// Bridges host lifecycle events to switch initiation and outcome delivery.
pub struct LifecycleBridge {
    client: Arc<SwitchClient>,
    handlers: Mutex<HashMap<Slot, OutcomeHandler>>,
    states: Mutex<HashMap<Slot, SlotState>>,
}

impl LifecycleBridge {
    #[must_use]
    pub fn new(client: Arc<SwitchClient>) -> Self {
        Self {
            client,
            handlers: Mutex::new(HashMap::new()),
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Register the outcome handler for a slot, replacing any previous one.
    pub fn register(&self, slot: Slot, handler: impl Fn(SwitchOutcome) + Send + Sync + 'static) {
        self.handlers.lock().unwrap().insert(slot, Arc::new(handler));
    }

    /// Remove the handler for a slot. Outcomes arriving afterwards are
    /// dropped with a warning.
    pub fn unregister(&self, slot: Slot) {
        self.handlers.lock().unwrap().remove(&slot);
    }

    /// The in-memory state of a slot.
    #[must_use]
    pub fn state(&self, slot: Slot) -> SlotState {
        self.states
            .lock()
            .unwrap()
            .get(&slot)
            .copied()
            .unwrap_or(SlotState::Idle)
    }

    /// Start a switch through the underlying [`SwitchClient`] and mark the
    /// slot `Pending`.
    ///
    /// Beginning a switch on an already-pending slot overwrites the prior
    /// record (the documented eviction policy); a late return for the first
    /// attempt is then matched against the new record or dropped as stale.
    ///
    /// # Errors
    ///
    /// Propagates [`SwitchClient::begin_switch`] errors; on error the slot
    /// state is untouched.
    pub async fn begin_switch(&self, request: SwitchRequest) -> Result<()> {
        let slot = request.slot;
        if self.state(slot) == SlotState::Pending {
            info!(%slot, "new switch on a pending slot, replacing the prior record");
        }
        self.client.begin_switch(request).await?;
        self.states.lock().unwrap().insert(slot, SlotState::Pending);
        Ok(())
    }

    /// Handle a host resume/re-entry event.
    ///
    /// Tolerates every no-op case silently: no payload delivered, no switch
    /// ever started, a stale or unrelated deep link, or a duplicate
    /// redelivery of an already-reconciled return.
    ///
    /// # Errors
    ///
    /// Propagates store failures from the capture path.
    pub async fn on_resume(&self, payload: Option<ReturnPayload>) -> Result<()> {
        let Some(payload) = payload else {
            debug!("resume without a return payload");
            return Ok(());
        };
        let Some((slot, outcome)) = self.client.capture_result(&payload).await? else {
            return Ok(());
        };

        self.states
            .lock()
            .unwrap()
            .insert(slot, SlotState::Delivered);

        // Clone the handler out so delivery never runs under the registry
        // lock (handlers may re-register from inside the callback).
        let handler = self.handlers.lock().unwrap().get(&slot).cloned();
        match handler {
            Some(handler) => handler(outcome),
            None => warn!(%slot, "outcome arrived with no registered handler, dropped"),
        }

        self.states.lock().unwrap().insert(slot, SlotState::Idle);
        Ok(())
    }

    /// Explicitly clear a slot's pending record and reset its state.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn clear(&self, slot: Slot) -> Result<()> {
        self.client.clear(slot).await?;
        self.states.lock().unwrap().insert(slot, SlotState::Idle);
        Ok(())
    }
}
