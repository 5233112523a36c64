//! A running session: the domain state machine plus the resources it owns.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{CandidateEvent, DiscoveryOutcome, DiscoverySession, Termination};
use crate::ports::PeerConnection;

/// Owns the connection handle, the timer handle and the outcome channel of
/// one session.
///
/// Both the candidate pump and the timer call [`ActiveSession::resolve`]. The
/// domain guard decides the winner before any effect happens, so the loser
/// neither closes the connection again nor emits a second outcome.
pub(crate) struct ActiveSession {
    id: Uuid,
    state: Mutex<DiscoverySession>,
    connection: Mutex<Option<Arc<dyn PeerConnection>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    outcome_tx: Mutex<Option<oneshot::Sender<DiscoveryOutcome>>>,
}

impl ActiveSession {
    pub(crate) fn new(
        connection: Arc<dyn PeerConnection>,
        outcome_tx: oneshot::Sender<DiscoveryOutcome>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: Mutex::new(DiscoverySession::new()),
            connection: Mutex::new(Some(connection)),
            timer: Mutex::new(None),
            outcome_tx: Mutex::new(Some(outcome_tx)),
        }
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    /// Schedule the timeout. The handle is kept so early resolution can
    /// cancel it.
    pub(crate) fn arm_timer(self: &Arc<Self>, timeout: Duration) {
        let session = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            session.resolve(Termination::TimerFired);
        });

        let mut timer = self.timer.lock();
        if self.state.lock().is_resolved() {
            handle.abort();
        } else {
            *timer = Some(handle);
        }
    }

    /// Feed one candidate event. Returns `true` once the session is resolved
    /// and the pump should stop.
    pub(crate) fn on_candidate_event(&self, event: CandidateEvent) -> bool {
        if event.is_completion() {
            self.resolve(Termination::GatheringComplete);
            return true;
        }

        if let CandidateEvent::Candidate(candidate) = event {
            let mut state = self.state.lock();
            let added = state.record(&candidate);
            debug!(
                session = %self.id,
                address = candidate.address().unwrap_or("<none>"),
                new = added,
                "candidate gathered"
            );
            return state.is_resolved();
        }
        false
    }

    /// Try to finish the session. Returns `false` if another path already did.
    pub(crate) fn resolve(&self, termination: Termination) -> bool {
        let resolved = self.state.lock().try_resolve(termination.clone());
        let Some(outcome) = resolved else {
            debug!(session = %self.id, ?termination, "session already resolved");
            return false;
        };

        if let Some(timer) = self.timer.lock().take() {
            // The timer task must not abort itself mid-resolution.
            if termination != Termination::TimerFired {
                timer.abort();
            }
        }

        if let Some(connection) = self.connection.lock().take() {
            connection.close();
        }

        info!(
            session = %self.id,
            outcome = outcome.label(),
            addresses = outcome.address_count(),
            "local address discovery resolved"
        );

        if let Some(tx) = self.outcome_tx.lock().take() {
            let _ = tx.send(outcome);
        }
        true
    }
}

/// Drain candidate events into the session until it resolves or the host
/// drops its sender.
pub(crate) async fn pump_candidates(
    session: Arc<ActiveSession>,
    mut events: mpsc::UnboundedReceiver<CandidateEvent>,
) {
    while let Some(event) = events.recv().await {
        if session.on_candidate_event(event) {
            break;
        }
    }
    debug!(session = %session.id(), "candidate pump stopped");
}
