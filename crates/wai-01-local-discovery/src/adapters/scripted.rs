//! Scripted peer connections for deterministic tests.
//!
//! Events are replayed at fixed offsets from `set_local_description`, using
//! tokio time, so tests under a paused clock see exact timings.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::domain::{CandidateEvent, DiscoveryError, IceCandidate, NegotiationStage};
use crate::ports::{
    PeerConnection, PeerConnectionFactory, RtcConfiguration, SdpType, SessionDescription,
};

/// Observations shared between a factory and the test that built it.
#[derive(Debug, Clone, Default)]
pub struct ScriptHandle {
    connections_created: Arc<AtomicUsize>,
    close_count: Arc<AtomicUsize>,
    events_delivered: Arc<AtomicUsize>,
    data_channels: Arc<Mutex<Vec<String>>>,
    ice_servers: Arc<Mutex<Vec<String>>>,
}

impl ScriptHandle {
    /// Connections constructed by the factory.
    pub fn connections_created(&self) -> usize {
        self.connections_created.load(Ordering::SeqCst)
    }

    /// Calls to `close` across all connections.
    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }

    /// Events actually handed to a subscriber.
    pub fn events_delivered(&self) -> usize {
        self.events_delivered.load(Ordering::SeqCst)
    }

    /// Data-channel labels opened.
    pub fn data_channels(&self) -> Vec<String> {
        self.data_channels.lock().clone()
    }

    /// ICE servers passed to the last construction.
    pub fn ice_servers(&self) -> Vec<String> {
        self.ice_servers.lock().clone()
    }
}

/// Factory that hands out [`ScriptedPeerConnection`]s replaying one script.
#[derive(Debug, Clone)]
pub struct ScriptedPeerConnectionFactory {
    supported: bool,
    fail_at: Option<NegotiationStage>,
    stall_at: Option<NegotiationStage>,
    script: Vec<(Duration, CandidateEvent)>,
    handle: ScriptHandle,
}

impl Default for ScriptedPeerConnectionFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedPeerConnectionFactory {
    /// Supported host with an empty script: gathering never completes.
    pub fn new() -> Self {
        Self {
            supported: true,
            fail_at: None,
            stall_at: None,
            script: Vec::new(),
            handle: ScriptHandle::default(),
        }
    }

    /// Host without the capability.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// Fail the given negotiation step.
    pub fn fail_at(mut self, stage: NegotiationStage) -> Self {
        self.fail_at = Some(stage);
        self
    }

    /// Never settle the given asynchronous negotiation step.
    pub fn stall_at(mut self, stage: NegotiationStage) -> Self {
        self.stall_at = Some(stage);
        self
    }

    /// Emit a raw candidate line `at_ms` after gathering starts.
    pub fn candidate_at(mut self, at_ms: u64, line: &str) -> Self {
        self.script.push((
            Duration::from_millis(at_ms),
            CandidateEvent::Candidate(IceCandidate::new(line)),
        ));
        self
    }

    /// Emit a host candidate for `address` `at_ms` after gathering starts.
    pub fn address_at(self, at_ms: u64, address: &str) -> Self {
        let line = format!("candidate:1 1 udp 2122260223 {} 54400 typ host", address);
        self.candidate_at(at_ms, &line)
    }

    /// Emit the completion sentinel `at_ms` after gathering starts.
    pub fn complete_at(mut self, at_ms: u64) -> Self {
        self.script
            .push((Duration::from_millis(at_ms), CandidateEvent::GatheringComplete));
        self
    }

    /// Shared observation handle.
    pub fn handle(&self) -> ScriptHandle {
        self.handle.clone()
    }

    fn fails_at(&self, stage: NegotiationStage) -> Result<(), DiscoveryError> {
        match self.fail_at {
            Some(s) if s == stage => Err(DiscoveryError::negotiation(stage, "scripted failure")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PeerConnectionFactory for ScriptedPeerConnectionFactory {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn create(
        &self,
        config: &RtcConfiguration,
    ) -> Result<Arc<dyn PeerConnection>, DiscoveryError> {
        if !self.supported {
            return Err(DiscoveryError::CapabilityAbsent);
        }
        self.handle.connections_created.fetch_add(1, Ordering::SeqCst);
        *self.handle.ice_servers.lock() = config.ice_servers.clone();
        self.fails_at(NegotiationStage::Construction)?;

        let mut script = self.script.clone();
        script.sort_by_key(|(at, _)| *at);
        Ok(Arc::new(ScriptedPeerConnection::new(
            script,
            self.fail_at,
            self.stall_at,
            self.handle.clone(),
        )))
    }
}

/// One scripted connection.
pub struct ScriptedPeerConnection {
    script: Mutex<Option<Vec<(Duration, CandidateEvent)>>>,
    fail_at: Option<NegotiationStage>,
    stall_at: Option<NegotiationStage>,
    handle: ScriptHandle,
    events_tx: Mutex<Option<mpsc::UnboundedSender<CandidateEvent>>>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<CandidateEvent>>>,
    closed: Arc<AtomicBool>,
}

impl ScriptedPeerConnection {
    fn new(
        script: Vec<(Duration, CandidateEvent)>,
        fail_at: Option<NegotiationStage>,
        stall_at: Option<NegotiationStage>,
        handle: ScriptHandle,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            script: Mutex::new(Some(script)),
            fail_at,
            stall_at,
            handle,
            events_tx: Mutex::new(Some(tx)),
            events_rx: Mutex::new(Some(rx)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn check(&self, stage: NegotiationStage) -> Result<(), DiscoveryError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DiscoveryError::ConnectionClosed);
        }
        match self.fail_at {
            Some(s) if s == stage => Err(DiscoveryError::negotiation(stage, "scripted failure")),
            _ => Ok(()),
        }
    }

    async fn stall(&self, stage: NegotiationStage) {
        if self.stall_at == Some(stage) {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl PeerConnection for ScriptedPeerConnection {
    fn subscribe_candidates(
        &self,
    ) -> Result<mpsc::UnboundedReceiver<CandidateEvent>, DiscoveryError> {
        self.check(NegotiationStage::Subscription)?;
        self.events_rx.lock().take().ok_or_else(|| {
            DiscoveryError::negotiation(NegotiationStage::Subscription, "already subscribed")
        })
    }

    async fn create_data_channel(&self, label: &str) -> Result<(), DiscoveryError> {
        self.stall(NegotiationStage::DataChannel).await;
        self.check(NegotiationStage::DataChannel)?;
        self.handle.data_channels.lock().push(label.to_string());
        Ok(())
    }

    async fn create_offer(&self) -> Result<SessionDescription, DiscoveryError> {
        self.stall(NegotiationStage::CreateOffer).await;
        self.check(NegotiationStage::CreateOffer)?;
        Ok(SessionDescription {
            kind: SdpType::Offer,
            sdp: "v=0\r\n".to_string(),
        })
    }

    async fn set_local_description(
        &self,
        _description: SessionDescription,
    ) -> Result<(), DiscoveryError> {
        self.stall(NegotiationStage::SetLocalDescription).await;
        self.check(NegotiationStage::SetLocalDescription)?;
        let script = self.script.lock().take().unwrap_or_default();
        let Some(tx) = self.events_tx.lock().clone() else {
            return Err(DiscoveryError::ConnectionClosed);
        };

        let closed = Arc::clone(&self.closed);
        let delivered = Arc::clone(&self.handle.events_delivered);
        let start = Instant::now();
        tokio::spawn(async move {
            for (at, event) in script {
                tokio::time::sleep_until(start + at).await;
                if closed.load(Ordering::SeqCst) || tx.send(event).is_err() {
                    break;
                }
                delivered.fetch_add(1, Ordering::SeqCst);
            }
        });
        Ok(())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.events_tx.lock().take();
        self.handle.close_count.fetch_add(1, Ordering::SeqCst);
    }
}
