//! Native host adapter.
//!
//! A process outside a browser has no negotiation machinery, but it can see
//! the same information a browser leaks: the addresses bound to its network
//! interfaces. Each non-loopback interface becomes one host candidate line on
//! an ephemeral UDP port, followed by the completion sentinel.

use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{CandidateEvent, DiscoveryError, IceCandidate, NegotiationStage};
use crate::ports::{
    PeerConnection, PeerConnectionFactory, RtcConfiguration, SdpType, SessionDescription,
};

/// Type preference of a host candidate.
const HOST_TYPE_PREFERENCE: u32 = 126;

/// Local preference when every interface is ranked equally.
const LOCAL_PREFERENCE: u32 = 65535;

/// Port reported when no socket could be bound on an interface (the SDP
/// discard port).
const FALLBACK_PORT: u16 = 9;

/// Candidate priority: `(type << 24) | (local << 8) | (256 - component)`.
pub fn host_priority(component: u32) -> u32 {
    (HOST_TYPE_PREFERENCE << 24) | (LOCAL_PREFERENCE << 8) | (256 - component)
}

/// Render a host candidate line in the browser's format.
pub fn host_candidate_line(foundation: u32, ip: IpAddr, port: u16) -> String {
    format!(
        "candidate:{} 1 udp {} {} {} typ host generation 0",
        foundation,
        host_priority(1),
        ip,
        port
    )
}

/// Factory for [`HostPeerConnection`].
#[derive(Debug, Clone, Default)]
pub struct HostInterfaceFactory {
    include_loopback: bool,
}

impl HostInterfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also report loopback interfaces.
    pub fn with_loopback(mut self, include: bool) -> Self {
        self.include_loopback = include;
        self
    }
}

#[async_trait]
impl PeerConnectionFactory for HostInterfaceFactory {
    fn is_supported(&self) -> bool {
        true
    }

    async fn create(
        &self,
        config: &RtcConfiguration,
    ) -> Result<Arc<dyn PeerConnection>, DiscoveryError> {
        if !config.ice_servers.is_empty() {
            debug!(
                servers = config.ice_servers.len(),
                "host adapter gathers host candidates only; ignoring ICE servers"
            );
        }
        Ok(Arc::new(HostPeerConnection::new(self.include_loopback)))
    }
}

/// Peer connection backed by the local interface table.
pub struct HostPeerConnection {
    include_loopback: bool,
    events_tx: Mutex<Option<mpsc::UnboundedSender<CandidateEvent>>>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<CandidateEvent>>>,
    data_channel: Mutex<Option<String>>,
    sockets: Mutex<Vec<UdpSocket>>,
    foundation: AtomicU32,
    closed: Arc<AtomicBool>,
}

impl HostPeerConnection {
    pub fn new(include_loopback: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            include_loopback,
            events_tx: Mutex::new(Some(tx)),
            events_rx: Mutex::new(Some(rx)),
            data_channel: Mutex::new(None),
            sockets: Mutex::new(Vec::new()),
            foundation: AtomicU32::new(1),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn interface_addresses(&self) -> Result<Vec<IpAddr>, DiscoveryError> {
        let interfaces = if_addrs::get_if_addrs().map_err(|e| {
            DiscoveryError::negotiation(NegotiationStage::SetLocalDescription, e.to_string())
        })?;
        Ok(interfaces
            .into_iter()
            .filter(|iface| self.include_loopback || !iface.is_loopback())
            .map(|iface| iface.ip())
            .collect())
    }

    async fn bind_port(&self, ip: IpAddr) -> u16 {
        match UdpSocket::bind(SocketAddr::new(ip, 0)).await {
            Ok(socket) => {
                let port = socket
                    .local_addr()
                    .map(|addr| addr.port())
                    .unwrap_or(FALLBACK_PORT);
                self.sockets.lock().push(socket);
                port
            }
            Err(e) => {
                debug!(%ip, error = %e, "could not bind candidate socket");
                FALLBACK_PORT
            }
        }
    }
}

#[async_trait]
impl PeerConnection for HostPeerConnection {
    fn subscribe_candidates(
        &self,
    ) -> Result<mpsc::UnboundedReceiver<CandidateEvent>, DiscoveryError> {
        self.events_rx.lock().take().ok_or_else(|| {
            DiscoveryError::negotiation(NegotiationStage::Subscription, "already subscribed")
        })
    }

    async fn create_data_channel(&self, label: &str) -> Result<(), DiscoveryError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DiscoveryError::ConnectionClosed);
        }
        *self.data_channel.lock() = Some(label.to_string());
        Ok(())
    }

    async fn create_offer(&self) -> Result<SessionDescription, DiscoveryError> {
        let Some(label) = self.data_channel.lock().clone() else {
            return Err(DiscoveryError::negotiation(
                NegotiationStage::CreateOffer,
                "offer has no media: open a data channel first",
            ));
        };
        let session_id = Uuid::new_v4().as_u128() as u64 & 0x7fff_ffff_ffff_ffff;
        let sdp = format!(
            "v=0\r\no=- {} 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n\
             a=group:BUNDLE 0\r\nm=application 9 UDP/DTLS/SCTP webrtc-datachannel\r\n\
             c=IN IP4 0.0.0.0\r\na=mid:0\r\na=label:{}\r\n",
            session_id, label
        );
        Ok(SessionDescription {
            kind: SdpType::Offer,
            sdp,
        })
    }

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), DiscoveryError> {
        if description.kind != SdpType::Offer {
            return Err(DiscoveryError::negotiation(
                NegotiationStage::SetLocalDescription,
                "expected an offer",
            ));
        }
        if self.closed.load(Ordering::SeqCst) {
            return Err(DiscoveryError::ConnectionClosed);
        }
        let Some(tx) = self.events_tx.lock().clone() else {
            return Err(DiscoveryError::ConnectionClosed);
        };

        let addresses = self.interface_addresses()?;
        let mut events = Vec::with_capacity(addresses.len() + 1);
        for ip in addresses {
            let port = self.bind_port(ip).await;
            let foundation = self.foundation.fetch_add(1, Ordering::Relaxed);
            events.push(CandidateEvent::Candidate(IceCandidate::with_address(
                host_candidate_line(foundation, ip, port),
                ip.to_string(),
            )));
        }
        events.push(CandidateEvent::GatheringComplete);

        // Gathering is asynchronous with respect to negotiation.
        let closed = Arc::clone(&self.closed);
        tokio::spawn(async move {
            for event in events {
                if closed.load(Ordering::SeqCst) || tx.send(event).is_err() {
                    break;
                }
            }
        });
        Ok(())
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            warn!("host peer connection closed twice");
            return;
        }
        self.events_tx.lock().take();
        self.sockets.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_priority() {
        assert_eq!(host_priority(1), 2_130_706_431);
    }

    #[test]
    fn test_candidate_line_exposes_address_at_token_four() {
        let line = host_candidate_line(3, "192.168.1.4".parse().unwrap(), 50000);
        let candidate = IceCandidate::new(line);
        assert_eq!(candidate.address(), Some("192.168.1.4"));
    }

    #[tokio::test]
    async fn test_offer_requires_data_channel() {
        let connection = HostPeerConnection::new(false);
        assert!(connection.create_offer().await.is_err());

        connection.create_data_channel("probe").await.unwrap();
        let offer = connection.create_offer().await.unwrap();
        assert_eq!(offer.kind, SdpType::Offer);
        assert!(offer.sdp.contains("webrtc-datachannel"));
    }

    #[tokio::test]
    async fn test_subscribe_only_once() {
        let connection = HostPeerConnection::new(false);
        assert!(connection.subscribe_candidates().is_ok());
        assert!(connection.subscribe_candidates().is_err());
    }

    #[tokio::test]
    async fn test_loopback_gathering_ends_with_sentinel() {
        let connection = HostPeerConnection::new(true);
        let mut events = connection.subscribe_candidates().unwrap();
        connection.create_data_channel("probe").await.unwrap();
        let offer = connection.create_offer().await.unwrap();
        connection.set_local_description(offer).await.unwrap();

        let mut saw_loopback = false;
        loop {
            match events.recv().await {
                Some(CandidateEvent::Candidate(candidate)) => {
                    if let Some(address) = candidate.address() {
                        let ip: IpAddr = address.parse().unwrap();
                        saw_loopback |= ip.is_loopback();
                    }
                }
                Some(CandidateEvent::GatheringComplete) | None => break,
            }
        }
        assert!(saw_loopback);
        connection.close();
    }
}
