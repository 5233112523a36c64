//! Core service struct and the discovery race.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::domain::{DiscoveryConfig, DiscoveryError, DiscoveryOutcome, Termination};
use crate::ports::{PeerConnection, PeerConnectionFactory, RtcConfiguration};

use super::active::{pump_candidates, ActiveSession};

/// Local Address Discovery Service.
///
/// Each call to `discover` runs one independent session: a fresh connection,
/// a fresh timer and a fresh outcome channel.
pub struct LocalAddressDiscovery<F: PeerConnectionFactory> {
    pub(crate) factory: Arc<F>,
    pub(crate) config: DiscoveryConfig,
}

impl<F: PeerConnectionFactory> LocalAddressDiscovery<F> {
    /// Create a service over `factory`.
    pub fn new(factory: Arc<F>, config: DiscoveryConfig) -> Self {
        Self { factory, config }
    }

    /// Create a service with the default 5000 ms timeout.
    pub fn with_defaults(factory: Arc<F>) -> Self {
        Self::new(factory, DiscoveryConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Run one session to its terminal outcome.
    pub(crate) async fn run_session(&self) -> DiscoveryOutcome {
        debug!(timeout_ms = self.config.timeout.as_millis() as u64, "starting local address discovery");
        if !self.factory.is_supported() {
            info!("peer-connection capability absent");
            return DiscoveryOutcome::Unsupported;
        }

        let rtc = RtcConfiguration {
            ice_servers: self.config.ice_servers.clone(),
        };
        let connection = match self.factory.create(&rtc).await {
            Ok(connection) => connection,
            Err(DiscoveryError::CapabilityAbsent) => {
                info!("peer-connection capability absent at construction");
                return DiscoveryOutcome::Unsupported;
            }
            Err(e) => {
                warn!(error = %e, "could not construct peer connection");
                return DiscoveryOutcome::Failed;
            }
        };

        let events = match connection.subscribe_candidates() {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "could not subscribe to candidate events");
                connection.close();
                return DiscoveryOutcome::Failed;
            }
        };

        let (outcome_tx, mut outcome_rx) = oneshot::channel();
        let session = Arc::new(ActiveSession::new(Arc::clone(&connection), outcome_tx));
        session.arm_timer(self.config.timeout);
        let pump = tokio::spawn(pump_candidates(Arc::clone(&session), events));

        // A host step that never settles must not outlive the timer.
        let outcome = tokio::select! {
            negotiated = negotiate(connection.as_ref(), &self.config.channel_label) => {
                if let Err(e) = negotiated {
                    warn!(session = %session.id(), error = %e, "negotiation failed");
                    session.resolve(Termination::NegotiationFailed);
                }
                (&mut outcome_rx).await
            }
            resolved = &mut outcome_rx => {
                debug!(session = %session.id(), "resolved before negotiation settled");
                resolved
            }
        };
        drop(connection);
        pump.abort();
        outcome.unwrap_or(DiscoveryOutcome::Failed)
    }
}

/// Data channel, offer, local description. Gathering starts after the last
/// step succeeds.
async fn negotiate(connection: &dyn PeerConnection, label: &str) -> Result<(), DiscoveryError> {
    connection.create_data_channel(label).await?;
    let offer = connection.create_offer().await?;
    connection.set_local_description(offer).await
}
