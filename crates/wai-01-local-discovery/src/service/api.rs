//! `LocalAddressDiscoveryApi` implementation.

use async_trait::async_trait;
use shared_types::{DisplaySurface, FieldId};

use crate::domain::DiscoveryOutcome;
use crate::ports::{LocalAddressDiscoveryApi, PeerConnectionFactory};

use super::core::LocalAddressDiscovery;

#[async_trait]
impl<F: PeerConnectionFactory + 'static> LocalAddressDiscoveryApi for LocalAddressDiscovery<F> {
    fn is_supported(&self) -> bool {
        self.factory.is_supported()
    }

    async fn discover(&self) -> DiscoveryOutcome {
        self.run_session().await
    }

    async fn discover_and_report(&self, display: &dyn DisplaySurface) -> DiscoveryOutcome {
        let outcome = self.run_session().await;
        display.set_status(FieldId::WebrtcIp, &outcome.status_text());
        outcome
    }
}
