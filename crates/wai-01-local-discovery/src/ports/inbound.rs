//! # Driving Ports (Inbound API)
//!
//! The API the runtime uses to run a discovery.

use async_trait::async_trait;
use shared_types::DisplaySurface;

use crate::domain::DiscoveryOutcome;

/// Primary API for local address discovery.
///
/// # Example
///
/// ```rust,ignore
/// use wai_01_local_discovery::ports::LocalAddressDiscoveryApi;
///
/// async fn show<T: LocalAddressDiscoveryApi>(api: &T, display: &dyn DisplaySurface) {
///     let outcome = api.discover_and_report(display).await;
///     println!("{}", outcome.label());
/// }
/// ```
#[async_trait]
pub trait LocalAddressDiscoveryApi: Send + Sync {
    /// Whether the host has the peer-connection capability.
    fn is_supported(&self) -> bool;

    /// Run one session and return its terminal outcome.
    ///
    /// Never fails: errors become `Unsupported` or `Failed`.
    async fn discover(&self) -> DiscoveryOutcome;

    /// Run one session and write its status line to the `webrtc-ip` row.
    ///
    /// The row is written exactly once per call.
    async fn discover_and_report(&self, display: &dyn DisplaySurface) -> DiscoveryOutcome;
}
