//! reqwest adapters.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use tracing::debug;

use crate::domain::{IpLookup, ReportError};
use crate::ports::{IpLookupService, LatencyProbe};

/// Lookup endpoint returning the caller's IP and location as JSON.
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

fn build_client() -> Result<Client, ReportError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("whoami/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ReportError::Transport(e.to_string()))
}

/// IP lookup over HTTPS.
pub struct HttpIpLookup {
    client: Client,
    url: String,
}

impl HttpIpLookup {
    pub fn new() -> Result<Self, ReportError> {
        Self::with_url(DEFAULT_IP_LOOKUP_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, ReportError> {
        Ok(Self {
            client: build_client()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl IpLookupService for HttpIpLookup {
    async fn lookup(&self) -> Result<IpLookup, ReportError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }
        let record = response
            .json::<IpLookup>()
            .await
            .map_err(|e| ReportError::Parse(e.to_string()))?;
        debug!(url = %self.url, ip = ?record.ip, "IP lookup complete");
        Ok(record)
    }
}

/// Latency probe issuing an uncached GET.
pub struct HttpLatencyProbe {
    client: Client,
}

impl HttpLatencyProbe {
    pub fn new() -> Result<Self, ReportError> {
        Ok(Self {
            client: build_client()?,
        })
    }
}

#[async_trait]
impl LatencyProbe for HttpLatencyProbe {
    async fn fetch(&self, url: &str) -> Result<(), ReportError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ReportError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ReportError::InvalidUrl(format!(
                "unsupported scheme {}",
                parsed.scheme()
            )));
        }

        // Any response counts: the probe measures the round trip, not the page.
        self.client
            .get(parsed)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| ReportError::Transport(e.to_string()))?;
        Ok(())
    }
}
