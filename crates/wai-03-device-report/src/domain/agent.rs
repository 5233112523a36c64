//! Agent, platform and hardware hints.

use serde::{Deserialize, Serialize};
use shared_types::{DisplaySurface, FieldId};

pub const UNKNOWN: &str = "Unknown";

/// One `brand version` pair from client hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandVersion {
    pub brand: String,
    pub version: String,
}

/// High-entropy platform hints. Any of them may be withheld.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformHints {
    pub platform: Option<String>,
    pub architecture: Option<String>,
    pub bitness: Option<String>,
}

/// What the client says about itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub user_agent: String,
    pub brands: Vec<BrandVersion>,
    pub platform: Option<String>,
    /// `None` when the hints are unsupported or were blocked.
    pub hints: Option<PlatformHints>,
    pub languages: Vec<String>,
    /// Raw do-not-track value; only `"1"` means enabled.
    pub do_not_track: Option<String>,
    pub cookies_enabled: bool,
    pub logical_cores: Option<u32>,
    /// Approximate device memory in GB.
    pub device_memory_gb: Option<f64>,
    pub max_touch_points: u32,
    pub webdriver: bool,
}

impl AgentInfo {
    /// User agent, followed by a `Brands:` line when brands are known.
    pub fn user_agent_text(&self) -> String {
        let mut text = self.user_agent.clone();
        if !self.brands.is_empty() {
            let brands: Vec<String> = self
                .brands
                .iter()
                .map(|b| format!("{} {}", b.brand, b.version))
                .collect();
            text.push_str("\nBrands: ");
            text.push_str(&brands.join(", "));
        }
        text.trim().to_string()
    }

    /// `platform [architecture] [N-bit]`, preferring the hinted platform.
    pub fn platform_text(&self) -> String {
        let classic = self
            .platform
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN);
        let Some(hints) = &self.hints else {
            return classic.to_string();
        };

        let mut parts = vec![hints
            .platform
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(classic)
            .to_string()];
        if let Some(arch) = hints.architecture.as_deref().filter(|a| !a.is_empty()) {
            parts.push(arch.to_string());
        }
        if let Some(bits) = hints.bitness.as_deref().filter(|b| !b.is_empty()) {
            parts.push(format!("{}-bit", bits));
        }
        parts.join(" ")
    }

    pub fn languages_text(&self) -> String {
        if self.languages.is_empty() {
            UNKNOWN.to_string()
        } else {
            self.languages.join(", ")
        }
    }

    pub fn dnt_text(&self) -> &'static str {
        if self.do_not_track.as_deref() == Some("1") {
            "Enabled"
        } else {
            "Disabled or not reported"
        }
    }

    pub fn cookies_text(&self) -> &'static str {
        if self.cookies_enabled {
            "Yes"
        } else {
            "No"
        }
    }

    pub fn cores_text(&self) -> String {
        match self.logical_cores {
            Some(n) if n > 0 => format!("{} logical cores", n),
            _ => UNKNOWN.to_string(),
        }
    }

    pub fn memory_text(&self) -> String {
        match self.device_memory_gb {
            Some(gb) if gb > 0.0 => format!("{} GB (approx)", gb),
            _ => UNKNOWN.to_string(),
        }
    }

    pub fn touch_text(&self) -> String {
        format!("{} touch points", self.max_touch_points)
    }

    pub fn webdriver_text(&self) -> &'static str {
        if self.webdriver {
            "Likely automated"
        } else {
            "No"
        }
    }

    /// Write the agent rows.
    pub fn report(&self, display: &dyn DisplaySurface) {
        display.set_status(FieldId::UserAgent, &self.user_agent_text());
        display.set_status(FieldId::Platform, &self.platform_text());
        display.set_status(FieldId::Languages, &self.languages_text());
        display.set_status(FieldId::Dnt, self.dnt_text());
        display.set_status(FieldId::Cookies, self.cookies_text());
        display.set_status(FieldId::Cores, &self.cores_text());
        display.set_status(FieldId::Memory, &self.memory_text());
        display.set_status(FieldId::Touch, &self.touch_text());
        display.set_status(FieldId::Webdriver, self.webdriver_text());
    }
}
