//! Facts about the running process and its host.
//!
//! A terminal has no screen geometry, network hints or geolocation; those
//! report as absent. Memory and battery come from `/proc` and `/sys` where
//! they exist.

use std::path::Path;

use async_trait::async_trait;
use chrono::Local;
use shared_types::CapabilityError;

use crate::domain::{
    AgentInfo, BatteryStatus, ConnectionInfo, GeoPosition, PlatformHints, ScreenInfo, TimeInfo,
};
use crate::ports::DeviceFacts;

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Host facts for the `whoami` binary.
#[derive(Debug, Clone, Default)]
pub struct NativeHostFacts {
    cookies_enabled: bool,
    page_url: Option<String>,
}

impl NativeHostFacts {
    pub fn new(cookies_enabled: bool, page_url: Option<String>) -> Self {
        Self {
            cookies_enabled,
            page_url,
        }
    }
}

/// `en_US.UTF-8` → `en-US`. `C` and `POSIX` carry no language.
fn locale_to_tag(locale: &str) -> Option<String> {
    let base = locale.split(['.', '@']).next().unwrap_or_default();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Preferred languages from `LANGUAGE`, falling back to the locale variables.
fn languages_from_env(get: impl Fn(&str) -> Option<String>) -> Vec<String> {
    if let Some(list) = get("LANGUAGE").filter(|l| !l.is_empty()) {
        let tags: Vec<String> = list.split(':').filter_map(locale_to_tag).collect();
        if !tags.is_empty() {
            return tags;
        }
    }
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| get(*var))
        .find_map(|value| locale_to_tag(&value))
        .into_iter()
        .collect()
}

fn parse_meminfo_kb(line: &str) -> Option<u64> {
    line.split_whitespace().nth(1)?.parse().ok()
}

/// Total memory rounded to the nearest power of two GB.
fn device_memory_gb() -> Option<f64> {
    let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
    let total_kb = meminfo
        .lines()
        .find(|line| line.starts_with("MemTotal:"))
        .and_then(parse_meminfo_kb)?;
    approximate_gb(total_kb)
}

fn approximate_gb(total_kb: u64) -> Option<f64> {
    if total_kb == 0 {
        return None;
    }
    let gb = total_kb as f64 / (1024.0 * 1024.0);
    Some(2f64.powi(gb.log2().round() as i32))
}

fn timezone_name() -> Option<String> {
    if let Ok(tz) = std::env::var("TZ") {
        let tz = tz.trim_start_matches(':');
        if !tz.is_empty() {
            return Some(tz.to_string());
        }
    }
    if let Ok(zone) = std::fs::read_to_string("/etc/timezone") {
        let zone = zone.trim();
        if !zone.is_empty() {
            return Some(zone.to_string());
        }
    }
    let target = std::fs::read_link("/etc/localtime").ok()?;
    let target = target.to_string_lossy();
    target
        .split_once("zoneinfo/")
        .map(|(_, zone)| zone.to_string())
}

fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
}

/// First battery under `dir`, from the kernel's power-supply class.
fn battery_from_sysfs(dir: &Path) -> Result<BatteryStatus, CapabilityError> {
    let entries = std::fs::read_dir(dir).map_err(|_| CapabilityError::Absent("battery"))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if read_trimmed(&path.join("type")).as_deref() != Some("Battery") {
            continue;
        }
        let capacity: f64 = read_trimmed(&path.join("capacity"))
            .and_then(|c| c.parse().ok())
            .ok_or_else(|| CapabilityError::Failed("battery capacity unreadable".into()))?;
        let status = read_trimmed(&path.join("status")).unwrap_or_default();
        return Ok(BatteryStatus {
            level: capacity / 100.0,
            charging: status == "Charging" || status == "Full",
            charging_time_secs: None,
            discharging_time_secs: None,
        });
    }
    Err(CapabilityError::Absent("battery"))
}

#[async_trait]
impl DeviceFacts for NativeHostFacts {
    async fn agent(&self) -> AgentInfo {
        let os = std::env::consts::OS;
        let arch = std::env::consts::ARCH;
        AgentInfo {
            user_agent: format!("whoami/{} ({}; {})", env!("CARGO_PKG_VERSION"), os, arch),
            brands: Vec::new(),
            platform: Some(format!("{} {}", os, arch)),
            hints: Some(PlatformHints {
                platform: Some(os.to_string()),
                architecture: Some(arch.to_string()),
                bitness: Some(usize::BITS.to_string()),
            }),
            languages: languages_from_env(|var| std::env::var(var).ok()),
            do_not_track: std::env::var("DNT").ok(),
            cookies_enabled: self.cookies_enabled,
            logical_cores: std::thread::available_parallelism()
                .ok()
                .map(|n| n.get() as u32),
            device_memory_gb: device_memory_gb(),
            max_touch_points: 0,
            webdriver: false,
        }
    }

    fn screen(&self) -> Option<ScreenInfo> {
        None
    }

    fn time(&self) -> TimeInfo {
        TimeInfo {
            local_time: Local::now().fixed_offset(),
            timezone: timezone_name(),
            referrer: None,
            page_url: self.page_url.clone(),
        }
    }

    fn connection(&self) -> Option<ConnectionInfo> {
        None
    }

    async fn battery(&self) -> Result<BatteryStatus, CapabilityError> {
        battery_from_sysfs(Path::new(POWER_SUPPLY_DIR))
    }

    async fn geolocation(&self) -> Result<GeoPosition, CapabilityError> {
        Err(CapabilityError::Absent("geolocation"))
    }

    fn page_url(&self) -> Option<String> {
        self.page_url.clone()
    }
}
