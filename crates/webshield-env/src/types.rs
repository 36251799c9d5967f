use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::signal::Signal;

/// Do-not-track preference as browsers report it: set, explicitly off, or
/// never configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoNotTrack {
    Enabled,
    Disabled,
    Unset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
}

impl ScreenInfo {
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    pub charging: bool,
    /// Charge level in whole percent, 0..=100.
    pub level_percent: u8,
}

/// Coarse network hints exposed by the connection API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionHint {
    pub effective_type: String,
    pub downlink_mbps: f64,
    pub rtt_ms: u32,
}

/// The fixed set of permissions the collector queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    Camera,
    Microphone,
    Geolocation,
    Notifications,
}

impl PermissionKind {
    pub const ALL: [PermissionKind; 4] = [
        PermissionKind::Camera,
        PermissionKind::Microphone,
        PermissionKind::Geolocation,
        PermissionKind::Notifications,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
    /// The permissions API is absent or the query was rejected.
    Unavailable,
}

/// One immutable set of environment signals.
///
/// Assembled once per collection and never mutated afterwards; a new
/// assessment always produces a new record. Every field that can fail to
/// read is wrapped in [`Signal`] so absence stays distinguishable from a
/// real value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintSignals {
    pub user_agent: Signal<String>,
    pub languages: Signal<Vec<String>>,
    pub platform: Signal<String>,
    pub cookie_enabled: Signal<bool>,
    pub do_not_track: Signal<DoNotTrack>,
    pub hardware_concurrency: Signal<u32>,
    pub screen: Signal<ScreenInfo>,
    pub timezone: Signal<String>,
    /// Coarse vendor/renderer identifier, not a full GPU string.
    pub render_engine: Signal<String>,
    /// First 16 hex chars of the SHA-256 of the canvas render sample.
    pub canvas_hash: Signal<String>,
    pub local_storage: Signal<bool>,
    pub session_storage: Signal<bool>,
    pub indexed_db: Signal<bool>,
    pub ad_blocker: Signal<bool>,
    pub plugins: Signal<Vec<String>>,
    pub touch_support: Signal<bool>,
    pub webrtc: Signal<bool>,
    pub battery: Signal<BatteryStatus>,
    pub connection: Signal<ConnectionHint>,
    pub device_memory_gb: Signal<f64>,
    pub permissions: BTreeMap<PermissionKind, PermissionState>,
}

impl FingerprintSignals {
    /// Permission state for one kind; an absent entry reads as unavailable.
    pub fn permission(&self, kind: PermissionKind) -> PermissionState {
        self.permissions
            .get(&kind)
            .copied()
            .unwrap_or(PermissionState::Unavailable)
    }

    /// Plugin count, or `None` when the plugin list could not be read.
    pub fn plugin_count(&self) -> Option<usize> {
        self.plugins.value().map(Vec::len)
    }
}
