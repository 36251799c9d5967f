//! Deterministic in-memory environments.
//!
//! These stand in for a live browser in the demo binary and in tests: every
//! accessor answers from fixed profile data, and individual probes can be
//! forced to fail to exercise sentinel containment.

pub mod desktop_chrome;
pub mod hardened_firefox;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::environment::{AdBait, Environment};
use crate::signal::{ProbeError, ProbeResult};
use crate::types::{
    BatteryStatus, ConnectionHint, DoNotTrack, PermissionKind, PermissionState, ScreenInfo,
};

/// A scripted [`Environment`] built from fixed per-signal answers.
///
/// Each field holds the `ProbeResult` the corresponding accessor will
/// return, so a test flips a signal to `Err(ProbeError::Unsupported)` to
/// simulate a missing capability. Bait attach/detach calls are counted so
/// the no-leak invariant of the ad-blocker probe is observable.
pub struct StaticEnvironment {
    pub user_agent: ProbeResult<String>,
    pub languages: ProbeResult<Vec<String>>,
    pub platform: ProbeResult<String>,
    pub cookie_enabled: ProbeResult<bool>,
    pub do_not_track: ProbeResult<DoNotTrack>,
    pub hardware_concurrency: ProbeResult<u32>,
    pub screen: ProbeResult<ScreenInfo>,
    pub timezone: ProbeResult<String>,
    pub render_engine: ProbeResult<String>,
    pub canvas_sample: ProbeResult<Vec<u8>>,
    pub local_storage: ProbeResult<bool>,
    pub session_storage: ProbeResult<bool>,
    pub indexed_db: ProbeResult<bool>,
    pub plugins: ProbeResult<Vec<String>>,
    pub touch_support: ProbeResult<bool>,
    pub connection: ProbeResult<ConnectionHint>,
    pub device_memory_gb: ProbeResult<f64>,
    pub webrtc: ProbeResult<bool>,
    pub battery: ProbeResult<BatteryStatus>,
    pub permissions: BTreeMap<PermissionKind, ProbeResult<PermissionState>>,

    /// Whether an ad blocker suppresses the bait (rendered height 0).
    pub ad_blocked: bool,
    pub bait_attach: ProbeResult<()>,
    pub bait_height: ProbeResult<()>,
    pub bait_detach: ProbeResult<()>,

    next_bait_id: AtomicU64,
    attach_count: AtomicUsize,
    detach_count: AtomicUsize,
}

impl StaticEnvironment {
    pub fn attach_count(&self) -> usize {
        self.attach_count.load(Ordering::SeqCst)
    }

    pub fn detach_count(&self) -> usize {
        self.detach_count.load(Ordering::SeqCst)
    }
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        desktop_chrome::environment()
    }
}

#[async_trait]
impl Environment for StaticEnvironment {
    fn user_agent(&self) -> ProbeResult<String> {
        self.user_agent.clone()
    }

    fn languages(&self) -> ProbeResult<Vec<String>> {
        self.languages.clone()
    }

    fn platform(&self) -> ProbeResult<String> {
        self.platform.clone()
    }

    fn cookie_enabled(&self) -> ProbeResult<bool> {
        self.cookie_enabled.clone()
    }

    fn do_not_track(&self) -> ProbeResult<DoNotTrack> {
        self.do_not_track.clone()
    }

    fn hardware_concurrency(&self) -> ProbeResult<u32> {
        self.hardware_concurrency.clone()
    }

    fn screen(&self) -> ProbeResult<ScreenInfo> {
        self.screen.clone()
    }

    fn timezone(&self) -> ProbeResult<String> {
        self.timezone.clone()
    }

    fn render_engine(&self) -> ProbeResult<String> {
        self.render_engine.clone()
    }

    fn canvas_sample(&self) -> ProbeResult<Vec<u8>> {
        self.canvas_sample.clone()
    }

    fn local_storage_writable(&self) -> ProbeResult<bool> {
        self.local_storage.clone()
    }

    fn session_storage_writable(&self) -> ProbeResult<bool> {
        self.session_storage.clone()
    }

    fn indexed_db_present(&self) -> ProbeResult<bool> {
        self.indexed_db.clone()
    }

    fn plugin_names(&self) -> ProbeResult<Vec<String>> {
        self.plugins.clone()
    }

    fn touch_support(&self) -> ProbeResult<bool> {
        self.touch_support.clone()
    }

    fn connection(&self) -> ProbeResult<ConnectionHint> {
        self.connection.clone()
    }

    fn device_memory_gb(&self) -> ProbeResult<f64> {
        self.device_memory_gb.clone()
    }

    fn attach_ad_bait(&self) -> ProbeResult<AdBait> {
        self.bait_attach.clone()?;
        self.attach_count.fetch_add(1, Ordering::SeqCst);
        Ok(AdBait::new(self.next_bait_id.fetch_add(1, Ordering::SeqCst)))
    }

    fn ad_bait_height(&self, _bait: &AdBait) -> ProbeResult<u32> {
        self.bait_height.clone()?;
        Ok(if self.ad_blocked { 0 } else { 12 })
    }

    fn detach_ad_bait(&self, _bait: AdBait) -> ProbeResult<()> {
        self.detach_count.fetch_add(1, Ordering::SeqCst);
        self.bait_detach.clone()
    }

    async fn webrtc_available(&self) -> ProbeResult<bool> {
        self.webrtc.clone()
    }

    async fn battery(&self) -> ProbeResult<BatteryStatus> {
        self.battery.clone()
    }

    async fn permission_state(&self, kind: PermissionKind) -> ProbeResult<PermissionState> {
        self.permissions
            .get(&kind)
            .cloned()
            .unwrap_or(Err(ProbeError::Unsupported))
    }
}

pub(crate) fn base(
    user_agent: &str,
    platform: &str,
    languages: &[&str],
) -> StaticEnvironment {
    StaticEnvironment {
        user_agent: Ok(user_agent.to_string()),
        languages: Ok(languages.iter().map(|l| l.to_string()).collect()),
        platform: Ok(platform.to_string()),
        cookie_enabled: Ok(true),
        do_not_track: Ok(DoNotTrack::Unset),
        hardware_concurrency: Ok(8),
        screen: Ok(ScreenInfo {
            width: 1920,
            height: 1080,
            color_depth: 24,
        }),
        timezone: Ok("UTC".to_string()),
        render_engine: Ok("Google Inc. - ANGLE".to_string()),
        canvas_sample: Ok(user_agent.as_bytes().to_vec()),
        local_storage: Ok(true),
        session_storage: Ok(true),
        indexed_db: Ok(true),
        plugins: Ok(vec!["PDF Viewer".to_string()]),
        touch_support: Ok(false),
        connection: Ok(ConnectionHint {
            effective_type: "4g".to_string(),
            downlink_mbps: 10.0,
            rtt_ms: 50,
        }),
        device_memory_gb: Ok(8.0),
        webrtc: Ok(true),
        battery: Err(ProbeError::Unsupported),
        permissions: PermissionKind::ALL
            .iter()
            .map(|kind| (*kind, Ok(PermissionState::Prompt)))
            .collect(),
        ad_blocked: false,
        bait_attach: Ok(()),
        bait_height: Ok(()),
        bait_detach: Ok(()),
        next_bait_id: AtomicU64::new(1),
        attach_count: AtomicUsize::new(0),
        detach_count: AtomicUsize::new(0),
    }
}
