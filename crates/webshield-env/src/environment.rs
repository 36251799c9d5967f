use async_trait::async_trait;

use crate::signal::ProbeResult;
use crate::types::{
    BatteryStatus, ConnectionHint, DoNotTrack, PermissionKind, PermissionState, ScreenInfo,
};

/// Opaque handle to an attached ad-bait element.
///
/// The collector is responsible for passing it back to
/// [`Environment::detach_ad_bait`] on every exit path; the type is
/// deliberately not `Clone` so a bait cannot be detached twice.
#[derive(Debug, PartialEq, Eq)]
pub struct AdBait(pub(crate) u64);

impl AdBait {
    pub fn new(id: u64) -> Self {
        AdBait(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The browser capability boundary.
///
/// Accessors never panic and never block on user interaction: anything the
/// environment cannot answer comes back as a [`crate::ProbeError`], which
/// the collector converts to a sentinel. Synchronous methods are cheap
/// reads; the async methods are the probes that may genuinely suspend.
#[async_trait]
pub trait Environment: Send + Sync {
    fn user_agent(&self) -> ProbeResult<String>;
    fn languages(&self) -> ProbeResult<Vec<String>>;
    fn platform(&self) -> ProbeResult<String>;
    fn cookie_enabled(&self) -> ProbeResult<bool>;
    fn do_not_track(&self) -> ProbeResult<DoNotTrack>;
    fn hardware_concurrency(&self) -> ProbeResult<u32>;
    fn screen(&self) -> ProbeResult<ScreenInfo>;
    fn timezone(&self) -> ProbeResult<String>;
    fn render_engine(&self) -> ProbeResult<String>;
    /// Raw bytes of a deterministic canvas render; hashing is the
    /// collector's job.
    fn canvas_sample(&self) -> ProbeResult<Vec<u8>>;
    /// Write-then-remove storage probes. Access failures must surface as
    /// `Err`, never as a panic.
    fn local_storage_writable(&self) -> ProbeResult<bool>;
    fn session_storage_writable(&self) -> ProbeResult<bool>;
    fn indexed_db_present(&self) -> ProbeResult<bool>;
    fn plugin_names(&self) -> ProbeResult<Vec<String>>;
    fn touch_support(&self) -> ProbeResult<bool>;
    fn connection(&self) -> ProbeResult<ConnectionHint>;
    fn device_memory_gb(&self) -> ProbeResult<f64>;

    /// Insert the ad-bait element into the page.
    fn attach_ad_bait(&self) -> ProbeResult<AdBait>;
    /// Rendered height of the bait after the settle delay; zero means a
    /// blocker suppressed it.
    fn ad_bait_height(&self, bait: &AdBait) -> ProbeResult<u32>;
    /// Remove the bait element. Called exactly once per successful attach.
    fn detach_ad_bait(&self, bait: AdBait) -> ProbeResult<()>;

    async fn webrtc_available(&self) -> ProbeResult<bool>;
    async fn battery(&self) -> ProbeResult<BatteryStatus>;
    async fn permission_state(&self, kind: PermissionKind) -> ProbeResult<PermissionState>;
}
