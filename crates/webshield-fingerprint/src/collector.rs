use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinError;
use webshield_env::{
    Environment, FingerprintSignals, PermissionKind, PermissionState, ProbeResult, Signal,
};

/// Settle delay between attaching the ad bait and reading it back. Blocking
/// extensions act asynchronously, so the read must not happen immediately.
pub const AD_BAIT_SETTLE: Duration = Duration::from_millis(100);

const CANVAS_HASH_BYTES: usize = 8;

/// A collection faulted after its probes settled. Per-signal failures never
/// produce this; they degrade to sentinels inside the record.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("fingerprint assembly failed: {0}")]
    Collection(String),
}

/// Gather one immutable [`FingerprintSignals`] record.
///
/// The async probes (ad bait, WebRTC, battery, the four permission queries)
/// run as independent tasks and the collection completes only once every
/// one of them has settled. No probe is retried: a retry would change what
/// the timed ad-bait measurement means.
pub async fn collect(env: Arc<dyn Environment>) -> Result<FingerprintSignals, CollectError> {
    let ad_probe = tokio::spawn(probe_ad_blocker(env.clone()));
    let webrtc_probe = tokio::spawn({
        let env = env.clone();
        async move { Signal::from(env.webrtc_available().await) }
    });
    let battery_probe = tokio::spawn({
        let env = env.clone();
        async move { Signal::from(env.battery().await) }
    });
    let permission_probes: Vec<_> = PermissionKind::ALL
        .iter()
        .map(|kind| {
            let env = env.clone();
            let kind = *kind;
            (
                kind,
                tokio::spawn(async move {
                    permission_or_unavailable(env.permission_state(kind).await)
                }),
            )
        })
        .collect();

    // Synchronous reads settle while the probes are in flight.
    let user_agent = Signal::from(env.user_agent());
    let languages = Signal::from(env.languages());
    let platform = Signal::from(env.platform());
    let cookie_enabled = Signal::from(env.cookie_enabled());
    let do_not_track = Signal::from(env.do_not_track());
    let hardware_concurrency = Signal::from(env.hardware_concurrency());
    let screen = Signal::from(env.screen());
    let timezone = Signal::from(env.timezone());
    let render_engine = Signal::from(env.render_engine());
    let canvas_hash = Signal::from(env.canvas_sample().map(|bytes| canvas_hash(&bytes)));
    let local_storage = Signal::from(env.local_storage_writable());
    let session_storage = Signal::from(env.session_storage_writable());
    let indexed_db = Signal::from(env.indexed_db_present());
    let plugins = Signal::from(env.plugin_names());
    let touch_support = Signal::from(env.touch_support());
    let connection = Signal::from(env.connection());
    let device_memory_gb = Signal::from(env.device_memory_gb());

    let ad_outcome = ad_probe.await.map_err(join_fault)?;
    if let Err(err) = ad_outcome.detach {
        // A bait element leaked into the page; treat the whole collection
        // as faulted rather than returning a record from a dirty page.
        return Err(CollectError::Collection(format!(
            "ad bait left attached: {err}"
        )));
    }
    let webrtc = webrtc_probe.await.map_err(join_fault)?;
    let battery = battery_probe.await.map_err(join_fault)?;
    let mut permissions = BTreeMap::new();
    for (kind, handle) in permission_probes {
        permissions.insert(kind, handle.await.map_err(join_fault)?);
    }

    let signals = FingerprintSignals {
        user_agent,
        languages,
        platform,
        cookie_enabled,
        do_not_track,
        hardware_concurrency,
        screen,
        timezone,
        render_engine,
        canvas_hash,
        local_storage,
        session_storage,
        indexed_db,
        ad_blocker: ad_outcome.signal,
        plugins,
        touch_support,
        webrtc,
        battery,
        connection,
        device_memory_gb,
        permissions,
    };
    tracing::debug!(target: "webshield_fingerprint", "collection settled");
    Ok(signals)
}

struct AdBaitOutcome {
    signal: Signal<bool>,
    detach: ProbeResult<()>,
}

/// Timed ad-blocker probe: attach the bait, wait for any blocker to act,
/// read the rendered height, detach. The bait must come back out on every
/// path, including a failed height read.
async fn probe_ad_blocker(env: Arc<dyn Environment>) -> AdBaitOutcome {
    let bait = match env.attach_ad_bait() {
        Ok(bait) => bait,
        Err(err) => {
            // Nothing was attached, so there is nothing to detach.
            return AdBaitOutcome {
                signal: Signal::from(Err(err)),
                detach: Ok(()),
            };
        }
    };

    tokio::time::sleep(AD_BAIT_SETTLE).await;

    let height = env.ad_bait_height(&bait);
    let detach = env.detach_ad_bait(bait);
    AdBaitOutcome {
        signal: Signal::from(height.map(|h| h == 0)),
        detach,
    }
}

fn permission_or_unavailable(result: ProbeResult<PermissionState>) -> PermissionState {
    result.unwrap_or(PermissionState::Unavailable)
}

fn join_fault(err: JoinError) -> CollectError {
    CollectError::Collection(format!("probe task did not settle: {err}"))
}

/// First 16 hex chars of the SHA-256 digest of the canvas render sample.
fn canvas_hash(sample: &[u8]) -> String {
    let digest = ring::digest::digest(&ring::digest::SHA256, sample);
    digest
        .as_ref()
        .iter()
        .take(CANVAS_HASH_BYTES)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use webshield_env::profiles::{desktop_chrome, hardened_firefox};
    use webshield_env::ProbeError;

    #[tokio::test]
    async fn blocked_bait_reads_as_ad_blocker() {
        let env = Arc::new(hardened_firefox::environment());
        let signals = collect(env.clone()).await.unwrap();
        assert_eq!(signals.ad_blocker, Signal::Value(true));
        assert_eq!(env.attach_count(), 1);
        assert_eq!(env.detach_count(), 1);
    }

    #[tokio::test]
    async fn unblocked_bait_reads_as_no_ad_blocker() {
        let env = Arc::new(desktop_chrome::environment());
        let signals = collect(env.clone()).await.unwrap();
        assert_eq!(signals.ad_blocker, Signal::Value(false));
        assert_eq!(env.detach_count(), 1);
    }

    #[tokio::test]
    async fn bait_detached_even_when_height_read_fails() {
        let mut env = desktop_chrome::environment();
        env.bait_height = Err(ProbeError::Failed("layout gone".into()));
        let env = Arc::new(env);
        let signals = collect(env.clone()).await.unwrap();
        assert_eq!(signals.ad_blocker, Signal::Error);
        assert_eq!(env.attach_count(), 1);
        assert_eq!(env.detach_count(), 1);
    }

    #[tokio::test]
    async fn failed_attach_is_a_sentinel_not_a_fault() {
        let mut env = desktop_chrome::environment();
        env.bait_attach = Err(ProbeError::Unsupported);
        let env = Arc::new(env);
        let signals = collect(env.clone()).await.unwrap();
        assert_eq!(signals.ad_blocker, Signal::Unsupported);
        assert_eq!(env.detach_count(), 0);
    }

    #[tokio::test]
    async fn failed_detach_fails_the_whole_collection() {
        let mut env = desktop_chrome::environment();
        env.bait_detach = Err(ProbeError::Failed("node busy".into()));
        let result = collect(Arc::new(env)).await;
        assert!(matches!(result, Err(CollectError::Collection(_))));
    }

    #[tokio::test]
    async fn per_signal_failures_degrade_to_sentinels() {
        let mut env = desktop_chrome::environment();
        env.battery = Err(ProbeError::Unavailable);
        env.webrtc = Err(ProbeError::Failed("peer connection threw".into()));
        env.local_storage = Err(ProbeError::Unavailable);
        env.permissions
            .insert(PermissionKind::Geolocation, Err(ProbeError::Denied));
        let signals = collect(Arc::new(env)).await.unwrap();
        assert_eq!(signals.battery, Signal::Unavailable);
        assert_eq!(signals.webrtc, Signal::Error);
        assert_eq!(signals.local_storage, Signal::Unavailable);
        assert_eq!(
            signals.permission(PermissionKind::Geolocation),
            PermissionState::Unavailable
        );
        // Contained failures never abort the rest of the record.
        assert!(signals.user_agent.is_value());
    }

    #[tokio::test]
    async fn canvas_hash_is_truncated_hex() {
        let signals = collect(Arc::new(desktop_chrome::environment()))
            .await
            .unwrap();
        let hash = signals.canvas_hash.value().unwrap();
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn same_environment_yields_identical_records() {
        let first = collect(Arc::new(desktop_chrome::environment())).await.unwrap();
        let second = collect(Arc::new(desktop_chrome::environment())).await.unwrap();
        assert_eq!(first, second);
    }
}
