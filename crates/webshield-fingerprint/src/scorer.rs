use serde::{Deserialize, Serialize};
use webshield_env::{DoNotTrack, FingerprintSignals, PermissionKind, PermissionState, Signal};

/// Security level band for the fingerprint score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    High,
    Medium,
    Low,
    Critical,
}

impl SecurityLevel {
    /// Inclusive lower bounds, checked in order; anything below the last
    /// threshold is critical.
    const THRESHOLDS: [(u8, SecurityLevel); 3] = [
        (80, SecurityLevel::High),
        (60, SecurityLevel::Medium),
        (40, SecurityLevel::Low),
    ];

    pub fn from_score(score: u8) -> Self {
        for (min, level) in Self::THRESHOLDS {
            if score >= min {
                return level;
            }
        }
        SecurityLevel::Critical
    }

    pub fn label(&self) -> &'static str {
        match self {
            SecurityLevel::High => "High",
            SecurityLevel::Medium => "Medium",
            SecurityLevel::Low => "Low",
            SecurityLevel::Critical => "Critical",
        }
    }
}

type Predicate = fn(&FingerprintSignals) -> bool;

/// Weighted-additive scoring table. Each row awards its points when the
/// predicate holds; sentinel signals fail every predicate and contribute
/// nothing. The sum is clamped to 100 so future rows cannot push the score
/// out of range.
const WEIGHTS: [(Predicate, u32); 9] = [
    (cookies_enabled, 10),
    (local_storage_available, 10),
    (session_storage_available, 10),
    (do_not_track_enabled, 15),
    (ad_blocker_detected, 20),
    (webrtc_disabled, 15),
    (few_plugins, 10),
    (camera_denied, 5),
    (microphone_denied, 5),
];

const MAX_SCORE: u32 = 100;
const PLUGIN_LIMIT: usize = 5;

fn cookies_enabled(s: &FingerprintSignals) -> bool {
    matches!(s.cookie_enabled, Signal::Value(true))
}

fn local_storage_available(s: &FingerprintSignals) -> bool {
    matches!(s.local_storage, Signal::Value(true))
}

fn session_storage_available(s: &FingerprintSignals) -> bool {
    matches!(s.session_storage, Signal::Value(true))
}

fn do_not_track_enabled(s: &FingerprintSignals) -> bool {
    matches!(s.do_not_track, Signal::Value(DoNotTrack::Enabled))
}

fn ad_blocker_detected(s: &FingerprintSignals) -> bool {
    matches!(s.ad_blocker, Signal::Value(true))
}

fn webrtc_disabled(s: &FingerprintSignals) -> bool {
    matches!(s.webrtc, Signal::Value(false))
}

fn few_plugins(s: &FingerprintSignals) -> bool {
    s.plugin_count().is_some_and(|count| count < PLUGIN_LIMIT)
}

fn camera_denied(s: &FingerprintSignals) -> bool {
    s.permission(PermissionKind::Camera) == PermissionState::Denied
}

fn microphone_denied(s: &FingerprintSignals) -> bool {
    s.permission(PermissionKind::Microphone) == PermissionState::Denied
}

/// Fingerprint security score: 0..=100 plus its band.
pub fn score(signals: &FingerprintSignals) -> (u8, SecurityLevel) {
    let total: u32 = WEIGHTS
        .iter()
        .filter(|(predicate, _)| predicate(signals))
        .map(|(_, points)| points)
        .sum();
    let score = total.min(MAX_SCORE) as u8;
    (score, SecurityLevel::from_score(score))
}

/// A scored fingerprint, carrying the record it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintReport {
    pub score: u8,
    pub level: SecurityLevel,
    pub signals: FingerprintSignals,
}

impl FingerprintReport {
    pub fn from_signals(signals: FingerprintSignals) -> Self {
        let (score, level) = score(&signals);
        FingerprintReport {
            score,
            level,
            signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::collector::collect;
    use webshield_env::profiles::{desktop_chrome, hardened_firefox};

    async fn signals_for(env: webshield_env::profiles::StaticEnvironment) -> FingerprintSignals {
        collect(Arc::new(env)).await.unwrap()
    }

    #[tokio::test]
    async fn hardened_profile_scores_at_the_ceiling() {
        let signals = signals_for(hardened_firefox::environment()).await;
        let (score, level) = score(&signals);
        assert_eq!(score, 100);
        assert_eq!(level, SecurityLevel::High);
    }

    #[tokio::test]
    async fn default_profile_scores_low() {
        // Cookies + both storages + one plugin: 10 + 10 + 10 + 10.
        let signals = signals_for(desktop_chrome::environment()).await;
        let (score, level) = score(&signals);
        assert_eq!(score, 40);
        assert_eq!(level, SecurityLevel::Low);
    }

    #[tokio::test]
    async fn score_is_always_bounded() {
        for env in [desktop_chrome::environment(), hardened_firefox::environment()] {
            let signals = signals_for(env).await;
            let (score, _) = score(&signals);
            assert!(score <= 100);
        }
    }

    #[tokio::test]
    async fn scoring_is_idempotent() {
        let signals = signals_for(hardened_firefox::environment()).await;
        assert_eq!(score(&signals), score(&signals));
    }

    #[tokio::test]
    async fn sentinel_signals_contribute_nothing() {
        let mut env = hardened_firefox::environment();
        env.plugins = Err(webshield_env::ProbeError::Failed("plugins threw".into()));
        let signals = signals_for(env).await;
        let (score, _) = score(&signals);
        assert_eq!(score, 90);
    }

    #[test]
    fn band_boundaries_match_the_table() {
        assert_eq!(SecurityLevel::from_score(100), SecurityLevel::High);
        assert_eq!(SecurityLevel::from_score(80), SecurityLevel::High);
        assert_eq!(SecurityLevel::from_score(79), SecurityLevel::Medium);
        assert_eq!(SecurityLevel::from_score(60), SecurityLevel::Medium);
        assert_eq!(SecurityLevel::from_score(59), SecurityLevel::Low);
        assert_eq!(SecurityLevel::from_score(40), SecurityLevel::Low);
        assert_eq!(SecurityLevel::from_score(39), SecurityLevel::Critical);
        assert_eq!(SecurityLevel::from_score(0), SecurityLevel::Critical);
    }
}
