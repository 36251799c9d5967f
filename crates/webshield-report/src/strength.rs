//! Adapter over the black-box password-strength analyzer.
//!
//! The entropy/pattern-matching algorithm itself lives behind
//! [`StrengthAnalyzer`]; this module only normalizes its output shape into a
//! display-ready report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attack-speed profiles the crack-time estimates are keyed by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AttackProfile {
    OnlineThrottled,
    OnlineUnthrottled,
    OfflineSlow,
    OfflineFast,
}

impl AttackProfile {
    pub const ALL: [AttackProfile; 4] = [
        AttackProfile::OnlineThrottled,
        AttackProfile::OnlineUnthrottled,
        AttackProfile::OfflineSlow,
        AttackProfile::OfflineFast,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AttackProfile::OnlineThrottled => "Online (throttled)",
            AttackProfile::OnlineUnthrottled => "Online (unthrottled)",
            AttackProfile::OfflineSlow => "Offline (slow)",
            AttackProfile::OfflineFast => "Offline (fast)",
        }
    }
}

/// Crack-time estimates in seconds, one per attack profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrackTimes {
    pub online_throttled: f64,
    pub online_unthrottled: f64,
    pub offline_slow: f64,
    pub offline_fast: f64,
}

impl CrackTimes {
    pub fn seconds(&self, profile: AttackProfile) -> f64 {
        match profile {
            AttackProfile::OnlineThrottled => self.online_throttled,
            AttackProfile::OnlineUnthrottled => self.online_unthrottled,
            AttackProfile::OfflineSlow => self.offline_slow,
            AttackProfile::OfflineFast => self.offline_fast,
        }
    }
}

/// One detected token in the password (dictionary word, sequence, repeat...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<String>,
}

/// The analyzer's raw output shape. Produced externally; the adapter trusts
/// the shape but not the score range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStrength {
    pub score: u8,
    pub crack_times_seconds: CrackTimes,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
    pub sequence: Vec<PatternMatch>,
}

/// The black-box strength analysis boundary. Implementations receive the
/// password for the immediate in-process call only and must not store or
/// transmit it.
pub trait StrengthAnalyzer: Send + Sync {
    fn analyze(&self, password: &str) -> RawStrength;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthBand {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    /// Score outside 0..=4; a defensive fallback, not an error.
    Unknown,
}

impl StrengthBand {
    const BY_SCORE: [StrengthBand; 5] = [
        StrengthBand::VeryWeak,
        StrengthBand::Weak,
        StrengthBand::Fair,
        StrengthBand::Good,
        StrengthBand::Strong,
    ];

    pub fn from_score(score: u8) -> Self {
        Self::BY_SCORE
            .get(score as usize)
            .copied()
            .unwrap_or(StrengthBand::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthBand::VeryWeak => "Very Weak",
            StrengthBand::Weak => "Weak",
            StrengthBand::Fair => "Fair",
            StrengthBand::Good => "Good",
            StrengthBand::Strong => "Strong",
            StrengthBand::Unknown => "Unknown",
        }
    }
}

/// Display-ready strength assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthReport {
    pub score: u8,
    pub band: StrengthBand,
    pub crack_times: BTreeMap<AttackProfile, String>,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
    pub sequence: Vec<PatternMatch>,
}

impl StrengthReport {
    pub fn from_raw(raw: RawStrength) -> Self {
        let crack_times = AttackProfile::ALL
            .iter()
            .map(|profile| {
                (
                    *profile,
                    format_crack_time(raw.crack_times_seconds.seconds(*profile)),
                )
            })
            .collect();
        StrengthReport {
            score: raw.score,
            band: StrengthBand::from_score(raw.score),
            crack_times,
            warning: raw.warning,
            suggestions: raw.suggestions,
            sequence: raw.sequence,
        }
    }
}

/// Analyze a live password. An empty password yields `None` so a cleared
/// input can never show a stale prior result.
pub fn strength_report(
    password: &str,
    analyzer: &dyn StrengthAnalyzer,
) -> Option<StrengthReport> {
    if password.is_empty() {
        return None;
    }
    Some(StrengthReport::from_raw(analyzer.analyze(password)))
}

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const MONTH: f64 = 2_592_000.0;
const YEAR: f64 = 31_536_000.0;

/// Human crack-time label with fixed breakpoints, rounding to the nearest
/// whole unit. Unit labels are always plural ("1 hours"), matching the
/// output this is displayed alongside.
pub fn format_crack_time(seconds: f64) -> String {
    if seconds < 1.0 {
        "instantly".to_string()
    } else if seconds < MINUTE {
        format!("{} seconds", seconds.round())
    } else if seconds < HOUR {
        format!("{} minutes", (seconds / MINUTE).round())
    } else if seconds < DAY {
        format!("{} hours", (seconds / HOUR).round())
    } else if seconds < MONTH {
        format!("{} days", (seconds / DAY).round())
    } else if seconds < YEAR {
        format!("{} months", (seconds / MONTH).round())
    } else {
        format!("{} years", (seconds / YEAR).round())
    }
}
