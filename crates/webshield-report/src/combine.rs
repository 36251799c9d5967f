use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Good,
    Warning,
    Critical,
}

impl OverallStatus {
    pub fn message(&self) -> &'static str {
        match self {
            OverallStatus::Good => "Your security looks good!",
            OverallStatus::Warning => "Some security concerns found",
            OverallStatus::Critical => "Critical security issues detected!",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            OverallStatus::Good => "🛡️",
            OverallStatus::Warning => "⚠️",
            OverallStatus::Critical => "🚨",
        }
    }
}

/// Decision table over (any email breach, password pwned). This is the only
/// place overall status is decided; fingerprint and recommendation scores
/// are informational and never feed into it.
const DECISION_TABLE: [(bool, bool, OverallStatus); 4] = [
    (true, true, OverallStatus::Critical),
    (true, false, OverallStatus::Warning),
    (false, true, OverallStatus::Warning),
    (false, false, OverallStatus::Good),
];

/// Derived per response, never stored across assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub status: OverallStatus,
    pub breach_count: u64,
    pub password_pwned: bool,
}

impl AssessmentSummary {
    pub fn message(&self) -> &'static str {
        self.status.message()
    }

    pub fn icon(&self) -> &'static str {
        self.status.icon()
    }
}

pub fn combine(breach_count: u64, password_pwned: bool) -> AssessmentSummary {
    let breached = breach_count > 0;
    let status = DECISION_TABLE
        .iter()
        .find(|(b, p, _)| *b == breached && *p == password_pwned)
        .map(|(_, _, status)| *status)
        .unwrap_or(OverallStatus::Good);
    AssessmentSummary {
        status,
        breach_count,
        password_pwned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_table() {
        assert_eq!(combine(2, true).status, OverallStatus::Critical);
        assert_eq!(combine(1, false).status, OverallStatus::Warning);
        assert_eq!(combine(0, true).status, OverallStatus::Warning);
        assert_eq!(combine(0, false).status, OverallStatus::Good);
    }

    #[test]
    fn summary_keeps_its_inputs() {
        let summary = combine(3, false);
        assert_eq!(summary.breach_count, 3);
        assert!(!summary.password_pwned);
        assert_eq!(summary.message(), "Some security concerns found");
        assert_eq!(summary.icon(), "⚠️");
    }
}
