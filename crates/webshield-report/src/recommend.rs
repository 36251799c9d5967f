use serde::{Deserialize, Serialize};

/// Recommendation category. Unknown categories from the remote service
/// normalize to `Info` instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Critical,
    Warning,
    Success,
    #[serde(other)]
    Info,
}

/// One recommendation as produced by the remote service. Consumed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    #[serde(rename = "type")]
    pub category: Category,
    pub title: String,
    pub description: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostureGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PostureGrade {
    const THRESHOLDS: [(u8, PostureGrade); 3] = [
        (80, PostureGrade::Excellent),
        (60, PostureGrade::Good),
        (40, PostureGrade::Fair),
    ];

    pub fn from_score(score: u8) -> Self {
        for (min, grade) in Self::THRESHOLDS {
            if score >= min {
                return grade;
            }
        }
        PostureGrade::Poor
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostureGrade::Excellent => "Excellent",
            PostureGrade::Good => "Good",
            PostureGrade::Fair => "Fair",
            PostureGrade::Poor => "Poor",
        }
    }
}

// Composite scoring constants: start at 100, subtract per issue, credit
// successes, clamp. Info records are neutral.
const BASE_SCORE: i32 = 100;
const CRITICAL_PENALTY: i32 = 30;
const WARNING_PENALTY: i32 = 15;
const SUCCESS_CREDIT: i32 = 10;

/// Aggregated view of one recommendation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureReport {
    pub score: u8,
    pub grade: PostureGrade,
    /// Records partitioned by category, relative order preserved.
    pub critical: Vec<RecommendationRecord>,
    pub warnings: Vec<RecommendationRecord>,
    pub successes: Vec<RecommendationRecord>,
    pub info: Vec<RecommendationRecord>,
    /// Fixed-order action summary: critical first, then warnings, then the
    /// two standing advisory lines. Never re-sorted.
    pub priority_actions: Vec<String>,
}

/// Aggregate a recommendation list into a composite posture report.
///
/// An empty list is a distinguished state (`None`), not a perfect score:
/// "nothing was evaluated" must stay separate from "everything passed".
pub fn aggregate(records: &[RecommendationRecord]) -> Option<PostureReport> {
    if records.is_empty() {
        return None;
    }

    let mut critical = Vec::new();
    let mut warnings = Vec::new();
    let mut successes = Vec::new();
    let mut info = Vec::new();
    for record in records {
        match record.category {
            Category::Critical => critical.push(record.clone()),
            Category::Warning => warnings.push(record.clone()),
            Category::Success => successes.push(record.clone()),
            Category::Info => info.push(record.clone()),
        }
    }

    let raw = BASE_SCORE - CRITICAL_PENALTY * critical.len() as i32
        - WARNING_PENALTY * warnings.len() as i32
        + SUCCESS_CREDIT * successes.len() as i32;
    let score = raw.clamp(0, 100) as u8;

    let mut priority_actions = Vec::new();
    if !critical.is_empty() {
        priority_actions.push(format!(
            "Address {} critical security issue{} immediately",
            critical.len(),
            plural(critical.len())
        ));
    }
    if !warnings.is_empty() {
        priority_actions.push(format!(
            "Review {} warning{} when possible",
            warnings.len(),
            plural(warnings.len())
        ));
    }
    priority_actions.push("Consider implementing general security best practices".to_string());
    priority_actions.push("Regularly monitor your accounts and run security checks".to_string());

    Some(PostureReport {
        score,
        grade: PostureGrade::from_score(score),
        critical,
        warnings,
        successes,
        info,
        priority_actions,
    })
}

fn plural(count: usize) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}
