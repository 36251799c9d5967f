pub mod combine;
pub mod recommend;
pub mod strength;

pub use combine::{combine, AssessmentSummary, OverallStatus};
pub use recommend::{
    aggregate, Category, PostureGrade, PostureReport, RecommendationRecord,
};
pub use strength::{
    strength_report, AttackProfile, CrackTimes, PatternMatch, RawStrength, StrengthAnalyzer,
    StrengthBand, StrengthReport,
};
