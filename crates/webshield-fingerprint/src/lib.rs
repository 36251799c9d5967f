pub mod collector;
pub mod scorer;

pub use collector::{collect, CollectError, AD_BAIT_SETTLE};
pub use scorer::{score, FingerprintReport, SecurityLevel};
