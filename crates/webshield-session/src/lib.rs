pub mod handle;
pub mod service;

pub use handle::{AssessError, AssessmentOutcome, SessionHandle, SessionRequest};
pub use service::run;
