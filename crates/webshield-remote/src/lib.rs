pub mod client;
pub mod types;

pub use client::{validate_request, AssessmentClient, RemoteError};
pub use types::{AssessmentResponse, BreachRecord};
