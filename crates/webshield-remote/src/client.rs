use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::types::AssessmentResponse;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CHECK_SECURITY_PATH: &str = "/api/check-security";

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Rejected before any network work: empty email, missing `@`, or an
    /// empty password.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The assessment service is unreachable or answered unusably. One
    /// user-facing error; no partial scores come out of a failed call.
    #[error("assessment service unavailable: {0}")]
    Unavailable(String),
}

/// Gate every assessment request before probes or network traffic start.
pub fn validate_request(email: &str, password: &str) -> Result<(), RemoteError> {
    if email.trim().is_empty() {
        return Err(RemoteError::InvalidInput("email is required"));
    }
    if !email.contains('@') {
        return Err(RemoteError::InvalidInput("email must contain '@'"));
    }
    if password.is_empty() {
        return Err(RemoteError::InvalidInput("password is required"));
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckSecurityRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the breach/recommendation service.
#[derive(Debug, Clone)]
pub struct AssessmentClient {
    client: reqwest::Client,
    base_url: String,
}

impl AssessmentClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| RemoteError::Unavailable(err.to_string()))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { client, base_url })
    }

    /// Run the remote breach check. The password travels only in the
    /// request body and is never logged here.
    pub async fn check_security(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AssessmentResponse, RemoteError> {
        validate_request(email, password)?;

        let url = format!("{}{}", self.base_url, CHECK_SECURITY_PATH);
        tracing::debug!(
            target: "webshield_remote",
            url = %url,
            email_len = email.len(),
            "check-security request"
        );

        let response = self
            .client
            .post(&url)
            .json(&CheckSecurityRequest {
                email: email.trim(),
                password,
            })
            .send()
            .await
            .map_err(|err| RemoteError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Unavailable(format!(
                "service answered {status}"
            )));
        }

        response
            .json::<AssessmentResponse>()
            .await
            .map_err(|err| RemoteError::Unavailable(format!("undecodable response: {err}")))
    }
}
