use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use webshield_fingerprint::{CollectError, FingerprintReport};
use webshield_remote::{AssessmentResponse, RemoteError};
use webshield_report::{AssessmentSummary, PostureReport};

#[derive(Debug, Error)]
pub enum AssessError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Collection(#[from] CollectError),
    /// A newer assessment started before this one settled; its result was
    /// discarded instead of being attributed to the wrong request.
    #[error("assessment superseded by a newer request")]
    Superseded,
    #[error("session closed")]
    Closed,
}

/// Everything one assessment produced. `fingerprint` is `None` when that
/// request's collection faulted; the rest of the assessment still stands.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub request_id: u64,
    pub summary: AssessmentSummary,
    pub posture: Option<PostureReport>,
    pub fingerprint: Option<FingerprintReport>,
    pub response: AssessmentResponse,
}

#[derive(Debug)]
pub enum SessionRequest {
    Assess {
        email: String,
        password: String,
        reply: oneshot::Sender<Result<AssessmentOutcome, AssessError>>,
    },
    Fingerprint {
        reply: oneshot::Sender<Result<FingerprintReport, AssessError>>,
    },
    Shutdown {
        reply: oneshot::Sender<Result<(), AssessError>>,
    },
}

/// Cheap cloneable front end to the session service loop.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionRequest>,
}

impl SessionHandle {
    pub fn new(tx: mpsc::UnboundedSender<SessionRequest>) -> Self {
        Self { tx }
    }

    async fn round_trip<T, F>(&self, build_request: F) -> Result<T, AssessError>
    where
        F: FnOnce(oneshot::Sender<Result<T, AssessError>>) -> SessionRequest,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build_request(reply_tx))
            .map_err(|_| AssessError::Closed)?;
        reply_rx.await.map_err(|_| AssessError::Closed)?
    }

    pub async fn assess(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<AssessmentOutcome, AssessError> {
        let email = email.into();
        let password = password.into();
        self.round_trip(|reply| SessionRequest::Assess {
            email,
            password,
            reply,
        })
        .await
    }

    pub async fn fingerprint(&self) -> Result<FingerprintReport, AssessError> {
        self.round_trip(|reply| SessionRequest::Fingerprint { reply })
            .await
    }

    pub async fn shutdown(&self) -> Result<(), AssessError> {
        self.round_trip(|reply| SessionRequest::Shutdown { reply })
            .await
    }
}
