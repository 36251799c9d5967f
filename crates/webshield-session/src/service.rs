use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use webshield_env::Environment;
use webshield_fingerprint::{collect, FingerprintReport};
use webshield_remote::{validate_request, AssessmentClient};
use webshield_report::{aggregate, combine};

use crate::handle::{AssessError, AssessmentOutcome, SessionRequest};

/// Session service loop.
///
/// Each `Assess` gets a fresh request id and runs in its own task, so one
/// slow collection never blocks the loop, and a settled collection that no
/// longer matches the current id is discarded rather than delivered.
pub async fn run(
    mut rx: mpsc::UnboundedReceiver<SessionRequest>,
    env: Arc<dyn Environment>,
    client: AssessmentClient,
) {
    tracing::info!(target: "webshield_session", "service loop started");
    let current_request = Arc::new(AtomicU64::new(0));
    let mut next_request_id: u64 = 0;

    while let Some(req) = rx.recv().await {
        match req {
            SessionRequest::Assess {
                email,
                password,
                reply,
            } => {
                next_request_id += 1;
                let request_id = next_request_id;
                current_request.store(request_id, Ordering::SeqCst);
                tracing::info!(
                    target: "webshield_session",
                    request_id,
                    email_len = email.len(),
                    "Assess"
                );
                let env = env.clone();
                let client = client.clone();
                let current = current_request.clone();
                tokio::spawn(async move {
                    let result =
                        assess(request_id, &current, env, &client, &email, &password).await;
                    let _ = reply.send(result);
                });
            }
            SessionRequest::Fingerprint { reply } => {
                tracing::info!(target: "webshield_session", "Fingerprint");
                let env = env.clone();
                tokio::spawn(async move {
                    let result = collect(env)
                        .await
                        .map(FingerprintReport::from_signals)
                        .map_err(AssessError::from);
                    let _ = reply.send(result);
                });
            }
            SessionRequest::Shutdown { reply } => {
                tracing::info!(target: "webshield_session", "Shutdown - exiting service loop");
                let _ = reply.send(Ok(()));
                break;
            }
        }
    }

    tracing::info!(target: "webshield_session", "service loop exited");
}

async fn assess(
    request_id: u64,
    current: &AtomicU64,
    env: Arc<dyn Environment>,
    client: &AssessmentClient,
    email: &str,
    password: &str,
) -> Result<AssessmentOutcome, AssessError> {
    // Reject bad input before a single probe or network call happens.
    validate_request(email, password)?;

    let (remote, collection) = tokio::join!(
        client.check_security(email, password),
        collect(env)
    );
    let response = remote?;

    // In-flight probes were allowed to settle; now make sure the result
    // still belongs to the newest request before handing it out.
    if current.load(Ordering::SeqCst) != request_id {
        tracing::debug!(
            target: "webshield_session",
            request_id,
            "discarding superseded assessment"
        );
        return Err(AssessError::Superseded);
    }

    let fingerprint = match collection {
        Ok(signals) => Some(FingerprintReport::from_signals(signals)),
        Err(err) => {
            tracing::warn!(
                target: "webshield_session",
                request_id,
                error = %err,
                "fingerprint absent for this assessment"
            );
            None
        }
    };

    let summary = combine(response.breach_count(), response.password_pwned());
    let posture = aggregate(&response.recommendations);

    Ok(AssessmentOutcome {
        request_id,
        summary,
        posture,
        fingerprint,
        response,
    })
}
