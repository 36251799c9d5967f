//! End-to-end assessment smoke test against a local fixture server.
//!
//! Run with:
//!   cargo test -p webshield-core --test assess_smoke

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use webshield_env::profiles::hardened_firefox;
use webshield_env::Environment;
use webshield_remote::AssessmentClient;
use webshield_report::OverallStatus;
use webshield_session::{AssessError, SessionHandle};

const RESPONSE_BODY: &str = r#"{
  "email_breaches": [
    {"Name": "ExampleSite", "Title": "Example Site", "Domain": "example.com",
     "BreachDate": "2019-03-01", "DataClasses": ["Email addresses"], "IsVerified": true}
  ],
  "password_pwned_count": 42,
  "recommendations": [
    {"type": "critical", "title": "Email Found in Data Breaches",
     "description": "Your email was found in 1 data breach(es).",
     "action": "Change passwords for affected accounts and enable 2FA where possible"},
    {"type": "critical", "title": "Password Found in Breaches",
     "description": "This password has been seen 42 times in data breaches.",
     "action": "Change this password immediately and use a unique, strong password"},
    {"type": "info", "title": "Enable Two-Factor Authentication",
     "description": "Add an extra layer of security to your accounts.",
     "action": "Enable 2FA on all important accounts"}
  ],
  "timestamp": "2024-01-01T00:00:00"
}"#;

/// Minimal HTTP/1.1 server answering every request with the canned
/// assessment payload.
async fn start_fixture_server() -> Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\
                     \r\n",
                    RESPONSE_BODY.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.write_all(RESPONSE_BODY.as_bytes()).await;
            });
        }
    });

    Ok((addr, handle))
}

fn spawn_session(endpoint: &str) -> Result<SessionHandle> {
    let env: Arc<dyn Environment> = Arc::new(hardened_firefox::environment());
    let client = AssessmentClient::new(endpoint)?;
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tokio::spawn(webshield_session::run(rx, env, client));
    Ok(SessionHandle::new(tx))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn assess_round_trip_combines_all_scores() -> Result<()> {
    let (addr, server) = start_fixture_server().await?;
    let session = spawn_session(&format!("http://{addr}"))?;

    let outcome = session.assess("user@example.com", "hunter2").await?;

    // Combiner: breaches present and password pwned -> critical.
    assert_eq!(outcome.summary.status, OverallStatus::Critical);
    assert_eq!(outcome.summary.breach_count, 1);
    assert!(outcome.summary.password_pwned);

    // Fingerprint from the hardened profile scores at the ceiling.
    let fingerprint = outcome.fingerprint.as_ref().expect("fingerprint present");
    assert_eq!(fingerprint.score, 100);

    // Two criticals against the base score: 100 - 60 = 40.
    let posture = outcome.posture.as_ref().expect("posture present");
    assert_eq!(posture.score, 40);
    assert_eq!(posture.critical.len(), 2);
    assert_eq!(posture.info.len(), 1);

    session.shutdown().await.ok();
    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn superseded_assessment_is_discarded() -> Result<()> {
    let (addr, server) = start_fixture_server().await?;
    let session = spawn_session(&format!("http://{addr}"))?;

    // Fire two assessments back to back: the second supersedes the first
    // while the first is still waiting out the ad-bait settle delay.
    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.assess("user@example.com", "old-password").await })
    };
    // Let the first request register before the second one lands; the
    // ad-bait settle delay keeps the first collection in flight far longer.
    tokio::time::sleep(std::time::Duration::from_millis(25)).await;
    let second = {
        let session = session.clone();
        tokio::spawn(async move { session.assess("user@example.com", "new-password").await })
    };

    let (first, second) = tokio::join!(first, second);
    assert!(matches!(first?, Err(AssessError::Superseded)));
    let outcome = second??;
    assert_eq!(outcome.summary.status, OverallStatus::Critical);

    session.shutdown().await.ok();
    server.abort();
    Ok(())
}

#[tokio::test]
async fn unreachable_service_is_a_single_remote_error() -> Result<()> {
    // Reserved port that nothing listens on.
    let session = spawn_session("http://127.0.0.1:9")?;
    let err = session
        .assess("user@example.com", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, AssessError::Remote(_)));
    session.shutdown().await.ok();
    Ok(())
}
