use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use webshield_env::Environment;
use webshield_fingerprint::FingerprintReport;
use webshield_remote::AssessmentClient;
use webshield_session::{AssessmentOutcome, SessionHandle};

mod cli;
use cli::{Args, Command, ProfileChoice};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("WEBSHIELD_LOG").unwrap_or_else(|_| "webshield=info".into()))
        .init();

    let args = Args::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "webshield starting");

    match args.command {
        Command::Assess {
            email,
            endpoint,
            profile,
            json,
        } => assess(email, endpoint, profile, json).await,
        Command::Fingerprint { profile, json } => fingerprint(profile, json).await,
    }
}

fn spawn_session(profile: ProfileChoice, endpoint: &str) -> Result<SessionHandle> {
    let env: Arc<dyn Environment> = Arc::new(profile.environment());
    let client = AssessmentClient::new(endpoint).context("building assessment client")?;
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tokio::spawn(webshield_session::run(rx, env, client));
    Ok(SessionHandle::new(tx))
}

async fn assess(email: String, endpoint: String, profile: ProfileChoice, json: bool) -> Result<()> {
    let password = read_password()?;

    let session = spawn_session(profile, &endpoint)?;
    let outcome = session.assess(email, password).await?;
    session.shutdown().await.ok();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        render_outcome(&outcome);
    }
    Ok(())
}

async fn fingerprint(profile: ProfileChoice, json: bool) -> Result<()> {
    let env: Arc<dyn Environment> = Arc::new(profile.environment());
    let signals = webshield_fingerprint::collect(env)
        .await
        .context("collecting fingerprint")?;
    let report = FingerprintReport::from_signals(signals);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_fingerprint(&report);
    }
    Ok(())
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush().ok();
    let mut password = String::new();
    io::stdin()
        .lock()
        .read_line(&mut password)
        .context("reading password from stdin")?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

fn render_outcome(outcome: &AssessmentOutcome) {
    println!("{} {}", outcome.summary.icon(), outcome.summary.message());
    println!("  Email breaches:  {}", outcome.summary.breach_count);
    println!(
        "  Password status: {}",
        if outcome.summary.password_pwned {
            "Compromised"
        } else {
            "Safe"
        }
    );

    match &outcome.fingerprint {
        Some(report) => {
            println!(
                "  Browser score:   {}/100 ({})",
                report.score,
                report.level.label()
            );
        }
        None => println!("  Browser score:   unavailable for this assessment"),
    }

    match &outcome.posture {
        Some(posture) => {
            println!(
                "  Overall score:   {}/100 ({})",
                posture.score,
                posture.grade.label()
            );
            println!("  Priority actions:");
            for action in &posture.priority_actions {
                println!("    - {action}");
            }
        }
        None => println!("  No recommendations were returned"),
    }
}

fn render_fingerprint(report: &FingerprintReport) {
    println!(
        "Browser security score: {}/100 ({})",
        report.score,
        report.level.label()
    );
    let signals = &report.signals;
    println!("  Cookies enabled: {}", flag(&signals.cookie_enabled));
    let dnt = match signals.do_not_track.value() {
        Some(webshield_env::DoNotTrack::Enabled) => "enabled",
        Some(webshield_env::DoNotTrack::Disabled) => "disabled",
        Some(webshield_env::DoNotTrack::Unset) => "unset",
        None => "unknown",
    };
    println!("  Do Not Track:    {dnt}");
    println!("  Ad blocker:      {}", flag(&signals.ad_blocker));
    println!("  WebRTC:          {}", flag(&signals.webrtc));
    println!(
        "  Plugins:         {}",
        signals
            .plugin_count()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".into())
    );
}

fn flag(signal: &webshield_env::Signal<bool>) -> &'static str {
    match signal.value() {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    }
}
