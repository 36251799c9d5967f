use clap::{Parser, Subcommand, ValueEnum};

use webshield_env::profiles::{desktop_chrome, hardened_firefox, StaticEnvironment};

#[derive(Debug, Parser)]
#[command(name = "webshield", version, about = "Security posture assessment engine")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a full assessment: remote breach check plus fingerprint score.
    /// The password is read from stdin and never echoed into logs.
    Assess {
        #[arg(long)]
        email: String,
        /// Base URL of the assessment service.
        #[arg(long, env = "WEBSHIELD_ENDPOINT", default_value = "http://localhost:5000")]
        endpoint: String,
        #[arg(long, value_enum, default_value_t = ProfileChoice::ChromeDesktop)]
        profile: ProfileChoice,
        /// Emit the full outcome as JSON instead of the text summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Collect and score a browser fingerprint without touching the network.
    Fingerprint {
        #[arg(long, value_enum, default_value_t = ProfileChoice::ChromeDesktop)]
        profile: ProfileChoice,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProfileChoice {
    ChromeDesktop,
    FirefoxHardened,
}

impl ProfileChoice {
    pub fn environment(self) -> StaticEnvironment {
        match self {
            ProfileChoice::ChromeDesktop => desktop_chrome::environment(),
            ProfileChoice::FirefoxHardened => hardened_firefox::environment(),
        }
    }
}
