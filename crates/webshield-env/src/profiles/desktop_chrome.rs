use super::{base, StaticEnvironment};
use crate::types::BatteryStatus;

/// A typical unhardened Chrome desktop: cookies and storage on, no tracker
/// defenses, WebRTC exposed.
pub fn environment() -> StaticEnvironment {
    let mut env = base(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0.0.0 Safari/537.36",
        "Win32",
        &["en-US", "en"],
    );
    env.battery = Ok(BatteryStatus {
        charging: true,
        level_percent: 87,
    });
    env
}
