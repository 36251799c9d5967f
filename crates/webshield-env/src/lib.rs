pub mod environment;
pub mod profiles;
pub mod signal;
pub mod types;

pub use environment::{AdBait, Environment};
pub use signal::{ProbeError, ProbeResult, Signal};
pub use types::{
    BatteryStatus, ConnectionHint, DoNotTrack, FingerprintSignals, PermissionKind,
    PermissionState, ScreenInfo,
};
