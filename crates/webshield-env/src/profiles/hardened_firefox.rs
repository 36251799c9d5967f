use super::{base, StaticEnvironment};
use crate::signal::ProbeError;
use crate::types::{DoNotTrack, PermissionKind, PermissionState};

/// A privacy-hardened Firefox desktop: do-not-track set, ad blocker active,
/// WebRTC disabled, camera and microphone denied.
pub fn environment() -> StaticEnvironment {
    let mut env = base(
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
        "Linux x86_64",
        &["en-GB", "en"],
    );
    env.do_not_track = Ok(DoNotTrack::Enabled);
    env.ad_blocked = true;
    env.webrtc = Ok(false);
    env.render_engine = Ok("Mesa - llvmpipe".to_string());
    env.battery = Err(ProbeError::Unsupported);
    env.permissions
        .insert(PermissionKind::Camera, Ok(PermissionState::Denied));
    env.permissions
        .insert(PermissionKind::Microphone, Ok(PermissionState::Denied));
    env.permissions
        .insert(PermissionKind::Geolocation, Ok(PermissionState::Denied));
    env
}
