//! Canonical device command names.
//!
//! Every command string sent over the device channel is defined here
//! exclusively, so the rule engine, playbook mapping and dispatch audit all
//! agree on spelling.

pub const LOCK_DEVICE: &str = "lockDevice";
pub const LOCKSCREEN_BLACKOUT: &str = "lockscreenBlackout";
pub const SIREN: &str = "siren";
pub const SCREENSHOT_CAPTURE: &str = "screenshotCapture";
pub const WALKIE_TALKIE_ENABLE: &str = "walkieTalkieEnable";
pub const LIVE_CAMERA_REQUEST: &str = "liveCameraRequest";
pub const BLOCK_APP: &str = "blockApp";
pub const CUT_INTERNET: &str = "cutInternet";
pub const QUARANTINE_NET: &str = "quarantineNet";
pub const DISABLE_HARDWARE: &str = "disableHardware";
pub const NOTIFY_PARENT: &str = "notifyParent";

/// Commands that escalate by locking the child out of the device. Subject to
/// the automated-escalation safety valve in the rule engine.
pub const LOCK_CLASS_COMMANDS: [&str; 2] = [LOCK_DEVICE, LOCKSCREEN_BLACKOUT];

/// All valid command names (for validation).
pub fn all_commands() -> Vec<&'static str> {
    vec![
        LOCK_DEVICE,
        LOCKSCREEN_BLACKOUT,
        SIREN,
        SCREENSHOT_CAPTURE,
        WALKIE_TALKIE_ENABLE,
        LIVE_CAMERA_REQUEST,
        BLOCK_APP,
        CUT_INTERNET,
        QUARANTINE_NET,
        DISABLE_HARDWARE,
        NOTIFY_PARENT,
    ]
}

pub fn is_lock_class(command: &str) -> bool {
    LOCK_CLASS_COMMANDS.contains(&command)
}
