//! Command-delivery boundary.
//!
//! The rule engine decides; an external channel delivers. Its retry and ack
//! semantics live behind this trait.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::action::DefenseAction;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("device {0} is not reachable")]
    Unreachable(String),
    #[error("channel rejected command {command}: {reason}")]
    Rejected { command: String, reason: String },
}

/// Enqueues delivery of one command to a remote device.
pub trait CommandDispatcher {
    fn dispatch(
        &self,
        device_id: &str,
        command: &str,
        payload: Option<&Value>,
    ) -> Result<(), DispatchError>;
}

/// Dispatch a computed action list to one device, isolating per-command
/// failures. Returns (sent, failed) counts.
pub fn dispatch_actions<D: CommandDispatcher>(
    dispatcher: &D,
    device_id: &str,
    actions: &[DefenseAction],
) -> (usize, usize) {
    let mut sent = 0;
    let mut failed = 0;
    for action in actions {
        match dispatcher.dispatch(device_id, &action.command, action.payload.as_ref()) {
            Ok(()) => sent += 1,
            Err(e) => {
                failed += 1;
                warn!(device_id, command = %action.command, error = %e, "dispatch failed");
            }
        }
    }
    (sent, failed)
}
