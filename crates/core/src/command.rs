use serde::{Deserialize, Serialize};

/// Delivery state of a device command.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Queued,
    Acked,
    Done,
    Failed,
}

impl CommandStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, CommandStatus::Done | CommandStatus::Failed)
    }
}

/// Audit record of one command issued to a device and its outcome.
///
/// Read-only input to the export manifest builder; the write path (queuing
/// and status transitions) belongs to the command-dispatch layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCommandAudit {
    pub id: String,
    pub device_id: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC 3339 queue timestamp.
    pub created_at: String,
}
