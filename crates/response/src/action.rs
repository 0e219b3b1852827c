use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dispatch priority of a defense action.
///
/// Declaration order defines the total order (`Low < Medium < High <
/// Critical`); ranking never compares the string labels.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        }
    }
}

/// One candidate device command produced by the rule engine.
///
/// Computed fresh on every evaluation and never persisted here; the decision
/// to execute is what lands in the command audit log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefenseAction {
    pub id: String,
    /// Human-readable label for the console UI.
    pub label: String,
    /// Wire command name, see [`crate::commands`].
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub priority: Priority,
}

impl DefenseAction {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        command: impl Into<String>,
        payload: Option<Value>,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            command: command.into(),
            payload,
            priority,
        }
    }
}
