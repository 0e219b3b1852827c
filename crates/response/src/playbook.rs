//! Organization-defined safety playbooks.
//!
//! A playbook augments the built-in defense rules for one threat category
//! once a minimum severity is reached. Playbook actions are abstract types;
//! the mapping to a concrete command, payload and priority lives here so the
//! device channel only ever sees canonical command names.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use guardian_core::{Severity, ThreatCategory};

use crate::action::{DefenseAction, Priority};
use crate::commands;

/// Abstract playbook action type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybookActionType {
    LockDevice,
    LockscreenBlackout,
    WalkieTalkieEnable,
    LiveCameraRequest,
    ScreenshotCapture,
    BlockApp,
    Siren,
    QuarantineNet,
    DisableHardware,
    NotifyParents,
}

impl PlaybookActionType {
    /// Map to a concrete device command, default payload and priority.
    fn mapping(self) -> (&'static str, &'static str, Option<Value>, Priority) {
        match self {
            PlaybookActionType::LockDevice => (
                commands::LOCK_DEVICE,
                "Lock device",
                Some(json!({ "mode": "emergency" })),
                Priority::Critical,
            ),
            PlaybookActionType::LockscreenBlackout => (
                commands::LOCKSCREEN_BLACKOUT,
                "Black out lockscreen",
                None,
                Priority::Critical,
            ),
            PlaybookActionType::WalkieTalkieEnable => (
                commands::WALKIE_TALKIE_ENABLE,
                "Enable walkie-talkie",
                None,
                Priority::High,
            ),
            PlaybookActionType::LiveCameraRequest => (
                commands::LIVE_CAMERA_REQUEST,
                "Request live camera",
                None,
                Priority::High,
            ),
            PlaybookActionType::ScreenshotCapture => (
                commands::SCREENSHOT_CAPTURE,
                "Capture screenshot",
                None,
                Priority::High,
            ),
            PlaybookActionType::BlockApp => {
                (commands::BLOCK_APP, "Block app", None, Priority::High)
            }
            PlaybookActionType::Siren => (commands::SIREN, "Sound siren", None, Priority::High),
            PlaybookActionType::QuarantineNet => (
                commands::QUARANTINE_NET,
                "Quarantine network",
                None,
                Priority::High,
            ),
            PlaybookActionType::DisableHardware => (
                commands::DISABLE_HARDWARE,
                "Disable hardware",
                None,
                Priority::High,
            ),
            PlaybookActionType::NotifyParents => (
                commands::NOTIFY_PARENT,
                "Notify parents",
                None,
                Priority::Medium,
            ),
        }
    }
}

/// One configured action inside a playbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookAction {
    pub action_type: PlaybookActionType,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Optional payload override, e.g. the app to block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl PlaybookAction {
    pub fn new(action_type: PlaybookActionType) -> Self {
        Self {
            action_type,
            enabled: true,
            payload: None,
        }
    }

    /// Concrete defense action for this configured entry.
    pub fn to_defense_action(&self, playbook_id: &str) -> DefenseAction {
        let (command, label, default_payload, priority) = self.action_type.mapping();
        DefenseAction::new(
            format!("pb-{playbook_id}-{command}"),
            label,
            command,
            self.payload.clone().or(default_payload),
            priority,
        )
    }
}

/// Organization-defined rule: category + minimum severity + action list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyPlaybook {
    pub id: String,
    pub name: String,
    pub category: ThreatCategory,
    pub min_severity: Severity,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub actions: Vec<PlaybookAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SafetyPlaybook {
    /// Whether this playbook contributes to an evaluation.
    pub fn applies_to(&self, category: ThreatCategory, severity: Severity) -> bool {
        self.enabled
            && self.category == category
            && self.min_severity.weight() <= severity.weight()
    }
}

fn default_true() -> bool {
    true
}

/// Built-in fallback playbooks used when the configuration store is empty.
///
/// Explicit pure function; callers pass the result in like any other
/// playbook list.
pub fn default_playbooks() -> Vec<SafetyPlaybook> {
    vec![
        SafetyPlaybook {
            id: "default-predator-response".to_string(),
            name: "Predator contact response".to_string(),
            category: ThreatCategory::Predator,
            min_severity: Severity::High,
            enabled: true,
            actions: vec![
                PlaybookAction::new(PlaybookActionType::LiveCameraRequest),
                PlaybookAction::new(PlaybookActionType::WalkieTalkieEnable),
                PlaybookAction::new(PlaybookActionType::NotifyParents),
            ],
            description: Some("Open a live channel to the device on predator contact".to_string()),
        },
        SafetyPlaybook {
            id: "default-selfharm-response".to_string(),
            name: "Self-harm escalation".to_string(),
            category: ThreatCategory::SelfHarm,
            min_severity: Severity::High,
            enabled: true,
            actions: vec![
                PlaybookAction::new(PlaybookActionType::ScreenshotCapture),
                PlaybookAction::new(PlaybookActionType::NotifyParents),
            ],
            description: None,
        },
        SafetyPlaybook {
            id: "default-tamper-response".to_string(),
            name: "Device tamper containment".to_string(),
            category: ThreatCategory::Tamper,
            min_severity: Severity::Medium,
            enabled: true,
            actions: vec![
                PlaybookAction::new(PlaybookActionType::QuarantineNet),
                PlaybookAction::new(PlaybookActionType::NotifyParents),
            ],
            description: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_requires_enabled_category_and_severity() {
        let mut pb = SafetyPlaybook {
            id: "pb-1".to_string(),
            name: "test".to_string(),
            category: ThreatCategory::Bullying,
            min_severity: Severity::High,
            enabled: true,
            actions: vec![],
            description: None,
        };

        assert!(pb.applies_to(ThreatCategory::Bullying, Severity::High));
        assert!(pb.applies_to(ThreatCategory::Bullying, Severity::Critical));
        assert!(!pb.applies_to(ThreatCategory::Bullying, Severity::Medium));
        assert!(!pb.applies_to(ThreatCategory::Scam, Severity::Critical));

        pb.enabled = false;
        assert!(!pb.applies_to(ThreatCategory::Bullying, Severity::Critical));
    }

    #[test]
    fn test_payload_override_wins() {
        let mut action = PlaybookAction::new(PlaybookActionType::BlockApp);
        action.payload = Some(json!({ "app": "chat.example" }));
        let concrete = action.to_defense_action("pb-9");
        assert_eq!(concrete.command, commands::BLOCK_APP);
        assert_eq!(concrete.payload.unwrap()["app"], "chat.example");
        assert_eq!(concrete.id, "pb-pb-9-blockApp");
    }

    #[test]
    fn test_defaults_are_enabled_and_well_formed() {
        for pb in default_playbooks() {
            assert!(pb.enabled);
            assert!(!pb.actions.is_empty());
            assert!(pb.actions.iter().all(|a| a.enabled));
        }
    }

    #[test]
    fn test_config_labels_round_trip() {
        let yaml_equiv = r#"{"action_type":"LOCKSCREEN_BLACKOUT"}"#;
        let action: PlaybookAction = serde_json::from_str(yaml_equiv).unwrap();
        assert_eq!(action.action_type, PlaybookActionType::LockscreenBlackout);
        assert!(action.enabled, "enabled defaults to true");
    }
}
