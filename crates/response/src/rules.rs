//! Defense rule engine.
//!
//! Maps a threat classification plus severity, overlaid with any configured
//! playbooks, into a ranked, deduplicated list of device commands. The
//! engine only decides; dispatching is the caller's concern. It never fails
//! for a valid (category, severity) pair: categories without a specific rule
//! set fall back to the notify-parent action alone.

use std::cmp::Reverse;
use std::collections::HashSet;

use serde_json::json;
use tracing::debug;

use guardian_core::{Severity, ThreatCategory};

use crate::action::{DefenseAction, Priority};
use crate::commands;
use crate::playbook::SafetyPlaybook;

/// Classifier confidence (percent) below which lock-class commands are
/// stripped. Low-confidence classifications must never autonomously lock a
/// child's device.
pub const AUTO_LOCK_MIN_CONFIDENCE: u8 = 70;

/// Severity weight at or above which bullying adds a soft device lock.
pub const SOFT_LOCK_MIN_WEIGHT: u8 = 3;

/// Per-evaluation options.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Master switch for automated lock-class escalation.
    pub allow_auto_lock: bool,
    /// Classifier confidence in percent, when available.
    pub confidence: Option<u8>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            allow_auto_lock: true,
            confidence: None,
        }
    }
}

/// Compute the ranked, deduplicated defense actions for one classification.
///
/// Playbook-derived actions are layered in front of the base rules; when two
/// actions share a command name the first one encountered wins, so playbooks
/// take precedence for the same command. After the lock-class safety valve,
/// the list is stably sorted by descending priority.
pub fn get_actions(
    category: ThreatCategory,
    severity: Severity,
    playbooks: &[SafetyPlaybook],
    options: &EngineOptions,
) -> Vec<DefenseAction> {
    let mut actions: Vec<DefenseAction> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for playbook in playbooks.iter().filter(|p| p.applies_to(category, severity)) {
        for entry in playbook.actions.iter().filter(|a| a.enabled) {
            let action = entry.to_defense_action(&playbook.id);
            if seen.insert(action.command.clone()) {
                actions.push(action);
            }
        }
    }

    for action in base_actions(category, severity) {
        if seen.insert(action.command.clone()) {
            actions.push(action);
        }
    }

    let lock_allowed = options.allow_auto_lock
        && options
            .confidence
            .map_or(true, |c| c >= AUTO_LOCK_MIN_CONFIDENCE);
    if !lock_allowed {
        actions.retain(|a| !commands::is_lock_class(&a.command));
        debug!(
            category = category.as_str(),
            confidence = options.confidence,
            "lock-class commands stripped from evaluation"
        );
    }

    // Stable: ties keep merge order, so playbook actions stay ahead of base
    // actions of equal priority.
    actions.sort_by_key(|a| Reverse(a.priority));

    debug!(
        category = category.as_str(),
        severity = severity.as_str(),
        count = actions.len(),
        "defense actions computed"
    );
    actions
}

/// Hand-authored base ruleset per threat category.
fn base_actions(category: ThreatCategory, severity: Severity) -> Vec<DefenseAction> {
    let mut out: Vec<DefenseAction> = match category {
        ThreatCategory::Predator | ThreatCategory::SexualExploitation => vec![
            emergency_lock(Priority::Critical),
            blackout(Priority::Critical),
            siren(Priority::High),
            screenshot(Priority::High),
            DefenseAction::new(
                "base-walkie-talkie",
                "Enable walkie-talkie",
                commands::WALKIE_TALKIE_ENABLE,
                None,
                Priority::High,
            ),
        ],
        ThreatCategory::SelfHarm | ThreatCategory::Blackmail => vec![
            emergency_lock(Priority::Critical),
            blackout(Priority::Critical),
            screenshot(Priority::Critical),
        ],
        ThreatCategory::Bullying => {
            let mut actions = vec![screenshot(Priority::High)];
            if severity.weight() >= SOFT_LOCK_MIN_WEIGHT {
                actions.push(DefenseAction::new(
                    "base-lock-soft",
                    "Soft device lock",
                    commands::LOCK_DEVICE,
                    Some(json!({ "mode": "soft" })),
                    Priority::High,
                ));
            }
            actions
        }
        ThreatCategory::Scam => vec![
            DefenseAction::new(
                "base-cut-internet",
                "Cut internet access",
                commands::CUT_INTERNET,
                None,
                Priority::High,
            ),
            screenshot(Priority::Medium),
        ],
        ThreatCategory::Violence => vec![
            emergency_lock(Priority::Critical),
            siren(Priority::High),
            screenshot(Priority::High),
        ],
        ThreatCategory::Tamper => vec![
            emergency_lock(Priority::High),
            DefenseAction::new(
                "base-cut-internet",
                "Cut internet access",
                commands::CUT_INTERNET,
                None,
                Priority::High,
            ),
            screenshot(Priority::Medium),
        ],
        ThreatCategory::Safe => Vec::new(),
    };

    out.push(DefenseAction::new(
        "base-notify-parent",
        "Notify parents",
        commands::NOTIFY_PARENT,
        None,
        Priority::Medium,
    ));
    out
}

fn emergency_lock(priority: Priority) -> DefenseAction {
    DefenseAction::new(
        "base-lock-emergency",
        "Emergency device lock",
        commands::LOCK_DEVICE,
        Some(json!({ "mode": "emergency" })),
        priority,
    )
}

fn blackout(priority: Priority) -> DefenseAction {
    DefenseAction::new(
        "base-lockscreen-blackout",
        "Black out lockscreen",
        commands::LOCKSCREEN_BLACKOUT,
        None,
        priority,
    )
}

fn siren(priority: Priority) -> DefenseAction {
    DefenseAction::new("base-siren", "Sound siren", commands::SIREN, None, priority)
}

fn screenshot(priority: Priority) -> DefenseAction {
    DefenseAction::new(
        "base-screenshot",
        "Capture screenshot",
        commands::SCREENSHOT_CAPTURE,
        None,
        priority,
    )
}
