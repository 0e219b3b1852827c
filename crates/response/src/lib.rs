//! Guardian defense-action rule engine.
//!
//! Turns a threat classification into a ranked, deduplicated set of device
//! commands:
//!
//! - [`rules`]: base ruleset, playbook overlay, dedupe, safety valve, rank
//! - [`playbook`]: organization-defined playbooks and built-in defaults
//! - [`playbook_store`]: configuration directory loading
//! - [`commands`]: canonical device command names
//! - [`dispatch`]: delivery boundary trait

pub mod action;
pub mod commands;
pub mod dispatch;
pub mod playbook;
pub mod playbook_store;
pub mod rules;

pub use action::{DefenseAction, Priority};
pub use dispatch::{dispatch_actions, CommandDispatcher, DispatchError};
pub use playbook::{default_playbooks, PlaybookAction, PlaybookActionType, SafetyPlaybook};
pub use playbook_store::{load_playbooks, load_playbooks_or_default, PLAYBOOK_DIR_ENV};
pub use rules::{get_actions, EngineOptions, AUTO_LOCK_MIN_CONFIDENCE, SOFT_LOCK_MIN_WEIGHT};
