//! Playbook configuration loading.
//!
//! Playbooks are YAML or JSON lists read from a configuration directory
//! before each rule-engine evaluation. File order is sorted so evaluation
//! order is deterministic across hosts. When the store has nothing to offer,
//! callers fall back to [`crate::playbook::default_playbooks`].

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::playbook::{default_playbooks, SafetyPlaybook};

/// Overrides the playbook directory when set.
pub const PLAYBOOK_DIR_ENV: &str = "GUARDIAN_PLAYBOOK_DIR";

/// Resolve the playbook directory: env override first, else
/// `<root>/playbooks`.
pub fn playbook_dir(root: &Path) -> PathBuf {
    if let Ok(override_dir) = env::var(PLAYBOOK_DIR_ENV) {
        let path = PathBuf::from(override_dir);
        if path.is_dir() {
            return path;
        }
    }
    root.join("playbooks")
}

/// Load every playbook file under the configuration root.
///
/// Each `.yaml`/`.yml`/`.json` file holds a list of playbooks; files are
/// read in sorted path order. A missing directory yields an empty list;
/// unreadable or unparsable files are hard errors.
pub fn load_playbooks(root: &Path) -> Result<Vec<SafetyPlaybook>> {
    let dir = playbook_dir(root);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(&dir)
        .with_context(|| format!("failed to read playbook directory {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") | Some("json") => paths.push(path),
            _ => {}
        }
    }
    paths.sort();

    let mut playbooks = Vec::new();
    for path in paths {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read playbook file {}", path.display()))?;
        let mut parsed: Vec<SafetyPlaybook> = parse_playbook_file(&path, &content)?;
        playbooks.append(&mut parsed);
    }

    info!(count = playbooks.len(), dir = %dir.display(), "loaded playbooks");
    Ok(playbooks)
}

/// Load configured playbooks, falling back to the built-in defaults when the
/// store is empty.
pub fn load_playbooks_or_default(root: &Path) -> Result<Vec<SafetyPlaybook>> {
    let playbooks = load_playbooks(root)?;
    if playbooks.is_empty() {
        info!("playbook store empty, using built-in defaults");
        return Ok(default_playbooks());
    }
    Ok(playbooks)
}

fn parse_playbook_file(path: &Path, content: &str) -> Result<Vec<SafetyPlaybook>> {
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    if is_json {
        serde_json::from_str(content)
            .with_context(|| format!("failed to parse playbook file {}", path.display()))
    } else {
        serde_yaml::from_str(content)
            .with_context(|| format!("failed to parse playbook file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const YAML_PLAYBOOK: &str = r#"
- id: org-bullying-blackout
  name: Bullying blackout
  category: BULLYING
  min_severity: HIGH
  enabled: true
  actions:
    - action_type: LOCKSCREEN_BLACKOUT
    - action_type: NOTIFY_PARENTS
"#;

    const JSON_PLAYBOOK: &str = r#"[
  {
    "id": "org-scam-quarantine",
    "name": "Scam quarantine",
    "category": "SCAM",
    "min_severity": "MEDIUM",
    "actions": [{ "action_type": "QUARANTINE_NET" }]
  }
]"#;

    #[test]
    fn test_loads_yaml_and_json_sorted() {
        let tempdir = TempDir::new().unwrap();
        let dir = tempdir.path().join("playbooks");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("b_scam.json"), JSON_PLAYBOOK).unwrap();
        fs::write(dir.join("a_bullying.yaml"), YAML_PLAYBOOK).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let playbooks = load_playbooks(tempdir.path()).unwrap();
        assert_eq!(playbooks.len(), 2);
        assert_eq!(playbooks[0].id, "org-bullying-blackout");
        assert_eq!(playbooks[1].id, "org-scam-quarantine");
        assert!(playbooks[1].enabled, "enabled defaults to true");
    }

    #[test]
    fn test_missing_directory_is_empty_not_error() {
        let tempdir = TempDir::new().unwrap();
        let playbooks = load_playbooks(tempdir.path()).unwrap();
        assert!(playbooks.is_empty());
    }

    #[test]
    fn test_empty_store_falls_back_to_defaults() {
        let tempdir = TempDir::new().unwrap();
        let playbooks = load_playbooks_or_default(tempdir.path()).unwrap();
        assert!(!playbooks.is_empty());
        assert!(playbooks.iter().any(|p| p.id == "default-predator-response"));
    }

    #[test]
    fn test_malformed_file_is_a_hard_error() {
        let tempdir = TempDir::new().unwrap();
        let dir = tempdir.path().join("playbooks");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("broken.json"), "{ not json").unwrap();

        assert!(load_playbooks(tempdir.path()).is_err());
    }
}
