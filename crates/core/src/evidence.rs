use serde::{Deserialize, Serialize};

use crate::category::ThreatCategory;
use crate::severity::Severity;

/// One captured incident artifact.
///
/// Created by the classification pipeline, read by the manifest builder and
/// the purge planner. `captured_at` is immutable once written; the only
/// delete path is the purge planner's execute step or an explicit manual
/// delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub id: String,
    pub child_id: String,
    pub child_name: String,
    /// Source platform, e.g. "discord", "instagram", "sms".
    pub platform: String,
    pub content: String,
    /// Storage reference for an attached image, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    pub category: ThreatCategory,
    pub severity: Severity,
    /// RFC 3339 capture timestamp.
    pub captured_at: String,
    pub ai_analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<String>,
    /// Classifier confidence, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

impl EvidenceRecord {
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EvidenceRecord {
        EvidenceRecord {
            id: "ev-1".to_string(),
            child_id: "child-1".to_string(),
            child_name: "Sam".to_string(),
            platform: "discord".to_string(),
            content: "message body".to_string(),
            image_ref: None,
            category: ThreatCategory::Bullying,
            severity: Severity::High,
            captured_at: "2025-06-01T10:00:00Z".to_string(),
            ai_analysis: "targeted insults from a peer".to_string(),
            action_taken: None,
            confidence: Some(91),
        }
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("image_ref").is_none());
        assert!(json.get("action_taken").is_none());
        assert_eq!(json["severity"], "HIGH");
        assert_eq!(json["category"], "BULLYING");
    }

    #[test]
    fn test_critical_check() {
        let mut record = sample();
        assert!(!record.is_critical());
        record.severity = Severity::Critical;
        assert!(record.is_critical());
    }
}
