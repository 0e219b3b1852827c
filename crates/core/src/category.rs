use serde::{Deserialize, Serialize};

/// Threat classification emitted by the upstream content classifier.
///
/// `Safe` is the sentinel for content that raised no concern; it still flows
/// through the rule engine so parents can be notified of reviewed items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatCategory {
    Safe,
    Bullying,
    Predator,
    SexualExploitation,
    SelfHarm,
    Blackmail,
    Scam,
    Violence,
    Tamper,
}

impl ThreatCategory {
    pub fn is_safe(self) -> bool {
        matches!(self, ThreatCategory::Safe)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThreatCategory::Safe => "SAFE",
            ThreatCategory::Bullying => "BULLYING",
            ThreatCategory::Predator => "PREDATOR",
            ThreatCategory::SexualExploitation => "SEXUAL_EXPLOITATION",
            ThreatCategory::SelfHarm => "SELF_HARM",
            ThreatCategory::Blackmail => "BLACKMAIL",
            ThreatCategory::Scam => "SCAM",
            ThreatCategory::Violence => "VIOLENCE",
            ThreatCategory::Tamper => "TAMPER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_labels_round_trip() {
        let c: ThreatCategory = serde_json::from_str("\"SEXUAL_EXPLOITATION\"").unwrap();
        assert_eq!(c, ThreatCategory::SexualExploitation);
        assert_eq!(
            serde_json::to_string(&ThreatCategory::SelfHarm).unwrap(),
            "\"SELF_HARM\""
        );
    }

    #[test]
    fn test_safe_sentinel() {
        assert!(ThreatCategory::Safe.is_safe());
        assert!(!ThreatCategory::Scam.is_safe());
    }
}
