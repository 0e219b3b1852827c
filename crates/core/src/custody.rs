use serde::{Deserialize, Serialize};

/// One immutable entry in a per-evidence custody hash chain.
///
/// `hash` covers a canonical serialization of every other field including
/// `prev_hash`; events are append-only and never mutated. The chain logic
/// that populates the two hash fields lives in the forensics crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustodyEvent {
    pub id: String,
    pub evidence_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<String>,
    /// Who or what performed the action ("system", "parent:p-17", ...).
    pub actor: String,
    /// Operation name, e.g. CAPTURE / EXPORT / VERIFY.
    pub action: String,
    /// Short category tag for the event, e.g. "capture", "export".
    pub event_key: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Hash of the previous event in the chain, or the genesis sentinel.
    pub prev_hash: String,
    /// SHA-256 content hash of this event (64 lowercase hex chars).
    pub hash: String,
}
