//! Hash-chained custody ledger.
//!
//! Every custody event carries the hash of its predecessor and a SHA-256
//! content hash over a canonical serialization of its own fields. Tampering
//! with any field of any historical event, or reordering events, breaks
//! either the content hash or the link hash at that position. There is no
//! repair operation: a broken chain is a terminal finding for the operator.

use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use guardian_core::CustodyEvent;

use crate::hash::sha256_canonical;

/// `prev_hash` of the first event in a chain. Contains non-hex characters,
/// so it can never collide with a legitimate SHA-256 digest.
pub const GENESIS_BLOCK: &str = "GENESIS_BLOCK";

// ── Draft ───────────────────────────────────────────────────────────────────

/// Input to [`append_event`]: a custody event minus its two hash fields.
#[derive(Debug, Clone)]
pub struct CustodyDraft {
    pub id: String,
    pub evidence_id: String,
    pub incident_id: Option<String>,
    pub actor: String,
    pub action: String,
    pub event_key: String,
    pub created_at: String,
    pub event_data: Option<Value>,
    pub reason: Option<String>,
}

impl CustodyDraft {
    /// New draft with a freshly minted id and the current time.
    pub fn new(
        evidence_id: impl Into<String>,
        actor: impl Into<String>,
        action: impl Into<String>,
        event_key: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            evidence_id: evidence_id.into(),
            incident_id: None,
            actor: actor.into(),
            action: action.into(),
            event_key: event_key.into(),
            created_at: Utc::now().to_rfc3339(),
            event_data: None,
            reason: None,
        }
    }

    pub fn with_incident(mut self, incident_id: impl Into<String>) -> Self {
        self.incident_id = Some(incident_id.into());
        self
    }

    pub fn with_event_data(mut self, data: Value) -> Self {
        self.event_data = Some(data);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

// ── Append ──────────────────────────────────────────────────────────────────

/// Complete a draft into a chained custody event.
///
/// `prev_hash` becomes the previous event's hash, or [`GENESIS_BLOCK`] when
/// this is the first event of a chain. Storage is the caller's concern; see
/// [`crate::store::CustodySink`].
pub fn append_event(prev: Option<&CustodyEvent>, draft: CustodyDraft) -> CustodyEvent {
    let prev_hash = prev
        .map(|e| e.hash.clone())
        .unwrap_or_else(|| GENESIS_BLOCK.to_string());

    let mut event = CustodyEvent {
        id: draft.id,
        evidence_id: draft.evidence_id,
        incident_id: draft.incident_id,
        actor: draft.actor,
        action: draft.action,
        event_key: draft.event_key,
        created_at: draft.created_at,
        event_data: draft.event_data,
        reason: draft.reason,
        prev_hash,
        hash: String::new(),
    };
    event.hash = content_hash(&event);
    event
}

/// Canonical content hash over every field except `hash` itself.
fn content_hash(event: &CustodyEvent) -> String {
    let payload = json!({
        "id": event.id,
        "evidence_id": event.evidence_id,
        "incident_id": event.incident_id,
        "actor": event.actor,
        "action": event.action,
        "event_key": event.event_key,
        "created_at": event.created_at,
        "event_data": event.event_data,
        "reason": event.reason,
        "prev_hash": event.prev_hash,
    });
    sha256_canonical(&payload)
}

// ── Verify ──────────────────────────────────────────────────────────────────

/// Outcome of a chain verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainVerification {
    Intact,
    /// `events[index].prev_hash` does not match its predecessor (or genesis).
    LinkMismatch {
        index: usize,
        expected: String,
        stored: String,
    },
    /// `events[index].hash` does not match the recomputed content hash.
    ContentMismatch {
        index: usize,
        expected: String,
        stored: String,
    },
}

impl ChainVerification {
    pub fn is_intact(&self) -> bool {
        matches!(self, ChainVerification::Intact)
    }
}

/// Verify a custody chain in the order the caller asserts is chronological.
///
/// Vacuously intact for an empty slice. Does not sort by timestamp and
/// performs no I/O; re-runnable on any asserted ordering.
pub fn verify_chain_detailed(events: &[CustodyEvent]) -> ChainVerification {
    for (index, event) in events.iter().enumerate() {
        let expected_prev = if index == 0 {
            GENESIS_BLOCK.to_string()
        } else {
            events[index - 1].hash.clone()
        };
        if event.prev_hash != expected_prev {
            return ChainVerification::LinkMismatch {
                index,
                expected: expected_prev,
                stored: event.prev_hash.clone(),
            };
        }

        let expected_hash = content_hash(event);
        if event.hash != expected_hash {
            return ChainVerification::ContentMismatch {
                index,
                expected: expected_hash,
                stored: event.hash.clone(),
            };
        }
    }
    ChainVerification::Intact
}

/// Boolean form of [`verify_chain_detailed`]. `false` means "do not trust
/// this evidence chain"; callers must escalate, never auto-repair.
pub fn verify_chain(events: &[CustodyEvent]) -> bool {
    match verify_chain_detailed(events) {
        ChainVerification::Intact => true,
        ChainVerification::LinkMismatch { index, .. } => {
            warn!(index, "custody chain link hash mismatch");
            false
        }
        ChainVerification::ContentMismatch { index, .. } => {
            warn!(index, "custody chain content hash mismatch");
            false
        }
    }
}

// ── Ledger ──────────────────────────────────────────────────────────────────

/// Convenience wrapper that tracks the chain tail so callers can append
/// sequentially without threading the previous event by hand.
#[derive(Debug, Default)]
pub struct CustodyLedger {
    tail: Option<CustodyEvent>,
}

impl CustodyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a persisted chain tail.
    pub fn resume(tail: Option<CustodyEvent>) -> Self {
        Self { tail }
    }

    pub fn append(&mut self, draft: CustodyDraft) -> CustodyEvent {
        let event = append_event(self.tail.as_ref(), draft);
        self.tail = Some(event.clone());
        event
    }

    pub fn tail(&self) -> Option<&CustodyEvent> {
        self.tail.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(n: u32) -> CustodyDraft {
        CustodyDraft {
            id: format!("cust-{n}"),
            evidence_id: "ev-1".to_string(),
            incident_id: Some("inc-1".to_string()),
            actor: "system".to_string(),
            action: "CAPTURE".to_string(),
            event_key: "capture".to_string(),
            created_at: format!("2025-06-01T10:00:0{n}Z"),
            event_data: None,
            reason: None,
        }
    }

    #[test]
    fn test_genesis_event_links_to_sentinel() {
        let event = append_event(None, draft(0));
        assert_eq!(event.prev_hash, GENESIS_BLOCK);
        assert_eq!(event.hash.len(), 64);
    }

    #[test]
    fn test_append_links_to_previous_hash() {
        let first = append_event(None, draft(0));
        let second = append_event(Some(&first), draft(1));
        assert_eq!(second.prev_hash, first.hash);
        assert_ne!(second.hash, first.hash);
    }

    #[test]
    fn test_same_draft_same_hash() {
        let a = append_event(None, draft(0));
        let b = append_event(None, draft(0));
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn test_ledger_tracks_tail() {
        let mut ledger = CustodyLedger::new();
        let first = ledger.append(draft(0));
        let second = ledger.append(draft(1));
        assert_eq!(second.prev_hash, first.hash);
        assert_eq!(ledger.tail().unwrap().id, "cust-1");
        assert!(verify_chain(&[first, second]));
    }

    #[test]
    fn test_draft_builder_mints_id_and_timestamp() {
        let d = CustodyDraft::new("ev-9", "parent:p-1", "EXPORT", "export")
            .with_incident("inc-9")
            .with_reason("court order");
        assert!(!d.id.is_empty());
        assert!(d.created_at.contains('T'));
        assert_eq!(d.incident_id.as_deref(), Some("inc-9"));
        assert_eq!(d.reason.as_deref(), Some("court order"));
    }
}
