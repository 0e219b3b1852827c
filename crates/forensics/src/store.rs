//! Boundary contracts to the persistence layer.
//!
//! The engine computes; these collaborators durably store and fetch. None of
//! them are implemented here.

use serde_json::Value;
use thiserror::Error;

use guardian_core::CustodyEvent;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store rejected the operation: {0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only write sink for computed custody events.
pub trait CustodySink {
    fn append_custody_event(
        &mut self,
        account_id: &str,
        event: &CustodyEvent,
    ) -> Result<(), StoreError>;
}

/// Read-only access to the evidence, custody and audit collections for one
/// incident, returning plain store documents.
pub trait EvidenceSource {
    fn evidence_records(
        &self,
        parent_id: &str,
        incident_id: &str,
    ) -> Result<Vec<Value>, StoreError>;

    fn custody_events(&self, parent_id: &str, incident_id: &str)
        -> Result<Vec<Value>, StoreError>;

    fn command_audits(&self, parent_id: &str, incident_id: &str)
        -> Result<Vec<Value>, StoreError>;
}
