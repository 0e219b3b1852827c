//! Evidence-package manifest builder.
//!
//! Snapshots one incident's evidence records, custody events and command
//! audits into a hashed, countable manifest for legal export. Building the
//! manifest twice from the same collections yields identical hashes
//! regardless of input ordering; a downstream verifier relies on that to
//! confirm a downloaded package has not been altered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use guardian_core::time::record_timestamp_ms;

use crate::canonical::canonicalize;
use crate::hash::{sha256_canonical, sha256_hex};
use crate::store::{EvidenceSource, StoreError};

/// Point-in-time hashed snapshot of one incident's evidence.
///
/// `package_sha256` is a pure function of the three collection hashes plus
/// the identifying fields, never of raw content directly, so a verifier that
/// already trusts the sub-hashes can re-derive it without re-reading the
/// underlying sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForensicExportManifest {
    pub parent_id: String,
    pub incident_id: String,
    pub exported_by: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    pub record_count: usize,
    pub custody_count: usize,
    pub audit_count: usize,
    pub records_sha256: String,
    pub custody_sha256: String,
    pub audits_sha256: String,
    pub package_sha256: String,
}

/// Build the manifest for one incident.
///
/// Each collection is independently re-sorted into chronological order via
/// the shared timestamp normalization (unparsable timestamps sort earliest)
/// before hashing, so caller-side ordering is irrelevant. Purely
/// computational; no side effects beyond the hash primitive.
pub fn build_manifest(
    parent_id: &str,
    incident_id: &str,
    exported_by: &str,
    records: &[Value],
    custody: &[Value],
    audits: &[Value],
    generated_at: DateTime<Utc>,
) -> ForensicExportManifest {
    let records_sha256 = collection_sha256(records);
    let custody_sha256 = collection_sha256(custody);
    let audits_sha256 = collection_sha256(audits);

    let generated_at = generated_at.to_rfc3339();
    let package_sha256 = sha256_canonical(&json!({
        "parent_id": parent_id,
        "incident_id": incident_id,
        "exported_by": exported_by,
        "generated_at": generated_at,
        "records_sha256": records_sha256,
        "custody_sha256": custody_sha256,
        "audits_sha256": audits_sha256,
    }));

    info!(
        incident_id,
        records = records.len(),
        custody = custody.len(),
        audits = audits.len(),
        package = %package_sha256,
        "built forensic export manifest"
    );

    ForensicExportManifest {
        parent_id: parent_id.to_string(),
        incident_id: incident_id.to_string(),
        exported_by: exported_by.to_string(),
        generated_at,
        record_count: records.len(),
        custody_count: custody.len(),
        audit_count: audits.len(),
        records_sha256,
        custody_sha256,
        audits_sha256,
        package_sha256,
    }
}

/// [`build_manifest`] stamped with the current time.
pub fn build_manifest_now(
    parent_id: &str,
    incident_id: &str,
    exported_by: &str,
    records: &[Value],
    custody: &[Value],
    audits: &[Value],
) -> ForensicExportManifest {
    build_manifest(
        parent_id,
        incident_id,
        exported_by,
        records,
        custody,
        audits,
        Utc::now(),
    )
}

/// Fetch an incident's collections from a store and build its manifest.
pub fn build_manifest_from_source<S: EvidenceSource>(
    source: &S,
    parent_id: &str,
    incident_id: &str,
    exported_by: &str,
    generated_at: DateTime<Utc>,
) -> Result<ForensicExportManifest, StoreError> {
    let records = source.evidence_records(parent_id, incident_id)?;
    let custody = source.custody_events(parent_id, incident_id)?;
    let audits = source.command_audits(parent_id, incident_id)?;
    Ok(build_manifest(
        parent_id,
        incident_id,
        exported_by,
        &records,
        &custody,
        &audits,
        generated_at,
    ))
}

/// Hash one collection in chronological order.
fn collection_sha256(collection: &[Value]) -> String {
    let mut ordered: Vec<&Value> = collection.iter().collect();
    ordered.sort_by_key(|record| record_timestamp_ms(record));

    let mut body = String::from("[");
    for (i, record) in ordered.iter().enumerate() {
        if i > 0 {
            body.push(',');
        }
        body.push_str(&canonicalize(record));
    }
    body.push(']');
    sha256_hex(body.as_bytes())
}
