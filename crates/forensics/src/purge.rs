//! Retention / purge planner.
//!
//! Planning is pure: it partitions evidence records into delete-eligible and
//! protected under a retention policy. Execution is effectful and separate,
//! so a caller can always preview a plan before committing deletions. The
//! split is deliberate and must be preserved.

use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use guardian_core::time::parse_timestamp_ms;
use guardian_core::{EvidenceRecord, Severity};

pub const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Error)]
pub enum PurgeError {
    #[error("invalid purge policy: {0}")]
    InvalidPolicy(String),
    #[error("malformed purge plan: {0}")]
    MalformedPlan(String),
}

/// Configurable retention policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgePolicy {
    /// Retention window in days; must be at least 1.
    pub retention_days: u32,
    /// Exempt CRITICAL-severity records from deletion.
    #[serde(default)]
    pub keep_critical: bool,
    /// Record ids under legal hold; never deleted regardless of age.
    #[serde(default)]
    pub legal_hold_ids: HashSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurgeSummary {
    pub delete_count: usize,
    pub keep_count: usize,
    /// RFC 3339 cutoff; records captured before this are past retention.
    pub cutoff: String,
}

/// Partition of the evidence set under one policy evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgePlan {
    pub to_delete: Vec<EvidenceRecord>,
    pub to_keep: Vec<EvidenceRecord>,
    pub summary: PurgeSummary,
}

/// Aggregate outcome of executing a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PurgeOutcome {
    pub deleted: usize,
    pub failed: usize,
}

/// Build a purge plan. Pure; deletes nothing.
///
/// A record is delete-eligible iff its capture timestamp precedes the cutoff
/// AND it is not legal-held AND it is not protected as CRITICAL. Unparsable
/// timestamps normalize to epoch 0, which is before any realistic cutoff, so
/// such records are delete-eligible unless otherwise protected. That
/// fallback replicates long-standing production behavior; changing it would
/// silently alter retention outcomes.
pub fn build_plan(
    records: &[EvidenceRecord],
    policy: &PurgePolicy,
    now: DateTime<Utc>,
) -> Result<PurgePlan, PurgeError> {
    if policy.retention_days < 1 {
        return Err(PurgeError::InvalidPolicy(
            "retention_days must be at least 1".to_string(),
        ));
    }

    let cutoff_ms = now.timestamp_millis() - i64::from(policy.retention_days) * MS_PER_DAY;
    let cutoff = DateTime::<Utc>::from_timestamp_millis(cutoff_ms)
        .ok_or_else(|| PurgeError::InvalidPolicy("retention window out of range".to_string()))?
        .to_rfc3339();

    let mut to_delete = Vec::new();
    let mut to_keep = Vec::new();
    for record in records {
        let past_retention = parse_timestamp_ms(&record.captured_at) < cutoff_ms;
        let held = policy.legal_hold_ids.contains(&record.id);
        let protected_severity = policy.keep_critical && record.severity == Severity::Critical;

        if past_retention && !held && !protected_severity {
            to_delete.push(record.clone());
        } else {
            to_keep.push(record.clone());
        }
    }

    let summary = PurgeSummary {
        delete_count: to_delete.len(),
        keep_count: to_keep.len(),
        cutoff,
    };
    info!(
        delete_count = summary.delete_count,
        keep_count = summary.keep_count,
        cutoff = %summary.cutoff,
        "built purge plan"
    );

    Ok(PurgePlan {
        to_delete,
        to_keep,
        summary,
    })
}

/// Execute a previously approved plan through the injected deletion
/// collaborator.
///
/// Deletions run sequentially; each failure is caught, logged and counted
/// without aborting the remainder. No retries happen here; retry policy
/// belongs to the caller. Only invoke after a human or policy gate has
/// approved the plan.
pub async fn execute_plan<F, Fut, E>(
    plan: &PurgePlan,
    mut delete_by_id: F,
) -> Result<PurgeOutcome, PurgeError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    if plan.summary.delete_count != plan.to_delete.len()
        || plan.summary.keep_count != plan.to_keep.len()
    {
        return Err(PurgeError::MalformedPlan(
            "summary counts do not match partitions".to_string(),
        ));
    }

    let mut outcome = PurgeOutcome::default();
    for record in &plan.to_delete {
        match delete_by_id(record.id.clone()).await {
            Ok(()) => outcome.deleted += 1,
            Err(e) => {
                outcome.failed += 1;
                warn!(record_id = %record.id, error = %e, "evidence deletion failed");
            }
        }
    }

    info!(
        deleted = outcome.deleted,
        failed = outcome.failed,
        "purge plan executed"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_core::ThreatCategory;

    fn record(id: &str, captured_at: &str, severity: Severity) -> EvidenceRecord {
        EvidenceRecord {
            id: id.to_string(),
            child_id: "child-1".to_string(),
            child_name: "Sam".to_string(),
            platform: "sms".to_string(),
            content: "content".to_string(),
            image_ref: None,
            category: ThreatCategory::Scam,
            severity,
            captured_at: captured_at.to_string(),
            ai_analysis: String::new(),
            action_taken: None,
            confidence: None,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-07-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_zero_retention_days_rejected() {
        let policy = PurgePolicy {
            retention_days: 0,
            keep_critical: false,
            legal_hold_ids: HashSet::new(),
        };
        let err = build_plan(&[], &policy, now());
        assert!(matches!(err, Err(PurgeError::InvalidPolicy(_))));
    }

    #[test]
    fn test_cutoff_is_rfc3339() {
        let policy = PurgePolicy {
            retention_days: 30,
            keep_critical: false,
            legal_hold_ids: HashSet::new(),
        };
        let plan = build_plan(&[], &policy, now()).unwrap();
        assert_eq!(plan.summary.cutoff, "2025-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_unparsable_timestamp_is_delete_eligible() {
        let policy = PurgePolicy {
            retention_days: 30,
            keep_critical: false,
            legal_hold_ids: HashSet::new(),
        };
        let records = vec![record("garbled", "not a timestamp", Severity::Low)];
        let plan = build_plan(&records, &policy, now()).unwrap();
        assert_eq!(plan.summary.delete_count, 1);
        assert_eq!(plan.to_delete[0].id, "garbled");
    }

    #[test]
    fn test_unparsable_timestamp_still_respects_legal_hold() {
        let policy = PurgePolicy {
            retention_days: 30,
            keep_critical: false,
            legal_hold_ids: ["garbled".to_string()].into_iter().collect(),
        };
        let records = vec![record("garbled", "not a timestamp", Severity::Low)];
        let plan = build_plan(&records, &policy, now()).unwrap();
        assert_eq!(plan.summary.delete_count, 0);
    }
}
