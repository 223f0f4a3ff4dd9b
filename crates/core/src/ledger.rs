//! Issue ledger: detected operational anomalies in the collection pipeline.
//!
//! Issues are raised by external detection logic and resolved exactly once
//! by operator action. The instance reference is an identifier only (a weak
//! reference): instance lifecycle changes never cascade into the ledger, and
//! orphaned references are tolerated.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{IssueKind, IssueStatus, Severity};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One detected operational issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub severity: Severity,
    pub kind: IssueKind,
    /// Weak reference to the instance this issue concerns.
    pub instance_id: String,
    pub message: String,
    /// Creation time; immutable.
    pub timestamp: DateTime<Utc>,
    /// Occurrence counter, starts at 1.
    pub count: u64,
    pub status: IssueStatus,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Severity filter for [`IssueLedger::list`].
///
/// `All` returns every issue regardless of severity *and* status; resolved
/// issues stay visible in every view, only the summary counts partition by
/// severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl FromStr for SeverityFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(SeverityFilter::All)
        } else {
            s.parse::<Severity>().map(SeverityFilter::Only)
        }
    }
}

/// Per-severity issue counts for the summary tiles. Counts include resolved
/// issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    /// Sum over all severities; always equals the full ledger size.
    pub fn total(&self) -> usize {
        self.critical + self.warning + self.info
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The ledger aggregate. Listing preserves insertion order.
#[derive(Debug, Default)]
pub struct IssueLedger {
    issues: Vec<Issue>,
}

impl IssueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly detected issue: active, `count = 1`, timestamped now.
    ///
    /// Returns the stored issue with its generated id.
    pub fn raise(
        &mut self,
        severity: Severity,
        kind: IssueKind,
        instance_id: impl Into<String>,
        message: impl Into<String>,
    ) -> &Issue {
        self.issues.push(Issue {
            id: Uuid::now_v7().to_string(),
            severity,
            kind,
            instance_id: instance_id.into(),
            message: message.into(),
            timestamp: Utc::now(),
            count: 1,
            status: IssueStatus::Active,
        });
        self.issues.last().expect("just pushed")
    }

    /// List issues matching the severity filter, in insertion order.
    /// Resolved issues are included.
    pub fn list(&self, filter: SeverityFilter) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|i| match filter {
                SeverityFilter::All => true,
                SeverityFilter::Only(severity) => i.severity == severity,
            })
            .collect()
    }

    /// Count all issues (active and resolved) per severity.
    pub fn count_by_severity(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for issue in &self.issues {
            match issue.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    /// Number of issues currently active.
    pub fn active_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.status == IssueStatus::Active)
            .count()
    }

    /// Mark an issue resolved. Idempotent: resolving an already-resolved
    /// issue is a no-op, not an error. There is no transition back to
    /// active.
    pub fn resolve(&mut self, id: &str) -> CoreResult<&Issue> {
        let issue = self.find_mut(id)?;
        issue.status = IssueStatus::Resolved;
        Ok(issue)
    }

    /// Record a repeat occurrence of an active issue by bumping its
    /// counter.
    ///
    /// A resolved issue is never reopened; detection logic must raise a new
    /// issue instead, so recurrence on a resolved issue is a conflict.
    pub fn record_recurrence(&mut self, id: &str) -> CoreResult<&Issue> {
        let issue = self.find_mut(id)?;
        if issue.status == IssueStatus::Resolved {
            return Err(CoreError::Conflict(format!(
                "Issue '{id}' is resolved; raise a new issue for repeat occurrences"
            )));
        }
        issue.count += 1;
        Ok(issue)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    fn find_mut(&mut self, id: &str) -> CoreResult<&mut Issue> {
        self.issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("Issue", id))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
