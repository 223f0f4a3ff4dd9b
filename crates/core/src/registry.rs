//! Instance registry: the set of known database instances and, per
//! instance, the enabled/disabled state and usage statistics of each log
//! type.
//!
//! Instances are created by the external discovery service (via
//! [`InstanceRegistry::register`]) and never deleted; ids are stable and
//! never reused within a registry's lifetime. Listing preserves insertion
//! order.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::LogType;

/// The only instance status with defined semantics. Everything else is an
/// opaque string carried through for display.
pub const STATUS_AVAILABLE: &str = "available";

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Per-log-type collection state on one instance.
///
/// `count`, `size_bytes`, and `last_processed` are monotonically
/// non-decreasing while collection is enabled. Disabling stops future
/// updates; it never erases history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTypeState {
    pub enabled: bool,
    pub last_processed: Option<DateTime<Utc>>,
    pub count: u64,
    pub size_bytes: u64,
}

impl LogTypeState {
    /// Fresh state for a log type that has never collected anything.
    pub fn disabled() -> Self {
        LogTypeState {
            enabled: false,
            last_processed: None,
            count: 0,
            size_bytes: 0,
        }
    }
}

impl Default for LogTypeState {
    fn default() -> Self {
        Self::disabled()
    }
}

/// A managed database instance as reported by discovery.
///
/// Descriptive fields (`instance_class`, `engine`, `region`, `az`) are
/// immutable after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub cluster_id: String,
    pub instance_class: String,
    pub engine: String,
    pub region: String,
    pub az: String,
    /// Open status string; only [`STATUS_AVAILABLE`] is semantically special.
    pub status: String,
    /// Last time discovery saw this instance.
    pub last_seen: DateTime<Utc>,
    /// Per-log-type collection state, keyed by the tracked log types.
    pub log_types: BTreeMap<LogType, LogTypeState>,
}

impl Instance {
    pub fn is_available(&self) -> bool {
        self.status == STATUS_AVAILABLE
    }

    /// True if collection is enabled for at least one tracked log type.
    pub fn any_log_type_enabled(&self) -> bool {
        self.log_types.values().any(|s| s.enabled)
    }

    fn matches_search(&self, term_lower: &str) -> bool {
        term_lower.is_empty()
            || self.id.to_lowercase().contains(term_lower)
            || self.cluster_id.to_lowercase().contains(term_lower)
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Status filter for [`InstanceRegistry::list`].
///
/// `Enabled` matches instances where *any* tracked log type is enabled;
/// `Disabled` matches instances that track at least one log type and have
/// *all* of them disabled. An instance tracking no log types matches
/// neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstanceFilter {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl InstanceFilter {
    fn matches(&self, instance: &Instance) -> bool {
        match self {
            InstanceFilter::All => true,
            InstanceFilter::Enabled => instance.any_log_type_enabled(),
            InstanceFilter::Disabled => {
                !instance.log_types.is_empty() && !instance.any_log_type_enabled()
            }
        }
    }
}

impl FromStr for InstanceFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(InstanceFilter::All),
            "enabled" => Ok(InstanceFilter::Enabled),
            "disabled" => Ok(InstanceFilter::Disabled),
            other => Err(CoreError::InvalidArgument(format!(
                "Unknown instance filter: '{other}'. Valid filters: all, enabled, disabled"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The registry aggregate. Single-writer semantics; the hosting layer is
/// responsible for locking the aggregate as a whole.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    instances: Vec<Instance>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly discovered instance.
    ///
    /// Ids are never reused, so re-registering an existing id is a conflict
    /// rather than an upsert.
    pub fn register(&mut self, instance: Instance) -> CoreResult<()> {
        if self.find(&instance.id).is_some() {
            return Err(CoreError::Conflict(format!(
                "Instance '{}' is already registered",
                instance.id
            )));
        }
        self.instances.push(instance);
        Ok(())
    }

    /// Look up one instance by id.
    pub fn get(&self, id: &str) -> CoreResult<&Instance> {
        self.find(id)
            .ok_or_else(|| CoreError::not_found("Instance", id))
    }

    /// List instances matching `filter` AND `search_term`, in insertion
    /// order.
    ///
    /// The search term matches case-insensitively as a substring of the
    /// instance id or cluster id; an empty term matches everything.
    pub fn list(&self, filter: InstanceFilter, search_term: &str) -> Vec<&Instance> {
        let term_lower = search_term.to_lowercase();
        self.instances
            .iter()
            .filter(|i| filter.matches(i) && i.matches_search(&term_lower))
            .collect()
    }

    /// Flip the `enabled` flag for one log type on one instance.
    ///
    /// A single-field mutation: history fields (`last_processed`, `count`,
    /// `size_bytes`) are untouched, so toggling twice restores the original
    /// state exactly.
    pub fn toggle_log_type(&mut self, id: &str, log_type: LogType) -> CoreResult<&LogTypeState> {
        let state = self.log_type_state_mut(id, log_type)?;
        state.enabled = !state.enabled;
        Ok(state)
    }

    /// Record a completed processing run for one log type: bump the ingest
    /// count and byte size, and advance `last_processed`.
    ///
    /// Rejected with `Conflict` when collection is disabled for that log
    /// type; disabling stops future updates. `last_processed` never moves
    /// backwards even if runs are reported out of order.
    pub fn record_processed(
        &mut self,
        id: &str,
        log_type: LogType,
        ingested: u64,
        bytes: u64,
        at: DateTime<Utc>,
    ) -> CoreResult<&LogTypeState> {
        let state = self.log_type_state_mut(id, log_type)?;
        if !state.enabled {
            return Err(CoreError::Conflict(format!(
                "Collection of {log_type} is disabled on instance '{id}'"
            )));
        }
        state.count += ingested;
        state.size_bytes += bytes;
        state.last_processed = Some(match state.last_processed {
            Some(prev) if prev > at => prev,
            _ => at,
        });
        Ok(state)
    }

    /// Refresh the discovery heartbeat timestamp.
    pub fn mark_seen(&mut self, id: &str, at: DateTime<Utc>) -> CoreResult<()> {
        let instance = self.find_mut(id)?;
        instance.last_seen = at;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// All instances in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter()
    }

    fn find(&self, id: &str) -> Option<&Instance> {
        self.instances.iter().find(|i| i.id == id)
    }

    fn find_mut(&mut self, id: &str) -> CoreResult<&mut Instance> {
        self.instances
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("Instance", id))
    }

    fn log_type_state_mut(
        &mut self,
        id: &str,
        log_type: LogType,
    ) -> CoreResult<&mut LogTypeState> {
        let instance = self.find_mut(id)?;
        instance
            .log_types
            .get_mut(&log_type)
            .ok_or_else(|| CoreError::not_found("LogType", log_type.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
