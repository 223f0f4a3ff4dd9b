//! Shared vocabulary types for the log-collection domain.
//!
//! Log types, issue severities and kinds, and the lifecycle status enums
//! used by the registry, ledger, and tracker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Log types
// ---------------------------------------------------------------------------

/// A named category of database log output, independently enabled/disabled
/// per instance.
///
/// Serializes to the dashboard's camelCase keys (`errorLogs`, ...). The set
/// is open in principle but currently fixed to the three Aurora MySQL log
/// categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogType {
    #[serde(rename = "errorLogs")]
    ErrorLogs,
    #[serde(rename = "slowQueryLogs")]
    SlowQueryLogs,
    #[serde(rename = "generalLogs")]
    GeneralLogs,
}

impl LogType {
    /// All tracked log types, in display order.
    pub const ALL: [LogType; 3] = [
        LogType::ErrorLogs,
        LogType::SlowQueryLogs,
        LogType::GeneralLogs,
    ];

    /// The wire key for this log type.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::ErrorLogs => "errorLogs",
            LogType::SlowQueryLogs => "slowQueryLogs",
            LogType::GeneralLogs => "generalLogs",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "errorLogs" => Ok(LogType::ErrorLogs),
            "slowQueryLogs" => Ok(LogType::SlowQueryLogs),
            "generalLogs" => Ok(LogType::GeneralLogs),
            other => Err(CoreError::InvalidArgument(format!(
                "Unknown log type: '{other}'. Valid types: errorLogs, slowQueryLogs, generalLogs"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Issue severity
// ---------------------------------------------------------------------------

/// Issue severity, a fixed three-value taxonomy.
///
/// Ordered so that `Critical > Warning > Info`, which is the display and
/// filtering order the dashboard uses for its summary tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(CoreError::InvalidArgument(format!(
                "Unknown severity: '{other}'. Valid severities: critical, warning, info"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Issue kind
// ---------------------------------------------------------------------------

/// The kind of operational anomaly an issue describes.
///
/// Open for extension: unrecognized kinds round-trip as [`IssueKind::Other`]
/// and display their raw string where no label is maintained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueKind {
    ApiThrottle,
    CircuitBreaker,
    ProcessingDelay,
    ConnectionError,
    Other(String),
}

impl IssueKind {
    /// The wire identifier for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            IssueKind::ApiThrottle => "api-throttle",
            IssueKind::CircuitBreaker => "circuit-breaker",
            IssueKind::ProcessingDelay => "processing-delay",
            IssueKind::ConnectionError => "connection-error",
            IssueKind::Other(raw) => raw,
        }
    }

    /// Human-readable label for display, falling back to the raw identifier
    /// for unmapped kinds.
    pub fn label(&self) -> &str {
        match self {
            IssueKind::ApiThrottle => "API Throttling",
            IssueKind::CircuitBreaker => "Circuit Breaker",
            IssueKind::ProcessingDelay => "Processing Delay",
            IssueKind::ConnectionError => "Connection Error",
            IssueKind::Other(raw) => raw,
        }
    }
}

impl From<String> for IssueKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "api-throttle" => IssueKind::ApiThrottle,
            "circuit-breaker" => IssueKind::CircuitBreaker,
            "processing-delay" => IssueKind::ProcessingDelay,
            "connection-error" => IssueKind::ConnectionError,
            _ => IssueKind::Other(s),
        }
    }
}

impl From<IssueKind> for String {
    fn from(kind: IssueKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Lifecycle statuses
// ---------------------------------------------------------------------------

/// Issue resolution status. The only transition is `Active -> Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Active,
    Resolved,
}

/// Processing-job status. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
