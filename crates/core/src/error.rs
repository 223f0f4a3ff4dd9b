//! Domain error type shared by all aggregates.

/// Errors returned by registry, ledger, and tracker operations.
///
/// Every operation returns `Result` rather than panicking so the hosting
/// transport layer can map outcomes to protocol-appropriate responses.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The named entity (or sub-key, e.g. a log type on an instance) does
    /// not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// The caller supplied a value outside the accepted domain (unknown
    /// filter, bad severity, `files_processed > total_files`, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is valid in general but not in the entity's current
    /// state (duplicate id, terminal job, resolved issue, disabled log type).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An internal invariant was violated. Should not occur in practice.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for domain operations.
pub type CoreResult<T> = Result<T, CoreError>;
