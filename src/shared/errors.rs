use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Rooms unavailable: {rooms:?}")]
    RoomConflict { rooms: Vec<String> },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Timed out waiting for room lock: {0}")]
    LockTimeout(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. store connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }

    /// Whether the caller should be told to retry later (as opposed to
    /// "someone else booked it" or "bad request").
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Storage(_) | DomainError::LockTimeout(_)
        )
    }
}
