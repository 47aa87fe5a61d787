use thiserror::Error;

/// Main error type for query composition
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Invalid range on field {field}: start={start}, end={end}")]
    InvalidRange { field: String, start: i64, end: i64 },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {field} cannot be used here: {reason}")]
    UnsupportedField { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for composition operations
pub type Result<T> = std::result::Result<T, ComposeError>;

impl ComposeError {
    /// Whether the error was caused by the caller's input rather than the environment
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ComposeError::Io(_))
    }
}

/// Classification of errors reported by the backing relational store
///
/// Stores only hand back error text, so the kind is recovered by substring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreErrorKind {
    MissingDefaultValue,
    DuplicateKey,
    NotFound,
    ConnectionRefused,
}

impl StoreErrorKind {
    pub fn classify(message: &str) -> Option<Self> {
        if message.contains("doesn't have a default value") {
            Some(StoreErrorKind::MissingDefaultValue)
        } else if message.contains("Duplicate entry") {
            Some(StoreErrorKind::DuplicateKey)
        } else if message.contains("record not found") {
            Some(StoreErrorKind::NotFound)
        } else if message.contains("connection refused") {
            Some(StoreErrorKind::ConnectionRefused)
        } else {
            None
        }
    }

    /// Classify any displayable error
    pub fn of(err: &dyn std::error::Error) -> Option<Self> {
        Self::classify(&err.to_string())
    }
}
