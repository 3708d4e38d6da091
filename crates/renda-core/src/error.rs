use thiserror::Error;

#[derive(Debug, Error)]
pub enum RendaFixaError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown time unit: {0:?} (expected day, month or year)")]
    UnknownTimeUnit(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RendaFixaError {
    fn from(e: serde_json::Error) -> Self {
        RendaFixaError::SerializationError(e.to_string())
    }
}
