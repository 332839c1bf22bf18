use thiserror::Error;

#[derive(Debug, Error)]
pub enum MicroloanError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid or missing URL for {field}: {reason}")]
    InvalidLink { field: String, reason: String },

    #[error("Invalid loan product: {0}")]
    InvalidProduct(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MicroloanError {
    fn from(e: serde_json::Error) -> Self {
        MicroloanError::SerializationError(e.to_string())
    }
}
