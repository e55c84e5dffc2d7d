use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported request type: {0}")]
    UnsupportedOperation(String),

    #[error("malformed event: missing {0}")]
    MissingField(String),

    #[error("malformed event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{message}")]
    ImmutableField { field: String, message: String },

    #[error("invalid username {user_name}: {reason}")]
    InvalidUserName { user_name: String, reason: String },
}
