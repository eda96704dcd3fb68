use thiserror::Error;

/// Errors produced when decoding chain data.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("invalid chain graph JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;
