use docchain_types::TypeError;

/// Errors a chain source can report.
///
/// [`NotFound`](ChainSourceError::NotFound) is kept apart from the rest:
/// it means the document has no correction history, not that something
/// went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainSourceError {
    #[error("correction chain not found")]
    NotFound,

    #[error("chain source unavailable: {0}")]
    Unavailable(String),

    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("malformed correction chain: {0}")]
    Decode(String),
}

impl ChainSourceError {
    /// Map an HTTP-style status to an error; 404 becomes `NotFound`.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == 404 {
            Self::NotFound
        } else {
            Self::Backend {
                status,
                message: message.into(),
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<TypeError> for ChainSourceError {
    fn from(err: TypeError) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type ChainSourceResult<T> = Result<T, ChainSourceError>;
