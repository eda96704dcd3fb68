use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use docchain_panel::ChainSourceError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("no correction chain for {doc_type} {doc_id}")]
    ChainNotFound { doc_type: String, doc_id: String },

    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("chain source error: {0}")]
    Source(#[from] ChainSourceError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ChainNotFound { .. } | Self::UnknownDocumentType(_) => StatusCode::NOT_FOUND,
            Self::Source(ChainSourceError::NotFound) => StatusCode::NOT_FOUND,
            Self::Source(ChainSourceError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Source(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let not_found = ServerError::ChainNotFound {
            doc_type: "invoice".into(),
            doc_id: "1".into(),
        };
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServerError::from(ChainSourceError::Unavailable("x".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ServerError::from(ChainSourceError::Decode("x".into())).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
