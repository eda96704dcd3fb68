use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use docchain_panel::ChainSourceError;
use docchain_registry::{DocumentTypeDescriptor, Registry};
use docchain_scenarios::{scenarios_for, Scenario};
use docchain_types::{ChainGraph, DocumentType};

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": "docchain-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Every known document type with its registry descriptor.
pub async fn document_types_handler() -> Json<Vec<DocumentTypeDescriptor>> {
    Json(Registry::new().all())
}

#[derive(Debug, Serialize)]
pub struct GuideResponse {
    pub descriptor: DocumentTypeDescriptor,
    pub scenarios: Vec<Scenario>,
}

/// Correction scenarios for one document type.
pub async fn guide_handler(Path(doc_type): Path<DocumentType>) -> ServerResult<Json<GuideResponse>> {
    if doc_type.is_other() {
        return Err(ServerError::UnknownDocumentType(doc_type.tag().to_string()));
    }
    Ok(Json(GuideResponse {
        descriptor: Registry::new().lookup(&doc_type),
        scenarios: scenarios_for(&doc_type),
    }))
}

/// The correction chain containing a document.
pub async fn correction_chain_handler(
    State(state): State<AppState>,
    Path((doc_type, doc_id)): Path<(DocumentType, String)>,
) -> ServerResult<Json<ChainGraph>> {
    match state.source.get_correction_chain(&doc_type, &doc_id).await {
        Ok(graph) => {
            debug!(doc_type = %doc_type, doc_id = %doc_id, nodes = graph.len(), "served correction chain");
            Ok(Json(graph))
        }
        Err(ChainSourceError::NotFound) => Err(ServerError::ChainNotFound {
            doc_type: doc_type.tag().to_string(),
            doc_id,
        }),
        Err(err) => Err(err.into()),
    }
}
