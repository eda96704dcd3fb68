use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use docchain_panel::ChainSource;

use crate::handler;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ChainSource>,
}

/// Build the axum router with all docchain endpoints.
pub fn build_router(source: Arc<dyn ChainSource>) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/document-types", get(handler::document_types_handler))
        .route("/v1/guide/:doc_type", get(handler::guide_handler))
        .route(
            "/v1/correction-chain/:doc_type/:doc_id",
            get(handler::correction_chain_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { source })
}
