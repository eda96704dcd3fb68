//! HTTP backend for correction chains.
//!
//! Serves the `GET /v1/correction-chain/{type}/{id}` endpoint hosts fetch
//! from, plus document type metadata and the static correction guides.
//! A missing chain is answered with 404 and a JSON error body, which
//! clients treat as "no correction history".

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::{seed_guide_chains, DocchainServer};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::util::ServiceExt;

    use docchain_panel::{ChainSourceError, InMemoryChainSource};
    use docchain_types::{ChainGraph, DocumentType};

    fn app() -> Router {
        DocchainServer::new(ServerConfig::default()).unwrap().router()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = get(app(), "/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn document_types_endpoint() {
        let (status, body) = get(app(), "/v1/document-types").await;
        assert_eq!(status, StatusCode::OK);
        let types = body.as_array().unwrap();
        assert_eq!(types.len(), DocumentType::KNOWN.len());
        assert_eq!(types[0]["type"], "invoice");
        assert_eq!(types[0]["label"], "Invoice");
    }

    #[tokio::test]
    async fn guide_endpoint_accepts_route_segments() {
        let (status, body) = get(app(), "/v1/guide/credit-note").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["descriptor"]["type"], "credit_note");
        assert!(!body["scenarios"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn guide_endpoint_rejects_unknown_types() {
        let (status, body) = get(app(), "/v1/guide/consignment").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("consignment"));
    }

    #[tokio::test]
    async fn correction_chain_for_seeded_document() {
        let (status, body) = get(app(), "/v1/correction-chain/credit_note/6").await;
        assert_eq!(status, StatusCode::OK);
        let graph: ChainGraph = serde_json::from_value(body).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.nodes[0].id, "invoice:24");
    }

    #[tokio::test]
    async fn missing_chain_is_404_with_json_body() {
        let (status, body) = get(app(), "/v1/correction-chain/invoice/424242").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert!(body["error"].as_str().unwrap().contains("424242"));
    }

    #[tokio::test]
    async fn source_failures_map_to_gateway_errors() {
        let source = InMemoryChainSource::new();
        source
            .fail_with(
                &DocumentType::Invoice,
                "7",
                ChainSourceError::Unavailable("maintenance".into()),
            )
            .unwrap();
        let app = build_router(Arc::new(source));
        let (status, body) = get(app, "/v1/correction-chain/invoice/7").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("maintenance"));
    }

    #[tokio::test]
    async fn unseeded_server_has_no_chains() {
        let config = ServerConfig {
            seed_guide_chains: false,
            ..ServerConfig::default()
        };
        let app = DocchainServer::new(config).unwrap().router();
        let (status, _) = get(app, "/v1/correction-chain/invoice/24").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
