use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use docchain_panel::{ChainSource, InMemoryChainSource};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Correction chain backend.
pub struct DocchainServer {
    config: ServerConfig,
    source: Arc<dyn ChainSource>,
}

impl DocchainServer {
    /// Create a server over an in-memory source, seeded with the guide
    /// examples when the config asks for it.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let source = InMemoryChainSource::new();
        if config.seed_guide_chains {
            seed_guide_chains(&source)?;
        }
        Ok(Self::with_source(config, Arc::new(source)))
    }

    pub fn with_source(config: ServerConfig, source: Arc<dyn ChainSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.source))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!("docchain server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

/// Register every guide example chain. Returns how many were loaded.
pub fn seed_guide_chains(source: &InMemoryChainSource) -> ServerResult<usize> {
    let mut loaded = 0;
    for (doc_type, scenarios) in docchain_scenarios::all() {
        for scenario in scenarios {
            if scenario.example.is_empty() {
                warn!(doc_type = %doc_type, title = %scenario.title, "skipping empty guide example");
                continue;
            }
            source.insert_chain(scenario.example)?;
            loaded += 1;
        }
    }
    info!(chains = loaded, "seeded guide chains");
    Ok(loaded)
}
