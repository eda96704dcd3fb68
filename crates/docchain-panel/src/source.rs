use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use docchain_types::{ChainGraph, DocumentType};

use crate::error::{ChainSourceError, ChainSourceResult};

/// Where correction chains come from.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Fetch the chain containing the given document.
    async fn get_correction_chain(
        &self,
        doc_type: &DocumentType,
        doc_id: &str,
    ) -> ChainSourceResult<ChainGraph>;
}

#[async_trait]
impl<S: ChainSource + ?Sized> ChainSource for Arc<S> {
    async fn get_correction_chain(
        &self,
        doc_type: &DocumentType,
        doc_id: &str,
    ) -> ChainSourceResult<ChainGraph> {
        (**self).get_correction_chain(doc_type, doc_id).await
    }
}

/// In-memory chain source for tests, demos, and the sample server.
///
/// Chains are indexed under the node key of every member, so asking for
/// any document in a chain returns the whole chain. Failures can be
/// injected per document.
#[derive(Default)]
pub struct InMemoryChainSource {
    inner: RwLock<SourceState>,
}

#[derive(Default)]
struct SourceState {
    chains: HashMap<String, ChainGraph>,
    failures: HashMap<String, ChainSourceError>,
}

impl InMemoryChainSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chain under each of its nodes. Later chains replace
    /// earlier ones for shared keys.
    pub fn insert_chain(&self, graph: ChainGraph) -> ChainSourceResult<()> {
        let mut state = self.write()?;
        for node in &graph.nodes {
            state.chains.insert(node.id.clone(), graph.clone());
        }
        debug!(nodes = graph.len(), "registered correction chain");
        Ok(())
    }

    /// Register a chain for one document only.
    pub fn insert(
        &self,
        doc_type: &DocumentType,
        doc_id: &str,
        graph: ChainGraph,
    ) -> ChainSourceResult<()> {
        self.write()?.chains.insert(doc_type.node_key(doc_id), graph);
        Ok(())
    }

    /// Make every fetch for the document fail with `error` until cleared.
    pub fn fail_with(
        &self,
        doc_type: &DocumentType,
        doc_id: &str,
        error: ChainSourceError,
    ) -> ChainSourceResult<()> {
        self.write()?.failures.insert(doc_type.node_key(doc_id), error);
        Ok(())
    }

    pub fn clear_failure(&self, doc_type: &DocumentType, doc_id: &str) -> ChainSourceResult<()> {
        self.write()?.failures.remove(&doc_type.node_key(doc_id));
        Ok(())
    }

    /// Number of document keys with a chain.
    pub fn len(&self) -> usize {
        self.inner.read().map(|s| s.chains.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write(&self) -> ChainSourceResult<std::sync::RwLockWriteGuard<'_, SourceState>> {
        self.inner
            .write()
            .map_err(|_| ChainSourceError::Unavailable("chain store lock poisoned".into()))
    }
}

#[async_trait]
impl ChainSource for InMemoryChainSource {
    async fn get_correction_chain(
        &self,
        doc_type: &DocumentType,
        doc_id: &str,
    ) -> ChainSourceResult<ChainGraph> {
        let key = doc_type.node_key(doc_id);
        let state = self
            .inner
            .read()
            .map_err(|_| ChainSourceError::Unavailable("chain store lock poisoned".into()))?;

        if let Some(error) = state.failures.get(&key) {
            return Err(error.clone());
        }
        state.chains.get(&key).cloned().ok_or(ChainSourceError::NotFound)
    }
}
