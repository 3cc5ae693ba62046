//! Store handles and shared application state.
//!
//! [`Stores`] owns one handle per backing store and is created once at
//! startup. The concrete backends are picked by feature flags; everything
//! downstream sees only the core traits.

use std::sync::Arc;

use collabgraph_core::cache::Cache;
use collabgraph_core::graph::GraphStore;
use collabgraph_core::storage::DocumentStore;

use crate::config::Config;
use crate::services::{ProfileAssembler, RecordService};

/// Handles to the document store, graph store and cache.
#[derive(Clone)]
pub struct Stores {
    pub documents: Arc<dyn DocumentStore>,
    pub graph: Arc<dyn GraphStore>,
    pub cache: Arc<dyn Cache>,
}

impl Stores {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        graph: Arc<dyn GraphStore>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            documents,
            graph,
            cache,
        }
    }

    /// Connects every configured backend.
    ///
    /// Fails on the first store that cannot be reached; nothing is retried.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let documents = connect_documents(config).await?;
        let graph = connect_graph(config).await?;
        let cache = connect_cache(config).await?;

        tracing::info!(
            documents = DOCUMENT_BACKEND,
            graph = GRAPH_BACKEND,
            cache = CACHE_BACKEND,
            "Stores connected"
        );

        Ok(Self::new(documents, graph, cache))
    }

    /// Releases the store handles.
    ///
    /// Each backend closes its connections when its last handle is dropped.
    pub async fn shutdown(self) {
        let Self {
            documents,
            graph,
            cache,
        } = self;
        drop(cache);
        drop(graph);
        drop(documents);
        tracing::info!("Stores closed");
    }
}

#[cfg(feature = "inmemory")]
const DOCUMENT_BACKEND: &str = "inmemory";
#[cfg(feature = "sqlite")]
const DOCUMENT_BACKEND: &str = "sqlite";

#[cfg(feature = "graph-memory")]
const GRAPH_BACKEND: &str = "memory";
#[cfg(feature = "neo4j")]
const GRAPH_BACKEND: &str = "neo4j";

#[cfg(feature = "memory")]
const CACHE_BACKEND: &str = "memory";
#[cfg(feature = "redis")]
const CACHE_BACKEND: &str = "redis";

#[cfg(feature = "inmemory")]
async fn connect_documents(_config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    Ok(Arc::new(crate::storage::InMemoryRepository::new()))
}

#[cfg(feature = "sqlite")]
async fn connect_documents(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let repo = crate::storage::SqliteRepository::new(&config.sqlite_path).await?;
    tracing::debug!(path = %config.sqlite_path, "SQLite document store opened");
    Ok(Arc::new(repo))
}

#[cfg(feature = "graph-memory")]
async fn connect_graph(_config: &Config) -> anyhow::Result<Arc<dyn GraphStore>> {
    Ok(Arc::new(crate::graph::MemoryGraph::new()))
}

#[cfg(feature = "neo4j")]
async fn connect_graph(config: &Config) -> anyhow::Result<Arc<dyn GraphStore>> {
    let settings = crate::graph::neo4j::Neo4jSettings {
        uri: config.neo4j_uri.clone(),
        username: config.neo4j_username.clone(),
        password: config.neo4j_password.clone(),
        database: config.neo4j_database.clone(),
    };
    let graph = crate::graph::Neo4jGraph::connect(&settings).await?;
    tracing::debug!(uri = %config.neo4j_uri, "Neo4j graph store connected");
    Ok(Arc::new(graph))
}

#[cfg(feature = "memory")]
async fn connect_cache(config: &Config) -> anyhow::Result<Arc<dyn Cache>> {
    Ok(Arc::new(crate::cache::MemoryCache::new(
        config.cache_max_entries,
    )))
}

#[cfg(feature = "redis")]
async fn connect_cache(config: &Config) -> anyhow::Result<Arc<dyn Cache>> {
    let cache = crate::cache::RedisCache::new(&config.redis_url).await?;
    tracing::debug!("Redis cache connected");
    Ok(Arc::new(cache))
}

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordService>,
    pub profiles: Arc<ProfileAssembler>,
    pub stores: Stores,
}

impl AppState {
    pub fn new(stores: &Stores, config: &Config) -> Self {
        Self {
            records: Arc::new(RecordService::new(stores)),
            profiles: Arc::new(ProfileAssembler::new(stores, config.profile_ttl())),
            stores: stores.clone(),
        }
    }
}

#[cfg(all(test, feature = "inmemory", feature = "graph-memory", feature = "memory"))]
impl Stores {
    /// In-process stores for tests.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(crate::storage::InMemoryRepository::new()),
            Arc::new(crate::graph::MemoryGraph::new()),
            Arc::new(crate::cache::MemoryCache::new(1_000)),
        )
    }
}
