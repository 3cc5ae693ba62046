//! Cache-aside retrieval of researcher profiles.

use std::sync::Arc;
use std::time::Duration;

use collabgraph_core::cache::{deserialize_profile, profile_key, serialize_profile, Cache};
use collabgraph_core::graph::GraphStore;
use collabgraph_core::research::{assemble_profile, Profile, Researcher};
use collabgraph_core::storage::{
    projects_with_publications, DocumentStore, PublicationRepository,
};

use crate::state::Stores;

/// Builds researcher profiles and keeps them in the cache for a fixed TTL.
pub struct ProfileAssembler {
    documents: Arc<dyn DocumentStore>,
    graph: Arc<dyn GraphStore>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl ProfileAssembler {
    pub fn new(stores: &Stores, ttl: Duration) -> Self {
        Self {
            documents: stores.documents.clone(),
            graph: stores.graph.clone(),
            cache: stores.cache.clone(),
            ttl,
        }
    }

    /// Gets the profile of an existing researcher.
    ///
    /// The caller resolves the researcher record first. A cached profile is
    /// returned without touching the document or graph store; otherwise the
    /// profile is assembled from both and cached.
    pub async fn get_profile(&self, researcher: &Researcher) -> anyhow::Result<Profile> {
        let researcher_id = researcher.id;
        let cache_key = profile_key(researcher_id);

        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => {
                if let Ok(profile) = deserialize_profile(&bytes) {
                    tracing::debug!(%researcher_id, "Cache hit for profile");
                    return Ok(profile);
                }
                // Unreadable entry counts as a miss
                tracing::warn!(%researcher_id, "Cached profile deserialization failed");
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%researcher_id, error = %err, "Profile cache read failed");
            }
        }

        tracing::debug!(%researcher_id, "Cache miss for profile");
        let (publications, projects, relations) = tokio::join!(
            self.documents.find_publications_by_author(researcher_id),
            projects_with_publications(self.documents.as_ref(), researcher_id),
            self.graph.outgoing_relations(&researcher.name),
        );
        let profile = assemble_profile(researcher, &publications?, &projects?, &relations?);

        match serialize_profile(&profile) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(%researcher_id, error = %err, "Failed to cache profile");
                }
            }
            Err(err) => {
                tracing::warn!(%researcher_id, error = %err, "Failed to serialize profile");
            }
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use collabgraph_core::cache::{CacheError, Result as CacheResult};
    use collabgraph_core::graph::{
        CollaborationRecord, GraphNode, OutgoingRelation, Result as GraphResult,
    };
    use collabgraph_core::research::{Project, Publication, RelationKind};
    use collabgraph_core::storage::{ProjectRepository, ResearcherRepository, Result as RepoResult};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    // Document store that only answers the profile fetches
    #[derive(Default)]
    struct MockDocuments {
        publications: Vec<Publication>,
        projects: Vec<Project>,
        calls: AtomicUsize,
    }

    impl MockDocuments {
        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ResearcherRepository for MockDocuments {
        async fn get_researcher(&self, _id: Uuid) -> RepoResult<Option<Researcher>> {
            self.hit();
            Ok(None)
        }

        async fn list_researchers(&self) -> RepoResult<Vec<Researcher>> {
            self.hit();
            Ok(Vec::new())
        }

        async fn find_researchers_by_name(&self, _name: &str) -> RepoResult<Vec<Researcher>> {
            self.hit();
            Ok(Vec::new())
        }

        async fn create_researcher(&self, _researcher: &Researcher) -> RepoResult<()> {
            unimplemented!()
        }

        async fn add_researcher_publication(&self, _r: Uuid, _p: Uuid) -> RepoResult<()> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl ProjectRepository for MockDocuments {
        async fn get_project(&self, _id: Uuid) -> RepoResult<Option<Project>> {
            self.hit();
            Ok(None)
        }

        async fn list_projects(&self) -> RepoResult<Vec<Project>> {
            self.hit();
            Ok(self.projects.clone())
        }

        async fn find_projects_by_participant(&self, id: Uuid) -> RepoResult<Vec<Project>> {
            self.hit();
            Ok(self
                .projects
                .iter()
                .filter(|p| p.participants.contains(&id))
                .cloned()
                .collect())
        }

        async fn create_project(&self, _project: &Project) -> RepoResult<()> {
            unimplemented!()
        }

        async fn add_project_publication(&self, _p: Uuid, _pub_id: Uuid) -> RepoResult<()> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl PublicationRepository for MockDocuments {
        async fn get_publication(&self, id: Uuid) -> RepoResult<Option<Publication>> {
            self.hit();
            Ok(self.publications.iter().find(|p| p.id == id).cloned())
        }

        async fn list_publications(&self) -> RepoResult<Vec<Publication>> {
            self.hit();
            Ok(self.publications.clone())
        }

        async fn get_publications(&self, ids: &[Uuid]) -> RepoResult<Vec<Publication>> {
            self.hit();
            Ok(ids
                .iter()
                .filter_map(|id| self.publications.iter().find(|p| p.id == *id).cloned())
                .collect())
        }

        async fn find_publications_by_author(&self, id: Uuid) -> RepoResult<Vec<Publication>> {
            self.hit();
            Ok(self
                .publications
                .iter()
                .filter(|p| p.has_author(id))
                .cloned()
                .collect())
        }

        async fn create_publication(&self, _publication: &Publication) -> RepoResult<()> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct MockGraph {
        relations: Vec<OutgoingRelation>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GraphStore for MockGraph {
        async fn upsert_node(&self, _node: &GraphNode) -> GraphResult<()> {
            unimplemented!()
        }

        async fn upsert_edge(
            &self,
            _researcher_name: &str,
            _relation: RelationKind,
            _target: &GraphNode,
        ) -> GraphResult<()> {
            unimplemented!()
        }

        async fn outgoing_relations(&self, _name: &str) -> GraphResult<Vec<OutgoingRelation>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.relations.clone())
        }

        async fn list_collaborations(&self, _limit: usize) -> GraphResult<Vec<CollaborationRecord>> {
            unimplemented!()
        }

        async fn ping(&self) -> GraphResult<()> {
            Ok(())
        }
    }

    // Mock cache recording reads and writes
    #[derive(Default)]
    struct MockCache {
        store: RwLock<HashMap<String, Vec<u8>>>,
        ttls: RwLock<Vec<Option<Duration>>>,
        gets: AtomicUsize,
        fail_writes: bool,
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            Ok(self.store.read().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
            if self.fail_writes {
                return Err(CacheError::ConnectionFailed("connection reset".to_string()));
            }
            self.ttls.write().await.push(ttl);
            self.store
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            self.store.write().await.remove(key);
            Ok(())
        }
    }

    struct Fixture {
        documents: Arc<MockDocuments>,
        graph: Arc<MockGraph>,
        cache: Arc<MockCache>,
        assembler: ProfileAssembler,
    }

    fn fixture(documents: MockDocuments, graph: MockGraph, cache: MockCache) -> Fixture {
        let documents = Arc::new(documents);
        let graph = Arc::new(graph);
        let cache = Arc::new(cache);
        let stores = Stores::new(documents.clone(), graph.clone(), cache.clone());
        let assembler = ProfileAssembler::new(&stores, Duration::from_secs(60));
        Fixture {
            documents,
            graph,
            cache,
            assembler,
        }
    }

    fn scenario() -> (Researcher, MockDocuments, MockGraph) {
        let researcher = Researcher::new("A", "CS").with_interests(["x"]);
        let publication = Publication::new("P1", Some(2020)).with_authors(vec![researcher.id]);
        let documents = MockDocuments {
            publications: vec![publication],
            ..Default::default()
        };
        let graph = MockGraph {
            relations: vec![OutgoingRelation {
                relation: "AUTHOR_OF".to_string(),
                target: Some("P1".to_string()),
            }],
            ..Default::default()
        };
        (researcher, documents, graph)
    }

    #[tokio::test]
    async fn test_cold_profile_reads_once_and_writes_once() {
        let (researcher, documents, graph) = scenario();
        let f = fixture(documents, graph, MockCache::default());

        let profile = f.assembler.get_profile(&researcher).await.unwrap();

        assert_eq!(profile.publications.len(), 1);
        assert_eq!(profile.publications[0].title, "P1");
        assert_eq!(profile.publications[0].year, Some(2020));
        assert_eq!(f.cache.gets.load(Ordering::SeqCst), 1);
        assert_eq!(
            *f.cache.ttls.read().await,
            vec![Some(Duration::from_secs(60))]
        );
        assert!(f
            .cache
            .store
            .read()
            .await
            .contains_key(&profile_key(researcher.id)));
        assert_eq!(f.graph.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_warm_profile_skips_stores() {
        let (researcher, documents, graph) = scenario();
        let f = fixture(documents, graph, MockCache::default());

        let first = f.assembler.get_profile(&researcher).await.unwrap();
        let document_calls = f.documents.calls.load(Ordering::SeqCst);

        let second = f.assembler.get_profile(&researcher).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.documents.calls.load(Ordering::SeqCst), document_calls);
        assert_eq!(f.graph.calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.cache.ttls.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_recomputed() {
        let (researcher, documents, graph) = scenario();
        let f = fixture(documents, graph, MockCache::default());
        f.cache
            .store
            .write()
            .await
            .insert(profile_key(researcher.id), b"not json".to_vec());

        let profile = f.assembler.get_profile(&researcher).await.unwrap();

        assert_eq!(profile.name, "A");
        assert_eq!(f.graph.calls.load(Ordering::SeqCst), 1);
        let cached = f.cache.store.read().await[&profile_key(researcher.id)].clone();
        assert_eq!(deserialize_profile(&cached).unwrap(), profile);
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_returns_profile() {
        let (researcher, documents, graph) = scenario();
        let cache = MockCache {
            fail_writes: true,
            ..Default::default()
        };
        let f = fixture(documents, graph, cache);

        let profile = f.assembler.get_profile(&researcher).await.unwrap();

        assert_eq!(profile.collaborations.len(), 1);
        assert!(f.cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_profile_nests_project_publications() {
        let researcher = Researcher::new("A", "CS");
        let nested = Publication::new("Web Agents", Some(2024));
        let project = Project::new("AI Web Project", "Research on AI-powered web apps")
            .with_participants(vec![researcher.id])
            .with_publications(vec![nested.id]);
        let documents = MockDocuments {
            publications: vec![nested],
            projects: vec![project],
            ..Default::default()
        };
        let f = fixture(documents, MockGraph::default(), MockCache::default());

        let profile = f.assembler.get_profile(&researcher).await.unwrap();

        assert_eq!(profile.projects.len(), 1);
        assert_eq!(profile.projects[0].publications[0].title, "Web Agents");
        assert!(profile.publications.is_empty());
    }
}
