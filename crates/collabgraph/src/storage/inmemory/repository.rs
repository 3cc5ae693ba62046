//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use collabgraph_core::research::{Project, Publication, Researcher};
use collabgraph_core::storage::{
    ProjectRepository, PublicationRepository, RepositoryError, ResearcherRepository, Result,
};

/// Records keyed by ID, remembering insertion order for listings.
#[derive(Debug)]
struct Collection<T> {
    order: Vec<Uuid>,
    records: HashMap<Uuid, T>,
}

impl<T: Clone> Collection<T> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            records: HashMap::new(),
        }
    }

    fn get(&self, id: &Uuid) -> Option<T> {
        self.records.get(id).cloned()
    }

    fn insert(&mut self, entity_type: &'static str, id: Uuid, record: T) -> Result<()> {
        if self.records.contains_key(&id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type,
                id: id.to_string(),
            });
        }
        self.order.push(id);
        self.records.insert(id, record);
        Ok(())
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

/// In-memory storage backend.
///
/// Clones share the same collections.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    researchers: Arc<RwLock<Collection<Researcher>>>,
    projects: Arc<RwLock<Collection<Project>>>,
    publications: Arc<RwLock<Collection<Publication>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            researchers: Arc::new(RwLock::new(Collection::new())),
            projects: Arc::new(RwLock::new(Collection::new())),
            publications: Arc::new(RwLock::new(Collection::new())),
        }
    }
}

#[async_trait]
impl ResearcherRepository for InMemoryRepository {
    async fn get_researcher(&self, id: Uuid) -> Result<Option<Researcher>> {
        Ok(self.researchers.read().await.get(&id))
    }

    async fn list_researchers(&self) -> Result<Vec<Researcher>> {
        Ok(self.researchers.read().await.iter().cloned().collect())
    }

    async fn find_researchers_by_name(&self, name: &str) -> Result<Vec<Researcher>> {
        let researchers = self.researchers.read().await;
        Ok(researchers
            .iter()
            .filter(|r| r.name == name)
            .cloned()
            .collect())
    }

    async fn create_researcher(&self, researcher: &Researcher) -> Result<()> {
        let mut researchers = self.researchers.write().await;
        researchers.insert("Researcher", researcher.id, researcher.clone())
    }

    async fn add_researcher_publication(
        &self,
        researcher_id: Uuid,
        publication_id: Uuid,
    ) -> Result<()> {
        let mut researchers = self.researchers.write().await;
        let researcher = researchers
            .records
            .get_mut(&researcher_id)
            .ok_or_else(|| RepositoryError::not_found("Researcher", researcher_id))?;
        if !researcher.publications.contains(&publication_id) {
            researcher.publications.push(publication_id);
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryRepository {
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        Ok(self.projects.read().await.get(&id))
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.read().await.iter().cloned().collect())
    }

    async fn find_projects_by_participant(&self, researcher_id: Uuid) -> Result<Vec<Project>> {
        let projects = self.projects.read().await;
        Ok(projects
            .iter()
            .filter(|p| p.participants.contains(&researcher_id))
            .cloned()
            .collect())
    }

    async fn create_project(&self, project: &Project) -> Result<()> {
        let mut projects = self.projects.write().await;
        projects.insert("Project", project.id, project.clone())
    }

    async fn add_project_publication(
        &self,
        project_id: Uuid,
        publication_id: Uuid,
    ) -> Result<()> {
        let mut projects = self.projects.write().await;
        let project = projects
            .records
            .get_mut(&project_id)
            .ok_or_else(|| RepositoryError::not_found("Project", project_id))?;
        if !project.publications.contains(&publication_id) {
            project.publications.push(publication_id);
        }
        Ok(())
    }
}

#[async_trait]
impl PublicationRepository for InMemoryRepository {
    async fn get_publication(&self, id: Uuid) -> Result<Option<Publication>> {
        Ok(self.publications.read().await.get(&id))
    }

    async fn list_publications(&self) -> Result<Vec<Publication>> {
        Ok(self.publications.read().await.iter().cloned().collect())
    }

    async fn get_publications(&self, ids: &[Uuid]) -> Result<Vec<Publication>> {
        let publications = self.publications.read().await;
        Ok(ids.iter().filter_map(|id| publications.get(id)).collect())
    }

    async fn find_publications_by_author(&self, researcher_id: Uuid) -> Result<Vec<Publication>> {
        let publications = self.publications.read().await;
        Ok(publications
            .iter()
            .filter(|p| p.has_author(researcher_id))
            .cloned()
            .collect())
    }

    async fn create_publication(&self, publication: &Publication) -> Result<()> {
        let mut publications = self.publications.write().await;
        publications.insert("Publication", publication.id, publication.clone())
    }
}
