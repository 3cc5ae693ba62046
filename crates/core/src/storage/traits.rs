use async_trait::async_trait;
use uuid::Uuid;

use crate::research::{Project, Publication, Researcher};

use super::Result;

/// Repository for researcher records.
#[async_trait]
pub trait ResearcherRepository: Send + Sync {
    /// Gets a researcher by its ID.
    async fn get_researcher(&self, id: Uuid) -> Result<Option<Researcher>>;

    /// Gets all researchers in insertion order.
    async fn list_researchers(&self) -> Result<Vec<Researcher>>;

    /// Gets researchers whose name equals `name` exactly.
    async fn find_researchers_by_name(&self, name: &str) -> Result<Vec<Researcher>>;

    /// Inserts a new researcher.
    async fn create_researcher(&self, researcher: &Researcher) -> Result<()>;

    /// Appends a publication to the researcher's back-reference list.
    ///
    /// Returns `NotFound` when the researcher does not exist.
    async fn add_researcher_publication(
        &self,
        researcher_id: Uuid,
        publication_id: Uuid,
    ) -> Result<()>;
}

/// Repository for project records.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Gets a project by its ID.
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>>;

    /// Gets all projects in insertion order.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Gets projects whose participants contain `researcher_id`.
    async fn find_projects_by_participant(&self, researcher_id: Uuid) -> Result<Vec<Project>>;

    /// Inserts a new project.
    async fn create_project(&self, project: &Project) -> Result<()>;

    /// Appends a publication to the project's publication list.
    async fn add_project_publication(&self, project_id: Uuid, publication_id: Uuid)
        -> Result<()>;
}

/// Repository for publication records.
#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// Gets a publication by its ID.
    async fn get_publication(&self, id: Uuid) -> Result<Option<Publication>>;

    /// Gets all publications in insertion order.
    async fn list_publications(&self) -> Result<Vec<Publication>>;

    /// Gets the publications with the given IDs, in the order given.
    ///
    /// IDs that do not resolve are skipped.
    async fn get_publications(&self, ids: &[Uuid]) -> Result<Vec<Publication>>;

    /// Gets publications whose authors contain `researcher_id`.
    async fn find_publications_by_author(&self, researcher_id: Uuid) -> Result<Vec<Publication>>;

    /// Inserts a new publication.
    async fn create_publication(&self, publication: &Publication) -> Result<()>;
}

/// Combined trait for a document store holding all three collections.
pub trait DocumentStore: ResearcherRepository + ProjectRepository + PublicationRepository {}

impl<T: ResearcherRepository + ProjectRepository + PublicationRepository> DocumentStore for T {}
