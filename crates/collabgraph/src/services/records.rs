//! Record creation with graph mirroring and profile invalidation.
//!
//! Every write goes to the document store first, then to the graph store,
//! then invalidates the cached profiles it touched. Invalidation runs as soon
//! as the document is stored, even when mirroring fails afterwards; the
//! mirroring error still fails the operation and the document stays in place.
//! A failed invalidation is only logged.

use std::sync::Arc;

use uuid::Uuid;

use collabgraph_core::cache::{profile_key, Cache};
use collabgraph_core::graph::{CollaborationRecord, GraphNode, GraphStore, COLLABORATION_LIMIT};
use collabgraph_core::research::{
    CreateCollaborationRequest, CreateProjectRequest, CreatePublicationRequest,
    CreateResearcherRequest, PlannedProject, PopulatedProject, PopulatedResearcher, Project,
    ProjectPublicationRequest, Publication, RelationKind, Researcher,
};
use collabgraph_core::storage::{
    populate_project, populate_researcher, DocumentStore, ProjectRepository, PublicationRepository,
    ResearcherRepository,
};

use crate::state::Stores;

/// Creates, lists and fetches researchers, projects, publications and
/// collaborations.
pub struct RecordService {
    documents: Arc<dyn DocumentStore>,
    graph: Arc<dyn GraphStore>,
    cache: Arc<dyn Cache>,
}

impl RecordService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            documents: stores.documents.clone(),
            graph: stores.graph.clone(),
            cache: stores.cache.clone(),
        }
    }

    pub async fn create_researcher(
        &self,
        request: CreateResearcherRequest,
    ) -> anyhow::Result<Researcher> {
        let researcher = request.into_researcher();
        self.documents.create_researcher(&researcher).await?;
        self.graph
            .upsert_node(&GraphNode::researcher(
                &researcher.name,
                &researcher.department,
            ))
            .await?;

        tracing::info!(researcher_id = %researcher.id, name = %researcher.name, "Researcher created");
        Ok(researcher)
    }

    /// Creates a publication, links it to each author and invalidates their
    /// profiles.
    ///
    /// Once the document is stored the authors' profiles are invalidated even
    /// if mirroring fails; the mirroring error is returned afterwards.
    pub async fn create_publication(
        &self,
        request: CreatePublicationRequest,
    ) -> anyhow::Result<Publication> {
        let publication = request.into_publication();
        self.documents.create_publication(&publication).await?;

        let mirrored = self.mirror_publication(&publication).await;
        self.invalidate_profiles(&publication.authors).await;
        mirrored?;

        tracing::info!(
            publication_id = %publication.id,
            title = %publication.title,
            authors = publication.authors.len(),
            "Publication created"
        );
        Ok(publication)
    }

    /// Creates a project with its participant links and nested publications.
    ///
    /// Relations are validated before anything is written. Nested
    /// publications are authored by every participant. Participants'
    /// profiles are invalidated once the project document is stored, whether
    /// or not the rest succeeds.
    pub async fn create_project(&self, request: CreateProjectRequest) -> anyhow::Result<Project> {
        let PlannedProject {
            mut project,
            links,
            publications,
        } = request.into_project()?;
        self.documents.create_project(&project).await?;

        let mirrored = self
            .mirror_project(&mut project, &links, publications)
            .await;
        self.invalidate_profiles(&project.participants).await;
        mirrored?;

        tracing::info!(
            project_id = %project.id,
            title = %project.title,
            participants = project.participants.len(),
            publications = project.publications.len(),
            "Project created"
        );
        Ok(project)
    }

    /// Links two researchers by name.
    ///
    /// Both nodes are merged by name alone, so an existing researcher of that
    /// name is reused whatever its department.
    pub async fn create_collaboration(
        &self,
        request: CreateCollaborationRequest,
    ) -> anyhow::Result<CollaborationRecord> {
        let relation = request.relation_kind()?;
        let CreateCollaborationRequest {
            researcher1,
            researcher2,
            ..
        } = request;

        let mirrored = self
            .mirror_collaboration(&researcher1, relation, &researcher2)
            .await;
        self.invalidate_profiles_named(std::slice::from_ref(&researcher1))
            .await;
        mirrored?;

        tracing::info!(from = %researcher1, to = %researcher2, %relation, "Collaboration created");
        Ok(CollaborationRecord {
            researcher: researcher1,
            relation: relation.as_label().to_string(),
            target: Some(researcher2),
        })
    }

    /// Deletes the cached profile of every listed researcher and of every
    /// researcher sharing a name with one of them.
    ///
    /// Graph edges hang off every Researcher node with a given name, so a new
    /// edge shows up in all of their profiles. Lookup failures are logged and
    /// the listed ids are still invalidated.
    pub async fn invalidate_profiles(&self, researcher_ids: &[Uuid]) {
        let mut names: Vec<String> = Vec::new();
        for researcher_id in researcher_ids {
            match self.documents.get_researcher(*researcher_id).await {
                Ok(Some(researcher)) => {
                    if !names.contains(&researcher.name) {
                        names.push(researcher.name);
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(%researcher_id, error = %err, "Failed to resolve researcher for invalidation");
                }
            }
        }

        let mut affected = researcher_ids.to_vec();
        affected.extend(self.namesakes(&names).await);
        self.delete_profiles(&affected).await;
    }

    /// Deletes the cached profile of every researcher with one of `names`.
    pub async fn invalidate_profiles_named(&self, names: &[String]) {
        let affected = self.namesakes(names).await;
        self.delete_profiles(&affected).await;
    }

    pub async fn list_researchers(&self) -> anyhow::Result<Vec<PopulatedResearcher>> {
        let researchers = self.documents.list_researchers().await?;
        let mut populated = Vec::with_capacity(researchers.len());
        for researcher in researchers {
            populated.push(populate_researcher(self.documents.as_ref(), researcher).await?);
        }
        Ok(populated)
    }

    pub async fn get_researcher(&self, id: Uuid) -> anyhow::Result<Option<PopulatedResearcher>> {
        match self.documents.get_researcher(id).await? {
            Some(researcher) => Ok(Some(
                populate_researcher(self.documents.as_ref(), researcher).await?,
            )),
            None => Ok(None),
        }
    }

    /// Gets the stored researcher record without resolving references.
    pub async fn researcher_record(&self, id: Uuid) -> anyhow::Result<Option<Researcher>> {
        Ok(self.documents.get_researcher(id).await?)
    }

    pub async fn list_projects(&self) -> anyhow::Result<Vec<PopulatedProject>> {
        let projects = self.documents.list_projects().await?;
        let mut populated = Vec::with_capacity(projects.len());
        for project in projects {
            populated.push(populate_project(self.documents.as_ref(), project).await?);
        }
        Ok(populated)
    }

    pub async fn get_project(&self, id: Uuid) -> anyhow::Result<Option<PopulatedProject>> {
        match self.documents.get_project(id).await? {
            Some(project) => Ok(Some(
                populate_project(self.documents.as_ref(), project).await?,
            )),
            None => Ok(None),
        }
    }

    pub async fn list_publications(&self) -> anyhow::Result<Vec<Publication>> {
        Ok(self.documents.list_publications().await?)
    }

    pub async fn get_publication(&self, id: Uuid) -> anyhow::Result<Option<Publication>> {
        Ok(self.documents.get_publication(id).await?)
    }

    /// Gets researcher edges from the graph, at most 50.
    pub async fn list_collaborations(&self) -> anyhow::Result<Vec<CollaborationRecord>> {
        Ok(self.graph.list_collaborations(COLLABORATION_LIMIT).await?)
    }

    // Graph node, then back-reference and AUTHOR_OF edge per resolvable
    // author.
    async fn mirror_publication(&self, publication: &Publication) -> anyhow::Result<()> {
        let node = GraphNode::publication(&publication.title, publication.year);
        self.graph.upsert_node(&node).await?;

        for author_id in &publication.authors {
            let Some(author) = self.documents.get_researcher(*author_id).await? else {
                tracing::warn!(%author_id, publication_id = %publication.id, "Unknown author skipped");
                continue;
            };
            self.documents
                .add_researcher_publication(author.id, publication.id)
                .await?;
            self.graph
                .upsert_edge(&author.name, RelationKind::AuthorOf, &node)
                .await?;
        }
        Ok(())
    }

    async fn mirror_project(
        &self,
        project: &mut Project,
        links: &[(Uuid, RelationKind)],
        publications: Vec<ProjectPublicationRequest>,
    ) -> anyhow::Result<()> {
        let node = GraphNode::project(&project.title);
        self.graph.upsert_node(&node).await?;

        for (researcher_id, relation) in links {
            match self.documents.get_researcher(*researcher_id).await? {
                Some(researcher) => {
                    self.graph
                        .upsert_edge(&researcher.name, *relation, &node)
                        .await?;
                }
                None => {
                    tracing::warn!(%researcher_id, project_id = %project.id, "Unknown participant skipped");
                }
            }
        }

        for nested in publications {
            let publication = Publication::new(nested.title, nested.year)
                .with_authors(project.participants.clone());
            self.documents.create_publication(&publication).await?;
            self.documents
                .add_project_publication(project.id, publication.id)
                .await?;
            project.publications.push(publication.id);
            self.mirror_publication(&publication).await?;
        }
        Ok(())
    }

    async fn mirror_collaboration(
        &self,
        from: &str,
        relation: RelationKind,
        to: &str,
    ) -> anyhow::Result<()> {
        let target = GraphNode::researcher_named(to);
        self.graph
            .upsert_node(&GraphNode::researcher_named(from))
            .await?;
        self.graph.upsert_node(&target).await?;
        self.graph.upsert_edge(from, relation, &target).await?;
        Ok(())
    }

    async fn namesakes(&self, names: &[String]) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for name in names {
            match self.documents.find_researchers_by_name(name).await {
                Ok(researchers) => ids.extend(researchers.iter().map(|r| r.id)),
                Err(err) => {
                    tracing::warn!(%name, error = %err, "Failed to look up researchers for invalidation");
                }
            }
        }
        ids
    }

    async fn delete_profiles(&self, researcher_ids: &[Uuid]) {
        let mut deleted: Vec<Uuid> = Vec::with_capacity(researcher_ids.len());
        for researcher_id in researcher_ids {
            if deleted.contains(researcher_id) {
                continue;
            }
            deleted.push(*researcher_id);
            if let Err(err) = self.cache.delete(&profile_key(*researcher_id)).await {
                tracing::warn!(%researcher_id, error = %err, "Failed to invalidate profile");
            }
        }
    }
}
