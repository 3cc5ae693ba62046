//! Resolves id references into records.
//!
//! Generic over any [`DocumentStore`], including trait objects, so every
//! backend shares one populate step.

use uuid::Uuid;

use crate::research::{PopulatedProject, PopulatedResearcher, Project, Publication, Researcher};

use super::{DocumentStore, Result};

/// Resolves a researcher's publication back-references.
pub async fn populate_researcher<S>(store: &S, researcher: Researcher) -> Result<PopulatedResearcher>
where
    S: DocumentStore + ?Sized,
{
    let publications = store.get_publications(&researcher.publications).await?;
    Ok(PopulatedResearcher::new(researcher, publications))
}

/// Resolves a project's participants and publications.
///
/// Participant IDs that no longer resolve are left out.
pub async fn populate_project<S>(store: &S, project: Project) -> Result<PopulatedProject>
where
    S: DocumentStore + ?Sized,
{
    let mut participants = Vec::with_capacity(project.participants.len());
    for id in &project.participants {
        if let Some(researcher) = store.get_researcher(*id).await? {
            participants.push(researcher);
        }
    }
    let publications = store.get_publications(&project.publications).await?;
    Ok(PopulatedProject::new(project, participants, publications))
}

/// Gets the projects a researcher participates in, each with its publications.
pub async fn projects_with_publications<S>(
    store: &S,
    researcher_id: Uuid,
) -> Result<Vec<(Project, Vec<Publication>)>>
where
    S: DocumentStore + ?Sized,
{
    let projects = store.find_projects_by_participant(researcher_id).await?;
    let mut populated = Vec::with_capacity(projects.len());
    for project in projects {
        let publications = store.get_publications(&project.publications).await?;
        populated.push((project, publications));
    }
    Ok(populated)
}
