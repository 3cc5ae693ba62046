//! Loads the demonstration dataset through the regular creation path.

use std::collections::HashMap;

use collabgraph_core::research::{
    seed_collaborations, seed_projects, seed_researchers, CreateCollaborationRequest,
    CreateProjectRequest, RelationKind,
};

use super::RecordService;

/// Counts of records written by [`seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub researchers: usize,
    pub projects: usize,
    pub collaborations: usize,
}

/// Seeds researchers, projects and collaborations.
///
/// Returns `None` without writing anything when researchers already exist.
pub async fn seed(records: &RecordService) -> anyhow::Result<Option<SeedSummary>> {
    if !records.list_researchers().await?.is_empty() {
        tracing::info!("Researchers already present, skipping seed");
        return Ok(None);
    }

    let mut summary = SeedSummary::default();
    let mut ids = HashMap::new();
    for request in seed_researchers() {
        let researcher = records.create_researcher(request).await?;
        ids.insert(researcher.name.clone(), researcher.id);
        summary.researchers += 1;
    }

    for seed_project in seed_projects() {
        let mut request = CreateProjectRequest::new(seed_project.title, seed_project.description);
        for name in seed_project.participants {
            if let Some(id) = ids.get(*name) {
                request = request.with_participant(*id, RelationKind::WorksOn.as_label());
            }
        }
        records.create_project(request).await?;
        summary.projects += 1;
    }

    for collaboration in seed_collaborations() {
        records
            .create_collaboration(CreateCollaborationRequest {
                researcher1: collaboration.from.to_string(),
                researcher2: collaboration.to.to_string(),
                relation: collaboration.relation.as_label().to_string(),
            })
            .await?;
        summary.collaborations += 1;
    }

    tracing::info!(
        researchers = summary.researchers,
        projects = summary.projects,
        collaborations = summary.collaborations,
        "Seed data loaded"
    );
    Ok(Some(summary))
}
