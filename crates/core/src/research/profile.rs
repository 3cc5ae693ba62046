//! The denormalized researcher profile and its pure assembly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::graph::OutgoingRelation;

use super::types::{Project, Publication, Researcher};

/// Profile time-to-live in seconds.
pub const PROFILE_TTL_SECONDS: u64 = 60;

/// A publication as it appears inside a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationSummary {
    pub title: String,
    pub year: Option<i32>,
}

impl From<&Publication> for PublicationSummary {
    fn from(publication: &Publication) -> Self {
        Self {
            title: publication.title.clone(),
            year: publication.year,
        }
    }
}

/// A project as it appears inside a profile, with its publications nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileProject {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub publications: Vec<PublicationSummary>,
}

/// One outgoing graph relationship of the researcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCollaboration {
    pub relation: String,
    pub target: Option<String>,
}

/// Snapshot of everything known about a researcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub interests: Vec<String>,
    pub projects: Vec<ProfileProject>,
    pub publications: Vec<PublicationSummary>,
    pub collaborations: Vec<ProfileCollaboration>,
}

/// Builds a profile from the three source fetches.
///
/// Output order does not depend on the order the stores returned rows in:
/// publications sort by year then title, projects by title, collaborations by
/// relation then target.
pub fn assemble_profile(
    researcher: &Researcher,
    publications: &[Publication],
    projects: &[(Project, Vec<Publication>)],
    relations: &[OutgoingRelation],
) -> Profile {
    let publications = summarize(publications);

    let mut projects: Vec<ProfileProject> = projects
        .iter()
        .map(|(project, nested)| ProfileProject {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            publications: summarize(nested),
        })
        .collect();
    projects.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

    let mut collaborations: Vec<ProfileCollaboration> = relations
        .iter()
        .map(|r| ProfileCollaboration {
            relation: r.relation.clone(),
            target: r.target.clone(),
        })
        .collect();
    collaborations.sort_by(|a, b| a.relation.cmp(&b.relation).then(a.target.cmp(&b.target)));

    Profile {
        id: researcher.id,
        name: researcher.name.clone(),
        department: researcher.department.clone(),
        interests: researcher.interests.clone(),
        projects,
        publications,
        collaborations,
    }
}

fn summarize(publications: &[Publication]) -> Vec<PublicationSummary> {
    let mut summaries: Vec<PublicationSummary> =
        publications.iter().map(PublicationSummary::from).collect();
    summaries.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.title.cmp(&b.title)));
    summaries
}
