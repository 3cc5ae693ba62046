//! API request types for record creation.
//!
//! Shared by the HTTP handlers and the interactive menu. Creation accepts any
//! field as missing, so every field defaults.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::relation::{RelationError, RelationKind};
use super::types::{Project, Publication, Researcher};

/// Request payload for creating a researcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateResearcherRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl CreateResearcherRequest {
    /// Create a request with a name and department.
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            interests: Vec::new(),
        }
    }

    /// Set the interest tags.
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Convert into a new researcher record.
    pub fn into_researcher(self) -> Researcher {
        Researcher::new(self.name, self.department).with_interests(self.interests)
    }
}

/// A project participant together with the relation text describing the link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRequest {
    pub researcher_id: Uuid,
    /// Free-text relation such as `co-authorship`; blank means `WORKS_ON`.
    #[serde(default)]
    pub relation: String,
}

/// A publication created together with a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPublicationRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Request payload for creating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub participants: Vec<ParticipantRequest>,
    /// Publications authored by all participants, created alongside the project.
    #[serde(default)]
    pub publications: Vec<ProjectPublicationRequest>,
}

impl CreateProjectRequest {
    /// Create a request with a title and description.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            participants: Vec::new(),
            publications: Vec::new(),
        }
    }

    /// Add a participant with a relation text.
    pub fn with_participant(mut self, researcher_id: Uuid, relation: impl Into<String>) -> Self {
        self.participants.push(ParticipantRequest {
            researcher_id,
            relation: relation.into(),
        });
        self
    }

    /// Add a publication to create with the project.
    pub fn with_publication(mut self, title: impl Into<String>, year: Option<i32>) -> Self {
        self.publications.push(ProjectPublicationRequest {
            title: title.into(),
            year,
        });
        self
    }

    /// Validates every participant relation before anything is written.
    ///
    /// Returns the new project record (without publications) and the
    /// participant links in request order.
    pub fn into_project(self) -> Result<PlannedProject, RelationError> {
        let links = self
            .participants
            .iter()
            .map(|p| Ok((p.researcher_id, RelationKind::parse_participation(&p.relation)?)))
            .collect::<Result<Vec<_>, RelationError>>()?;

        let participants = links.iter().map(|(id, _)| *id).collect();
        let project = Project::new(self.title, self.description).with_participants(participants);

        Ok(PlannedProject {
            project,
            links,
            publications: self.publications,
        })
    }
}

/// A validated project creation, ready to be written.
#[derive(Debug, Clone)]
pub struct PlannedProject {
    pub project: Project,
    pub links: Vec<(Uuid, RelationKind)>,
    pub publications: Vec<ProjectPublicationRequest>,
}

/// Request payload for creating a publication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePublicationRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub authors: Vec<Uuid>,
}

impl CreatePublicationRequest {
    /// Create a request with a title and year.
    pub fn new(title: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            title: title.into(),
            year,
            authors: Vec::new(),
        }
    }

    /// Set the authors.
    pub fn with_authors(mut self, authors: Vec<Uuid>) -> Self {
        self.authors = authors;
        self
    }

    /// Convert into a new publication record.
    ///
    /// Repeated authors are kept once, in first-seen order.
    pub fn into_publication(self) -> Publication {
        let mut authors = Vec::with_capacity(self.authors.len());
        for author in self.authors {
            if !authors.contains(&author) {
                authors.push(author);
            }
        }
        Publication::new(self.title, self.year).with_authors(authors)
    }
}

/// Request payload for linking two researchers by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollaborationRequest {
    pub researcher1: String,
    pub researcher2: String,
    /// Free-text relation such as `co-author`, `supervisor` or `teammate`.
    #[serde(rename = "type")]
    pub relation: String,
}

impl CreateCollaborationRequest {
    /// Parses the relation text into a validated kind.
    pub fn relation_kind(&self) -> Result<RelationKind, RelationError> {
        RelationKind::parse(&self.relation)
    }
}
