use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A researcher record, owned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Researcher {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Back-references to publications this researcher authored.
    #[serde(default)]
    pub publications: Vec<Uuid>,
}

impl Researcher {
    /// Creates a new researcher with a fresh ID and no publications.
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            department: department.into(),
            interests: Vec::new(),
            publications: Vec::new(),
        }
    }

    /// Sets the interest tags.
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Sets a specific ID for this researcher (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A research project with ordered participant and publication references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub participants: Vec<Uuid>,
    #[serde(default)]
    pub publications: Vec<Uuid>,
}

impl Project {
    /// Creates a new project with a fresh ID.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            participants: Vec::new(),
            publications: Vec::new(),
        }
    }

    /// Sets the participant list.
    pub fn with_participants(mut self, participants: Vec<Uuid>) -> Self {
        self.participants = participants;
        self
    }

    /// Sets the publication list.
    pub fn with_publications(mut self, publications: Vec<Uuid>) -> Self {
        self.publications = publications;
        self
    }

    /// Sets a specific ID for this project (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A publication with its author references.
///
/// `year` is optional because creation accepts any field as missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub authors: Vec<Uuid>,
}

impl Publication {
    /// Creates a new publication with a fresh ID and no authors.
    pub fn new(title: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            year,
            authors: Vec::new(),
        }
    }

    /// Sets the author list.
    pub fn with_authors(mut self, authors: Vec<Uuid>) -> Self {
        self.authors = authors;
        self
    }

    /// Sets a specific ID for this publication (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns true if `researcher_id` is listed as an author.
    pub fn has_author(&self, researcher_id: Uuid) -> bool {
        self.authors.contains(&researcher_id)
    }
}

/// A researcher with its publication references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedResearcher {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub interests: Vec<String>,
    pub publications: Vec<Publication>,
}

impl PopulatedResearcher {
    /// Builds a populated view from a researcher and its resolved publications.
    pub fn new(researcher: Researcher, publications: Vec<Publication>) -> Self {
        Self {
            id: researcher.id,
            name: researcher.name,
            department: researcher.department,
            interests: researcher.interests,
            publications,
        }
    }
}

/// A project with its participant and publication references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedProject {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub participants: Vec<Researcher>,
    pub publications: Vec<Publication>,
}

impl PopulatedProject {
    /// Builds a populated view from a project and its resolved references.
    pub fn new(
        project: Project,
        participants: Vec<Researcher>,
        publications: Vec<Publication>,
    ) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            participants,
            publications,
        }
    }
}
