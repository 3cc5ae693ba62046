//! Relationship kinds stored as typed graph edges.
//!
//! Relation labels end up inside graph query text, so only the closed set in
//! [`RelationKind`] is ever accepted. Free text from users is normalized and
//! then matched against that set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a relation label.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelationError {
    #[error("Invalid relation type: {0:?} (expected one of {expected})", expected = RelationKind::accepted_labels())]
    Unknown(String),
}

/// The closed set of edge types a researcher can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    /// Researcher wrote a publication.
    AuthorOf,
    /// Researcher participates in a project.
    WorksOn,
    /// Generic researcher-to-researcher collaboration.
    CollaboratesWith,
    CoAuthorship,
    Supervision,
    Teamwork,
}

impl RelationKind {
    /// Every kind, in declaration order.
    pub const ALL: [RelationKind; 6] = [
        RelationKind::AuthorOf,
        RelationKind::WorksOn,
        RelationKind::CollaboratesWith,
        RelationKind::CoAuthorship,
        RelationKind::Supervision,
        RelationKind::Teamwork,
    ];

    /// Returns the edge label used in the graph store.
    pub fn as_label(&self) -> &'static str {
        match self {
            RelationKind::AuthorOf => "AUTHOR_OF",
            RelationKind::WorksOn => "WORKS_ON",
            RelationKind::CollaboratesWith => "COLLABORATES_WITH",
            RelationKind::CoAuthorship => "CO_AUTHORSHIP",
            RelationKind::Supervision => "SUPERVISION",
            RelationKind::Teamwork => "TEAMWORK",
        }
    }

    /// Parses a label that has already been normalized.
    ///
    /// The role nouns used by the collaboration API (`CO_AUTHOR`,
    /// `SUPERVISOR`, `TEAMMATE`) map onto their relationship kinds.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "AUTHOR_OF" => Some(RelationKind::AuthorOf),
            "WORKS_ON" => Some(RelationKind::WorksOn),
            "COLLABORATES_WITH" => Some(RelationKind::CollaboratesWith),
            "CO_AUTHORSHIP" | "CO_AUTHOR" => Some(RelationKind::CoAuthorship),
            "SUPERVISION" | "SUPERVISOR" => Some(RelationKind::Supervision),
            "TEAMWORK" | "TEAMMATE" => Some(RelationKind::Teamwork),
            _ => None,
        }
    }

    /// Parses free text such as `co-authorship` or `Team Work`.
    pub fn parse(input: &str) -> Result<Self, RelationError> {
        let label = normalize_label(input);
        Self::from_label(&label).ok_or_else(|| RelationError::Unknown(input.to_string()))
    }

    /// Parses free text, treating blank input as [`RelationKind::WorksOn`].
    pub fn parse_participation(input: &str) -> Result<Self, RelationError> {
        if input.trim().is_empty() {
            return Ok(RelationKind::WorksOn);
        }
        Self::parse(input)
    }

    fn accepted_labels() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl FromStr for RelationKind {
    type Err = RelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Upper-cases the input and replaces hyphens and whitespace runs with `_`.
///
/// # Examples
///
/// ```
/// use collabgraph_core::research::normalize_label;
///
/// assert_eq!(normalize_label("co-authorship"), "CO_AUTHORSHIP");
/// assert_eq!(normalize_label("  works  on "), "WORKS_ON");
/// ```
pub fn normalize_label(input: &str) -> String {
    input
        .trim()
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}
