use serde::{Deserialize, Serialize};

/// Maximum number of rows returned by a collaboration listing.
pub const COLLABORATION_LIMIT: usize = 50;

/// A node pattern in the graph store.
///
/// Optional properties that are `None` are left out of a Researcher pattern,
/// so `Researcher { name, department: None }` merges with any researcher of
/// that name. A publication without a year is its own key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "label")]
pub enum GraphNode {
    Researcher {
        name: String,
        department: Option<String>,
    },
    Project {
        title: String,
    },
    Publication {
        title: String,
        year: Option<i32>,
    },
}

impl GraphNode {
    /// A researcher keyed by name and department.
    pub fn researcher(name: impl Into<String>, department: impl Into<String>) -> Self {
        GraphNode::Researcher {
            name: name.into(),
            department: Some(department.into()),
        }
    }

    /// A researcher keyed by name only.
    pub fn researcher_named(name: impl Into<String>) -> Self {
        GraphNode::Researcher {
            name: name.into(),
            department: None,
        }
    }

    /// A project keyed by title.
    pub fn project(title: impl Into<String>) -> Self {
        GraphNode::Project {
            title: title.into(),
        }
    }

    /// A publication keyed by title and year.
    pub fn publication(title: impl Into<String>, year: Option<i32>) -> Self {
        GraphNode::Publication {
            title: title.into(),
            year,
        }
    }

    /// The node label.
    pub fn label(&self) -> &'static str {
        match self {
            GraphNode::Researcher { .. } => "Researcher",
            GraphNode::Project { .. } => "Project",
            GraphNode::Publication { .. } => "Publication",
        }
    }

    /// The text shown for this node as a relationship target.
    pub fn display_name(&self) -> &str {
        match self {
            GraphNode::Researcher { name, .. } => name,
            GraphNode::Project { title } => title,
            GraphNode::Publication { title, .. } => title,
        }
    }

    /// Returns true if an existing node satisfies this pattern.
    ///
    /// Mirrors `MERGE` matching: every property present in the pattern must be
    /// equal on the existing node.
    pub fn is_matched_by(&self, existing: &GraphNode) -> bool {
        match (self, existing) {
            (
                GraphNode::Researcher { name, department },
                GraphNode::Researcher {
                    name: existing_name,
                    department: existing_department,
                },
            ) => {
                name == existing_name
                    && (department.is_none() || department == existing_department)
            }
            (GraphNode::Project { title }, GraphNode::Project { title: existing }) => {
                title == existing
            }
            (
                GraphNode::Publication { title, year },
                GraphNode::Publication {
                    title: existing_title,
                    year: existing_year,
                },
            ) => title == existing_title && year == existing_year,
            _ => false,
        }
    }
}

/// An outgoing edge of one researcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingRelation {
    pub relation: String,
    /// Title of a project/publication target, or name of a researcher target.
    pub target: Option<String>,
}

/// One row of the collaboration listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationRecord {
    pub researcher: String,
    pub relation: String,
    pub target: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only_researcher_matches_any_department() {
        let pattern = GraphNode::researcher_named("A");

        assert!(pattern.is_matched_by(&GraphNode::researcher("A", "CS")));
        assert!(pattern.is_matched_by(&GraphNode::researcher_named("A")));
        assert!(!pattern.is_matched_by(&GraphNode::researcher("B", "CS")));
    }

    #[test]
    fn test_researcher_with_department_requires_department() {
        let pattern = GraphNode::researcher("A", "CS");

        assert!(pattern.is_matched_by(&GraphNode::researcher("A", "CS")));
        assert!(!pattern.is_matched_by(&GraphNode::researcher("A", "Physics")));
        assert!(!pattern.is_matched_by(&GraphNode::researcher_named("A")));
    }

    #[test]
    fn test_publication_key_includes_year() {
        let pattern = GraphNode::publication("P1", Some(2020));

        assert!(pattern.is_matched_by(&GraphNode::publication("P1", Some(2020))));
        assert!(!pattern.is_matched_by(&GraphNode::publication("P1", Some(2021))));
        assert!(!pattern.is_matched_by(&GraphNode::publication("P1", None)));
    }

    #[test]
    fn test_labels_never_cross_match() {
        let project = GraphNode::project("Same");
        let publication = GraphNode::publication("Same", None);

        assert!(!project.is_matched_by(&publication));
        assert!(!publication.is_matched_by(&project));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(GraphNode::researcher("A", "CS").display_name(), "A");
        assert_eq!(GraphNode::project("AI Web Project").display_name(), "AI Web Project");
    }
}
