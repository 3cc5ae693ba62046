//! Demonstration dataset for seeding.
//!
//! Pure data: the binary feeds it through the regular creation path so the
//! document store, graph store and cache stay consistent.

use super::relation::RelationKind;
use super::requests::CreateResearcherRequest;

/// A project to seed, with participants referenced by researcher name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedProject {
    pub title: &'static str,
    pub description: &'static str,
    pub participants: &'static [&'static str],
}

/// A researcher-to-researcher link to seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCollaboration {
    pub from: &'static str,
    pub to: &'static str,
    pub relation: RelationKind,
}

/// The seeded researchers.
pub fn seed_researchers() -> Vec<CreateResearcherRequest> {
    vec![
        CreateResearcherRequest::new("Ayat Sider", "Computer Science")
            .with_interests(["AI", "Web"]),
        CreateResearcherRequest::new("Omar Khalil", "Physics")
            .with_interests(["Quantum", "Optics"]),
        CreateResearcherRequest::new("Lina Fares", "Biology")
            .with_interests(["Genetics", "Microbiology"]),
    ]
}

/// The seeded projects. Participants are linked with `WORKS_ON`.
pub fn seed_projects() -> Vec<SeedProject> {
    vec![
        SeedProject {
            title: "AI Web Project",
            description: "Research on AI-powered web apps",
            participants: &["Ayat Sider"],
        },
        SeedProject {
            title: "Quantum Optics Study",
            description: "Study of photons in quantum optics",
            participants: &["Omar Khalil"],
        },
    ]
}

/// The seeded researcher-to-researcher collaborations.
pub fn seed_collaborations() -> Vec<SeedCollaboration> {
    vec![SeedCollaboration {
        from: "Ayat Sider",
        to: "Lina Fares",
        relation: RelationKind::CollaboratesWith,
    }]
}
