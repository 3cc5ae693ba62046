mod profile;
mod relation;
mod requests;
mod seed;
mod types;

pub use profile::{
    assemble_profile, Profile, ProfileCollaboration, ProfileProject, PublicationSummary,
    PROFILE_TTL_SECONDS,
};
pub use relation::{normalize_label, RelationError, RelationKind};
pub use requests::{
    CreateCollaborationRequest, CreateProjectRequest, CreatePublicationRequest,
    CreateResearcherRequest, ParticipantRequest, PlannedProject, ProjectPublicationRequest,
};
pub use seed::{
    seed_collaborations, seed_projects, seed_researchers, SeedCollaboration, SeedProject,
};
pub use types::{PopulatedProject, PopulatedResearcher, Project, Publication, Researcher};
