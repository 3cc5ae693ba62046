mod error;
mod http_mapping;
mod populate;
mod traits;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use populate::{populate_project, populate_researcher, projects_with_publications};
pub use traits::{DocumentStore, ProjectRepository, PublicationRepository, ResearcherRepository};
