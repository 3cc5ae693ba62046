//! Operations shared by the HTTP API and the interactive menu.

mod profile;
mod records;
mod seed;

pub use profile::ProfileAssembler;
pub use records::RecordService;
pub use seed::{seed, SeedSummary};
