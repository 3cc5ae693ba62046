mod error;
mod traits;
mod types;

pub use error::{GraphError, Result};
pub use traits::GraphStore;
pub use types::{CollaborationRecord, GraphNode, OutgoingRelation, COLLABORATION_LIMIT};
