use async_trait::async_trait;

use crate::research::RelationKind;

use super::{CollaborationRecord, GraphNode, OutgoingRelation, Result};

/// Graph store holding mirrored nodes and typed relationship edges.
///
/// Writes use merge semantics: a node or edge that already exists is reused.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Creates the node unless an existing node matches the pattern.
    async fn upsert_node(&self, node: &GraphNode) -> Result<()>;

    /// Merges `target` and a `relation` edge to it from every Researcher node
    /// named `researcher_name`.
    ///
    /// Nothing is written when no researcher has that name.
    async fn upsert_edge(
        &self,
        researcher_name: &str,
        relation: RelationKind,
        target: &GraphNode,
    ) -> Result<()>;

    /// Gets all outgoing edges of the Researcher nodes named `researcher_name`.
    async fn outgoing_relations(&self, researcher_name: &str) -> Result<Vec<OutgoingRelation>>;

    /// Gets outgoing edges of all researchers, at most `limit` rows.
    async fn list_collaborations(&self, limit: usize) -> Result<Vec<CollaborationRecord>>;

    /// Round-trips a trivial query to check connectivity.
    async fn ping(&self) -> Result<()>;
}
