//! In-memory graph store.
//!
//! Nodes live in a Vec and are addressed by index. Edges are
//! `(source, relation, target)` triples, deduplicated on insert and kept in
//! insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use collabgraph_core::graph::{
    CollaborationRecord, GraphNode, GraphStore, OutgoingRelation, Result,
};
use collabgraph_core::research::RelationKind;

type Edge = (usize, RelationKind, usize);

#[derive(Debug, Default)]
struct GraphData {
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
}

impl GraphData {
    /// Indices of every node matching `pattern`.
    fn matching(&self, pattern: &GraphNode) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| pattern.is_matched_by(node))
            .map(|(index, _)| index)
            .collect()
    }

    /// Indices of matching nodes, creating one when none match.
    fn merge_node(&mut self, pattern: &GraphNode) -> Vec<usize> {
        let found = self.matching(pattern);
        if !found.is_empty() {
            return found;
        }
        self.nodes.push(pattern.clone());
        vec![self.nodes.len() - 1]
    }

    fn merge_edge(&mut self, edge: Edge) {
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    fn target_name(&self, index: usize) -> Option<String> {
        self.nodes.get(index).map(|n| n.display_name().to_string())
    }
}

/// In-memory graph store.
///
/// Clones share the same graph.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    data: Arc<RwLock<GraphData>>,
}

impl MemoryGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the graph.
    #[cfg(test)]
    pub async fn node_count(&self) -> usize {
        self.data.read().await.nodes.len()
    }

    /// Number of edges in the graph.
    #[cfg(test)]
    pub async fn edge_count(&self) -> usize {
        self.data.read().await.edges.len()
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn upsert_node(&self, node: &GraphNode) -> Result<()> {
        self.data.write().await.merge_node(node);
        Ok(())
    }

    async fn upsert_edge(
        &self,
        researcher_name: &str,
        relation: RelationKind,
        target: &GraphNode,
    ) -> Result<()> {
        let mut data = self.data.write().await;

        let sources = data.matching(&GraphNode::researcher_named(researcher_name));
        if sources.is_empty() {
            return Ok(());
        }

        let targets = data.merge_node(target);
        for &source in &sources {
            for &target in &targets {
                data.merge_edge((source, relation, target));
            }
        }
        Ok(())
    }

    async fn outgoing_relations(&self, researcher_name: &str) -> Result<Vec<OutgoingRelation>> {
        let data = self.data.read().await;
        let sources = data.matching(&GraphNode::researcher_named(researcher_name));

        Ok(data
            .edges
            .iter()
            .filter(|(source, _, _)| sources.contains(source))
            .map(|&(_, relation, target)| OutgoingRelation {
                relation: relation.as_label().to_string(),
                target: data.target_name(target),
            })
            .collect())
    }

    async fn list_collaborations(&self, limit: usize) -> Result<Vec<CollaborationRecord>> {
        let data = self.data.read().await;

        Ok(data
            .edges
            .iter()
            .filter_map(|&(source, relation, target)| match data.nodes.get(source) {
                Some(GraphNode::Researcher { name, .. }) => Some(CollaborationRecord {
                    researcher: name.clone(),
                    relation: relation.as_label().to_string(),
                    target: data.target_name(target),
                }),
                _ => None,
            })
            .take(limit)
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabgraph_core::graph::COLLABORATION_LIMIT;

    #[tokio::test]
    async fn test_upsert_same_node_twice_yields_one_node() {
        let graph = MemoryGraph::new();
        let node = GraphNode::researcher("A", "CS");

        graph.upsert_node(&node).await.unwrap();
        graph.upsert_node(&node).await.unwrap();

        assert_eq!(graph.node_count().await, 1);
    }

    #[tokio::test]
    async fn test_name_only_merge_reuses_existing_researcher() {
        let graph = MemoryGraph::new();
        graph
            .upsert_node(&GraphNode::researcher("A", "CS"))
            .await
            .unwrap();

        graph
            .upsert_node(&GraphNode::researcher_named("A"))
            .await
            .unwrap();

        assert_eq!(graph.node_count().await, 1);
    }

    #[tokio::test]
    async fn test_edge_without_source_writes_nothing() {
        let graph = MemoryGraph::new();

        graph
            .upsert_edge("Nobody", RelationKind::WorksOn, &GraphNode::project("P"))
            .await
            .unwrap();

        assert_eq!(graph.node_count().await, 0);
        assert_eq!(graph.edge_count().await, 0);
    }

    #[tokio::test]
    async fn test_same_edge_is_created_once_and_kinds_coexist() {
        let graph = MemoryGraph::new();
        let project = GraphNode::project("AI Web Project");
        graph
            .upsert_node(&GraphNode::researcher("A", "CS"))
            .await
            .unwrap();

        graph
            .upsert_edge("A", RelationKind::WorksOn, &project)
            .await
            .unwrap();
        graph
            .upsert_edge("A", RelationKind::WorksOn, &project)
            .await
            .unwrap();
        graph
            .upsert_edge("A", RelationKind::CoAuthorship, &project)
            .await
            .unwrap();

        assert_eq!(graph.node_count().await, 2);
        assert_eq!(graph.edge_count().await, 2);
    }

    #[tokio::test]
    async fn test_outgoing_relations_of_researcher() {
        let graph = MemoryGraph::new();
        graph
            .upsert_node(&GraphNode::researcher("A", "CS"))
            .await
            .unwrap();
        graph
            .upsert_node(&GraphNode::researcher("B", "Biology"))
            .await
            .unwrap();
        graph
            .upsert_edge(
                "A",
                RelationKind::AuthorOf,
                &GraphNode::publication("P1", Some(2020)),
            )
            .await
            .unwrap();
        graph
            .upsert_edge(
                "B",
                RelationKind::CollaboratesWith,
                &GraphNode::researcher_named("A"),
            )
            .await
            .unwrap();

        let relations = graph.outgoing_relations("A").await.unwrap();

        assert_eq!(
            relations,
            vec![OutgoingRelation {
                relation: "AUTHOR_OF".to_string(),
                target: Some("P1".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn test_duplicate_names_share_edges() {
        let graph = MemoryGraph::new();
        graph
            .upsert_node(&GraphNode::researcher("A", "CS"))
            .await
            .unwrap();
        graph
            .upsert_node(&GraphNode::researcher("A", "Physics"))
            .await
            .unwrap();

        graph
            .upsert_edge("A", RelationKind::WorksOn, &GraphNode::project("P"))
            .await
            .unwrap();

        assert_eq!(graph.edge_count().await, 2);
        assert_eq!(graph.outgoing_relations("A").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_collaborations_is_bounded() {
        let graph = MemoryGraph::new();
        graph
            .upsert_node(&GraphNode::researcher("A", "CS"))
            .await
            .unwrap();
        for i in 0..(COLLABORATION_LIMIT + 10) {
            graph
                .upsert_edge(
                    "A",
                    RelationKind::WorksOn,
                    &GraphNode::project(format!("Project {i}")),
                )
                .await
                .unwrap();
        }

        let records = graph.list_collaborations(COLLABORATION_LIMIT).await.unwrap();

        assert_eq!(records.len(), COLLABORATION_LIMIT);
        assert!(records.iter().all(|r| r.researcher == "A"));
    }

    #[tokio::test]
    async fn test_list_collaborations_reports_researcher_targets_by_name() {
        let graph = MemoryGraph::new();
        graph
            .upsert_node(&GraphNode::researcher_named("Ayat Sider"))
            .await
            .unwrap();
        graph
            .upsert_edge(
                "Ayat Sider",
                RelationKind::CollaboratesWith,
                &GraphNode::researcher_named("Lina Fares"),
            )
            .await
            .unwrap();

        let records = graph.list_collaborations(COLLABORATION_LIMIT).await.unwrap();

        assert_eq!(
            records,
            vec![CollaborationRecord {
                researcher: "Ayat Sider".to_string(),
                relation: "COLLABORATES_WITH".to_string(),
                target: Some("Lina Fares".to_string()),
            }]
        );
    }
}
