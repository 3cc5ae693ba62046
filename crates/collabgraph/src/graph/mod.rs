//! Graph store implementations.
//!
//! Concrete implementations of [`collabgraph_core::graph::GraphStore`],
//! selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `graph-memory` (default): in-process node and edge lists
//! - `neo4j`: Neo4j over Bolt using `neo4rs`
//!
//! These features are mutually exclusive.

#[cfg(all(feature = "graph-memory", feature = "neo4j"))]
compile_error!(
    "Features 'graph-memory' and 'neo4j' are mutually exclusive. \
    Enable only one graph backend at a time."
);

#[cfg(not(any(feature = "graph-memory", feature = "neo4j")))]
compile_error!(
    "No graph backend selected. Enable 'graph-memory' or 'neo4j' feature. \
    Example: cargo build -p collabgraph --no-default-features --features inmemory,memory,neo4j"
);

#[cfg(feature = "graph-memory")]
pub mod memory;

#[cfg(feature = "neo4j")]
pub mod neo4j;

#[cfg(feature = "graph-memory")]
pub use memory::MemoryGraph;

#[cfg(feature = "neo4j")]
pub use neo4j::Neo4jGraph;
