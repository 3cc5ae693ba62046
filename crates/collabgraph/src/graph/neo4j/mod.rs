//! Neo4j graph store over Bolt.

mod cypher;
mod error;
mod store;

pub use store::{Neo4jGraph, Neo4jSettings};
