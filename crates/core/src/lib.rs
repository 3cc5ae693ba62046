//! Core types and store contracts for collabgraph.
//!
//! Everything in this crate is I/O free: domain records, relation kinds,
//! profile assembly, cache keys and the traits the store backends implement.

pub mod cache;
pub mod graph;
pub mod research;
pub mod storage;
