//! In-process graph store with merge semantics.

mod store;

pub use store::MemoryGraph;
