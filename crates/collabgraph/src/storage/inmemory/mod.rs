//! In-memory document store.
//!
//! Keeps all three collections in HashMaps behind `Arc<RwLock<_>>`. Nothing is
//! persisted; this is the default backend and the one the tests run against.

mod repository;

pub use repository::InMemoryRepository;
