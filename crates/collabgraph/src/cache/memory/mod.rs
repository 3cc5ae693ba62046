//! In-memory cache backend for single-process deployments.

mod cache;

pub use cache::MemoryCache;
