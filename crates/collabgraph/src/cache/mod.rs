//! Cache backend implementations.
//!
//! Concrete implementations of [`collabgraph_core::cache::Cache`], selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): in-process LRU cache with lazy TTL expiry
//! - `redis`: Redis cache using the redis connection manager
//!
//! These features are mutually exclusive.

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p collabgraph --no-default-features --features inmemory,graph-memory,redis"
);

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(feature = "memory")]
pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
