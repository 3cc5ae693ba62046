//! Redis cache backend for deployments that share one cache.

mod cache;
mod error;

pub use cache::RedisCache;
