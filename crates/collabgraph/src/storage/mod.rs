//! Document store implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `collabgraph_core::storage`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): HashMaps behind `tokio::sync::RwLock`
//! - `sqlite`: SQLite via `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive.
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p collabgraph --no-default-features --features sqlite,memory,graph-memory
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p collabgraph --features sqlite"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
