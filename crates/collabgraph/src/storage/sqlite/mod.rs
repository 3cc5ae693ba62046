//! SQLite document store.
//!
//! Uses `rusqlite` for synchronous operations and `tokio-rusqlite` to run
//! them on a dedicated thread. Reference lists are JSON array columns, queried
//! with `json_each`.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
