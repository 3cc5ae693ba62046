use thiserror::Error;

/// Errors that can occur during graph store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Graph connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Graph query failed: {0}")]
    QueryFailed(String),
}

/// Result type for graph store operations.
pub type Result<T> = std::result::Result<T, GraphError>;
