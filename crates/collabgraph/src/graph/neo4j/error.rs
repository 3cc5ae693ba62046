//! neo4rs error mapping to GraphError.

use collabgraph_core::graph::GraphError;

/// Maps an error raised while connecting.
pub fn map_connect_error(err: neo4rs::Error) -> GraphError {
    GraphError::ConnectionFailed(err.to_string())
}

/// Maps an error raised while running a statement.
pub fn map_query_error(err: neo4rs::Error) -> GraphError {
    GraphError::QueryFailed(err.to_string())
}

/// Maps a failure to read a column from a result row.
pub fn map_row_error(column: &str, err: impl std::fmt::Display) -> GraphError {
    GraphError::QueryFailed(format!("column {column}: {err}"))
}
