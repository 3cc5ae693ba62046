use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Shorthand for a missing record.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::not_found("Researcher", "abc-123");
        assert_eq!(error.to_string(), "Researcher not found: abc-123");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Project",
            id: "p-1".to_string(),
        };
        assert_eq!(error.to_string(), "Project already exists: p-1");
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("unable to open database file".to_string());
        assert_eq!(
            error.to_string(),
            "Connection failed: unable to open database file"
        );
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("no such table: researchers".to_string());
        assert_eq!(error.to_string(), "Query failed: no such table: researchers");
    }

    #[test]
    fn test_repository_error_serialization_display() {
        let error = RepositoryError::Serialization("expected an array".to_string());
        assert_eq!(error.to_string(), "Serialization error: expected an array");
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("bad uuid".to_string());
        assert_eq!(error.to_string(), "Invalid data: bad uuid");
    }
}
