//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use collabgraph_core::research::{Project, Publication, Researcher};
use collabgraph_core::storage::RepositoryError;

/// Convert a SQLite row to a Researcher.
///
/// Expected columns: id, name, department, interests, publications
pub fn row_to_researcher(row: &Row) -> rusqlite::Result<Researcher> {
    let id: String = row.get(0)?;
    let interests: String = row.get(3)?;
    let publications: String = row.get(4)?;

    Ok(Researcher {
        id: parse_uuid(&id)?,
        name: row.get(1)?,
        department: row.get(2)?,
        interests: parse_json_column(3, &interests)?,
        publications: parse_json_column(4, &publications)?,
    })
}

/// Convert a SQLite row to a Project.
///
/// Expected columns: id, title, description, participants, publications
pub fn row_to_project(row: &Row) -> rusqlite::Result<Project> {
    let id: String = row.get(0)?;
    let participants: String = row.get(3)?;
    let publications: String = row.get(4)?;

    Ok(Project {
        id: parse_uuid(&id)?,
        title: row.get(1)?,
        description: row.get(2)?,
        participants: parse_json_column(3, &participants)?,
        publications: parse_json_column(4, &publications)?,
    })
}

/// Convert a SQLite row to a Publication.
///
/// Expected columns: id, title, year, authors
pub fn row_to_publication(row: &Row) -> rusqlite::Result<Publication> {
    let id: String = row.get(0)?;
    let authors: String = row.get(3)?;

    Ok(Publication {
        id: parse_uuid(&id)?,
        title: row.get(1)?,
        year: row.get(2)?,
        authors: parse_json_column(3, &authors)?,
    })
}

/// Serialize a list column to a JSON array string.
pub fn to_json_column<T: Serialize>(values: &[T]) -> Result<String, RepositoryError> {
    serde_json::to_string(values).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn parse_json_column<T: DeserializeOwned>(index: usize, json: &str) -> rusqlite::Result<T> {
    serde_json::from_str(json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
