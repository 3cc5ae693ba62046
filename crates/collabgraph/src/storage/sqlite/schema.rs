//! SQLite schema definitions and SQL query constants.
//!
//! `seq` keeps insertion order for listings; `id` is the public UUID.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS researchers (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    department TEXT NOT NULL,
    interests TEXT NOT NULL DEFAULT '[]',
    publications TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS projects (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    participants TEXT NOT NULL DEFAULT '[]',
    publications TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS publications (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    year INTEGER,
    authors TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS idx_researchers_name ON researchers(name);
"#;

// Researcher queries
pub const INSERT_RESEARCHER: &str = r#"
INSERT INTO researchers (id, name, department, interests, publications)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_RESEARCHER_BY_ID: &str = r#"
SELECT id, name, department, interests, publications
FROM researchers
WHERE id = ?1
"#;

pub const SELECT_ALL_RESEARCHERS: &str = r#"
SELECT id, name, department, interests, publications
FROM researchers
ORDER BY seq ASC
"#;

pub const SELECT_RESEARCHERS_BY_NAME: &str = r#"
SELECT id, name, department, interests, publications
FROM researchers
WHERE name = ?1
ORDER BY seq ASC
"#;

pub const APPEND_RESEARCHER_PUBLICATION: &str = r#"
UPDATE researchers
SET publications = CASE
    WHEN EXISTS (SELECT 1 FROM json_each(researchers.publications) WHERE json_each.value = ?2)
    THEN publications
    ELSE json_insert(publications, '$[#]', ?2)
END
WHERE id = ?1
"#;

// Project queries
pub const INSERT_PROJECT: &str = r#"
INSERT INTO projects (id, title, description, participants, publications)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_PROJECT_BY_ID: &str = r#"
SELECT id, title, description, participants, publications
FROM projects
WHERE id = ?1
"#;

pub const SELECT_ALL_PROJECTS: &str = r#"
SELECT id, title, description, participants, publications
FROM projects
ORDER BY seq ASC
"#;

pub const SELECT_PROJECTS_BY_PARTICIPANT: &str = r#"
SELECT id, title, description, participants, publications
FROM projects
WHERE EXISTS (SELECT 1 FROM json_each(projects.participants) WHERE json_each.value = ?1)
ORDER BY seq ASC
"#;

pub const APPEND_PROJECT_PUBLICATION: &str = r#"
UPDATE projects
SET publications = CASE
    WHEN EXISTS (SELECT 1 FROM json_each(projects.publications) WHERE json_each.value = ?2)
    THEN publications
    ELSE json_insert(publications, '$[#]', ?2)
END
WHERE id = ?1
"#;

// Publication queries
pub const INSERT_PUBLICATION: &str = r#"
INSERT INTO publications (id, title, year, authors)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_PUBLICATION_BY_ID: &str = r#"
SELECT id, title, year, authors
FROM publications
WHERE id = ?1
"#;

pub const SELECT_ALL_PUBLICATIONS: &str = r#"
SELECT id, title, year, authors
FROM publications
ORDER BY seq ASC
"#;

pub const SELECT_PUBLICATIONS_BY_AUTHOR: &str = r#"
SELECT id, title, year, authors
FROM publications
WHERE EXISTS (SELECT 1 FROM json_each(publications.authors) WHERE json_each.value = ?1)
ORDER BY seq ASC
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS researchers"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS projects"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS publications"));
    }

    #[test]
    fn test_contains_filters_use_json_each() {
        assert!(SELECT_PROJECTS_BY_PARTICIPANT.contains("json_each(projects.participants)"));
        assert!(SELECT_PUBLICATIONS_BY_AUTHOR.contains("json_each(publications.authors)"));
    }

    #[test]
    fn test_listings_are_ordered() {
        for query in [
            SELECT_ALL_RESEARCHERS,
            SELECT_ALL_PROJECTS,
            SELECT_ALL_PUBLICATIONS,
        ] {
            assert!(query.contains("ORDER BY seq"));
        }
    }
}
