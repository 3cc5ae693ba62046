//! SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use collabgraph_core::research::{Project, Publication, Researcher};
use collabgraph_core::storage::{
    ProjectRepository, PublicationRepository, RepositoryError, ResearcherRepository, Result,
};

use super::conversions::{row_to_project, row_to_publication, row_to_researcher, to_json_column};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Runs a query returning at most one row.
fn query_optional<T>(
    conn: &rusqlite::Connection,
    sql: &str,
    param: &str,
    map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
) -> std::result::Result<Option<T>, tokio_rusqlite::Error> {
    let mut stmt = conn.prepare_cached(sql).map_err(wrap_err)?;
    match stmt.query_row([param], map) {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(wrap_err(e)),
    }
}

/// Runs a query returning every matching row.
fn query_all<T, P: rusqlite::Params>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
    map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
) -> std::result::Result<Vec<T>, tokio_rusqlite::Error> {
    let mut stmt = conn.prepare_cached(sql).map_err(wrap_err)?;
    let rows = stmt.query_map(params, map).map_err(wrap_err)?;

    let mut records = Vec::new();
    for row_result in rows {
        records.push(row_result.map_err(wrap_err)?);
    }
    Ok(records)
}

/// Runs an append statement, failing with no-rows when the target is missing.
fn append_reference(
    conn: &rusqlite::Connection,
    sql: &str,
    target_id: &str,
    reference_id: &str,
) -> std::result::Result<(), tokio_rusqlite::Error> {
    let rows = conn
        .execute(sql, [target_id, reference_id])
        .map_err(wrap_err)?;
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

/// SQLite-based document store.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and applies the schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl ResearcherRepository for SqliteRepository {
    async fn get_researcher(&self, id: Uuid) -> Result<Option<Researcher>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                query_optional(
                    conn,
                    schema::SELECT_RESEARCHER_BY_ID,
                    &id_str,
                    row_to_researcher,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Researcher", id.to_string()))
    }

    async fn list_researchers(&self) -> Result<Vec<Researcher>> {
        self.conn
            .call(|conn| {
                query_all(
                    conn,
                    schema::SELECT_ALL_RESEARCHERS,
                    rusqlite::params![],
                    row_to_researcher,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Researcher", ""))
    }

    async fn find_researchers_by_name(&self, name: &str) -> Result<Vec<Researcher>> {
        let name = name.to_string();

        self.conn
            .call(move |conn| {
                query_all(
                    conn,
                    schema::SELECT_RESEARCHERS_BY_NAME,
                    [&name],
                    row_to_researcher,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Researcher", ""))
    }

    async fn create_researcher(&self, researcher: &Researcher) -> Result<()> {
        let id = researcher.id.to_string();
        let name = researcher.name.clone();
        let department = researcher.department.clone();
        let interests = to_json_column(&researcher.interests)?;
        let publications = to_json_column(&researcher.publications)?;
        let researcher_id = researcher.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_RESEARCHER,
                    rusqlite::params![id, name, department, interests, publications],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Researcher", researcher_id))
    }

    async fn add_researcher_publication(
        &self,
        researcher_id: Uuid,
        publication_id: Uuid,
    ) -> Result<()> {
        let id = researcher_id.to_string();
        let publication = publication_id.to_string();

        self.conn
            .call(move |conn| {
                append_reference(
                    conn,
                    schema::APPEND_RESEARCHER_PUBLICATION,
                    &id,
                    &publication,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Researcher", researcher_id.to_string()))
    }
}

#[async_trait]
impl ProjectRepository for SqliteRepository {
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                query_optional(conn, schema::SELECT_PROJECT_BY_ID, &id_str, row_to_project)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Project", id.to_string()))
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.conn
            .call(|conn| {
                query_all(
                    conn,
                    schema::SELECT_ALL_PROJECTS,
                    rusqlite::params![],
                    row_to_project,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Project", ""))
    }

    async fn find_projects_by_participant(&self, researcher_id: Uuid) -> Result<Vec<Project>> {
        let id = researcher_id.to_string();

        self.conn
            .call(move |conn| {
                query_all(
                    conn,
                    schema::SELECT_PROJECTS_BY_PARTICIPANT,
                    [&id],
                    row_to_project,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Project", ""))
    }

    async fn create_project(&self, project: &Project) -> Result<()> {
        let id = project.id.to_string();
        let title = project.title.clone();
        let description = project.description.clone();
        let participants = to_json_column(&project.participants)?;
        let publications = to_json_column(&project.publications)?;
        let project_id = project.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_PROJECT,
                    rusqlite::params![id, title, description, participants, publications],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Project", project_id))
    }

    async fn add_project_publication(
        &self,
        project_id: Uuid,
        publication_id: Uuid,
    ) -> Result<()> {
        let id = project_id.to_string();
        let publication = publication_id.to_string();

        self.conn
            .call(move |conn| {
                append_reference(conn, schema::APPEND_PROJECT_PUBLICATION, &id, &publication)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Project", project_id.to_string()))
    }
}

#[async_trait]
impl PublicationRepository for SqliteRepository {
    async fn get_publication(&self, id: Uuid) -> Result<Option<Publication>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                query_optional(
                    conn,
                    schema::SELECT_PUBLICATION_BY_ID,
                    &id_str,
                    row_to_publication,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Publication", id.to_string()))
    }

    async fn list_publications(&self) -> Result<Vec<Publication>> {
        self.conn
            .call(|conn| {
                query_all(
                    conn,
                    schema::SELECT_ALL_PUBLICATIONS,
                    rusqlite::params![],
                    row_to_publication,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Publication", ""))
    }

    async fn get_publications(&self, ids: &[Uuid]) -> Result<Vec<Publication>> {
        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();

        self.conn
            .call(move |conn| {
                let mut publications = Vec::with_capacity(ids.len());
                for id in &ids {
                    if let Some(publication) = query_optional(
                        conn,
                        schema::SELECT_PUBLICATION_BY_ID,
                        id,
                        row_to_publication,
                    )? {
                        publications.push(publication);
                    }
                }
                Ok(publications)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Publication", ""))
    }

    async fn find_publications_by_author(&self, researcher_id: Uuid) -> Result<Vec<Publication>> {
        let id = researcher_id.to_string();

        self.conn
            .call(move |conn| {
                query_all(
                    conn,
                    schema::SELECT_PUBLICATIONS_BY_AUTHOR,
                    [&id],
                    row_to_publication,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Publication", ""))
    }

    async fn create_publication(&self, publication: &Publication) -> Result<()> {
        let id = publication.id.to_string();
        let title = publication.title.clone();
        let year = publication.year;
        let authors = to_json_column(&publication.authors)?;
        let publication_id = publication.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_PUBLICATION,
                    rusqlite::params![id, title, year, authors],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Publication", publication_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_researcher_round_trips_lists() {
        let repo = repo().await;
        let researcher =
            Researcher::new("Ayat Sider", "Computer Science").with_interests(["AI", "Web"]);

        repo.create_researcher(&researcher).await.unwrap();

        let fetched = repo.get_researcher(researcher.id).await.unwrap();
        assert_eq!(fetched, Some(researcher));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = repo().await;

        assert!(repo.get_researcher(Uuid::new_v4()).await.unwrap().is_none());
        assert!(repo.get_project(Uuid::new_v4()).await.unwrap().is_none());
        assert!(repo.get_publication(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_already_exists() {
        let repo = repo().await;
        let project = Project::new("P", "");

        repo.create_project(&project).await.unwrap();
        let result = repo.create_project(&project).await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Project",
                id: project.id.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_listings_keep_insertion_order() {
        let repo = repo().await;
        let titles = ["Zeta", "Alpha", "Mid"];
        for title in titles {
            repo.create_publication(&Publication::new(title, None))
                .await
                .unwrap();
        }

        let listed: Vec<String> = repo
            .list_publications()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(listed, titles);
    }

    #[tokio::test]
    async fn test_publication_without_year() {
        let repo = repo().await;
        let publication = Publication::new("Untitled draft", None);

        repo.create_publication(&publication).await.unwrap();

        let fetched = repo.get_publication(publication.id).await.unwrap().unwrap();
        assert_eq!(fetched.year, None);
    }

    #[tokio::test]
    async fn test_find_by_author_and_participant() {
        let repo = repo().await;
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let by_a = Publication::new("A's paper", Some(2020)).with_authors(vec![a]);
        let by_b = Publication::new("B's paper", Some(2021)).with_authors(vec![b]);
        let shared = Project::new("Shared", "").with_participants(vec![a, b]);
        let only_b = Project::new("Only B", "").with_participants(vec![b]);
        repo.create_publication(&by_a).await.unwrap();
        repo.create_publication(&by_b).await.unwrap();
        repo.create_project(&shared).await.unwrap();
        repo.create_project(&only_b).await.unwrap();

        assert_eq!(repo.find_publications_by_author(a).await.unwrap(), vec![by_a]);
        assert_eq!(repo.find_projects_by_participant(a).await.unwrap(), vec![shared]);
        assert_eq!(repo.find_projects_by_participant(b).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_researchers_by_name() {
        let repo = repo().await;
        repo.create_researcher(&Researcher::new("A", "CS")).await.unwrap();
        repo.create_researcher(&Researcher::new("A", "Physics")).await.unwrap();
        repo.create_researcher(&Researcher::new("B", "CS")).await.unwrap();

        let found = repo.find_researchers_by_name("A").await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|r| r.name == "A"));
    }

    #[tokio::test]
    async fn test_append_references() {
        let repo = repo().await;
        let researcher = Researcher::new("A", "CS");
        let project = Project::new("P", "");
        repo.create_researcher(&researcher).await.unwrap();
        repo.create_project(&project).await.unwrap();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        repo.add_researcher_publication(researcher.id, first).await.unwrap();
        repo.add_researcher_publication(researcher.id, second).await.unwrap();
        repo.add_project_publication(project.id, first).await.unwrap();

        let researcher = repo.get_researcher(researcher.id).await.unwrap().unwrap();
        let project = repo.get_project(project.id).await.unwrap().unwrap();
        assert_eq!(researcher.publications, vec![first, second]);
        assert_eq!(project.publications, vec![first]);
    }

    #[tokio::test]
    async fn test_append_existing_reference_is_kept_once() {
        let repo = repo().await;
        let researcher = Researcher::new("A", "CS");
        let project = Project::new("P", "");
        repo.create_researcher(&researcher).await.unwrap();
        repo.create_project(&project).await.unwrap();
        let publication_id = Uuid::new_v4();

        for _ in 0..2 {
            repo.add_researcher_publication(researcher.id, publication_id)
                .await
                .unwrap();
            repo.add_project_publication(project.id, publication_id)
                .await
                .unwrap();
        }

        let researcher = repo.get_researcher(researcher.id).await.unwrap().unwrap();
        let project = repo.get_project(project.id).await.unwrap().unwrap();
        assert_eq!(researcher.publications, vec![publication_id]);
        assert_eq!(project.publications, vec![publication_id]);
    }

    #[tokio::test]
    async fn test_append_to_missing_record_is_not_found() {
        let repo = repo().await;
        let missing = Uuid::new_v4();

        let result = repo.add_researcher_publication(missing, Uuid::new_v4()).await;

        assert_eq!(
            result,
            Err(RepositoryError::not_found("Researcher", missing))
        );
    }

    #[tokio::test]
    async fn test_get_publications_preserves_requested_order() {
        let repo = repo().await;
        let first = Publication::new("First", Some(2001));
        let second = Publication::new("Second", Some(2002));
        repo.create_publication(&first).await.unwrap();
        repo.create_publication(&second).await.unwrap();

        let found = repo
            .get_publications(&[second.id, Uuid::new_v4(), first.id])
            .await
            .unwrap();

        assert_eq!(found, vec![second, first]);
    }
}
