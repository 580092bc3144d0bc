//! SQLite store backend using `rusqlite`.
//!
//! The connection sits behind an async mutex and every operation runs
//! via `tokio::task::spawn_blocking` to keep the async runtime clear.
//! WAL journal mode and foreign keys are enabled on open; `:memory:`
//! paths create an in-memory database for tests.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use formsmith_core::error::{FormsmithError, FormsmithResult};
use formsmith_core::ids;

use crate::base::FormStore;
use crate::records::{FormRecord, NewForm, SubmissionRecord};

/// The `forms` column list, in the order the row mappers expect.
const FORM_COLUMNS: &str =
    "id, owner_id, name, description, content, published, share_url, visits, submissions, created_at";

/// The `form_submissions` column list.
const SUBMISSION_COLUMNS: &str = "id, form_id, content, created_at";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS forms (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id    TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    content     TEXT NOT NULL DEFAULT '[]',
    published   INTEGER NOT NULL DEFAULT 0,
    share_url   TEXT NOT NULL UNIQUE,
    visits      INTEGER NOT NULL DEFAULT 0,
    submissions INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_forms_owner ON forms (owner_id);
CREATE TABLE IF NOT EXISTS form_submissions (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    form_id    INTEGER NOT NULL REFERENCES forms (id) ON DELETE CASCADE,
    content    TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_submissions_form ON form_submissions (form_id);
";

/// A SQLite [`FormStore`] backend.
pub struct SqliteStore {
    /// The path to the database file (or ":memory:").
    path: PathBuf,
    /// The connection, guarded by an async mutex.
    conn: Arc<Mutex<rusqlite::Connection>>,
}

impl SqliteStore {
    /// Opens the database at the given path, creating the schema if
    /// needed.
    ///
    /// If the path is `:memory:`, an in-memory database is created.
    ///
    /// # Errors
    ///
    /// Returns an operational error if the database cannot be opened or
    /// the schema cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> FormsmithResult<Self> {
        let path = path.into();
        let conn = if path.to_str() == Some(":memory:") {
            rusqlite::Connection::open_in_memory()
        } else {
            rusqlite::Connection::open(&path)
        }
        .map_err(|e| FormsmithError::OperationalError(format!("SQLite open failed: {e}")))?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| FormsmithError::OperationalError(format!("Failed to set pragmas: {e}")))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| FormsmithError::OperationalError(format!("Failed to create schema: {e}")))?;

        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory database (convenience constructor).
    ///
    /// # Errors
    ///
    /// Returns an operational error if the database cannot be created.
    pub fn memory() -> FormsmithResult<Self> {
        Self::open(":memory:")
    }

    /// Returns the database file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Runs a closure against the connection on the blocking pool.
    async fn run<T, F>(&self, f: F) -> FormsmithResult<T>
    where
        F: FnOnce(&mut rusqlite::Connection) -> FormsmithResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.blocking_lock();
            f(&mut conn)
        })
        .await
        .map_err(|e| FormsmithError::DatabaseError(format!("Task join error: {e}")))?
    }

    fn parse_timestamp(index: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    index,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
    }

    fn row_to_form(row: &rusqlite::Row<'_>) -> rusqlite::Result<FormRecord> {
        let created_at: String = row.get(9)?;
        Ok(FormRecord {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            content: row.get(4)?,
            published: row.get::<_, i64>(5)? != 0,
            share_url: row.get(6)?,
            visits: row.get(7)?,
            submissions: row.get(8)?,
            created_at: Self::parse_timestamp(9, &created_at)?,
        })
    }

    fn row_to_submission(row: &rusqlite::Row<'_>) -> rusqlite::Result<SubmissionRecord> {
        let created_at: String = row.get(3)?;
        Ok(SubmissionRecord {
            id: row.get(0)?,
            form_id: row.get(1)?,
            content: row.get(2)?,
            created_at: Self::parse_timestamp(3, &created_at)?,
        })
    }

    fn select_form(
        conn: &rusqlite::Connection,
        where_clause: &str,
        params: &[&dyn rusqlite::ToSql],
        what: String,
    ) -> FormsmithResult<FormRecord> {
        conn.query_row(
            &format!("SELECT {FORM_COLUMNS} FROM forms WHERE {where_clause}"),
            params,
            Self::row_to_form,
        )
        .map_err(|e| query_err(e, what))
    }
}

fn db_err(e: rusqlite::Error) -> FormsmithError {
    FormsmithError::DatabaseError(e.to_string())
}

/// Maps a no-rows result to `NotFound`, everything else to a database
/// error.
fn query_err(e: rusqlite::Error, what: String) -> FormsmithError {
    match e {
        rusqlite::Error::QueryReturnedNoRows => FormsmithError::NotFound(what),
        other => FormsmithError::DatabaseError(other.to_string()),
    }
}

#[async_trait]
impl FormStore for SqliteStore {
    async fn create_form(&self, owner_id: &str, new_form: &NewForm) -> FormsmithResult<FormRecord> {
        let owner_id = owner_id.to_string();
        let new_form = new_form.clone();
        self.run(move |conn| {
            let share_url = ids::share_token();
            let created_at = Utc::now().to_rfc3339();
            conn.execute(
                "INSERT INTO forms (owner_id, name, description, share_url, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![owner_id, new_form.name, new_form.description, share_url, created_at],
            )
            .map_err(db_err)?;
            let id = conn.last_insert_rowid();
            Self::select_form(conn, "id = ?1", rusqlite::params![id], format!("form {id}"))
        })
        .await
    }

    async fn forms_for_owner(&self, owner_id: &str) -> FormsmithResult<Vec<FormRecord>> {
        let owner_id = owner_id.to_string();
        self.run(move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {FORM_COLUMNS} FROM forms WHERE owner_id = ?1
                     ORDER BY created_at DESC, id DESC"
                ))
                .map_err(db_err)?;
            let rows = stmt
                .query_map(rusqlite::params![owner_id], Self::row_to_form)
                .map_err(db_err)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
        })
        .await
    }

    async fn form_by_id(&self, owner_id: &str, id: i64) -> FormsmithResult<FormRecord> {
        let owner_id = owner_id.to_string();
        self.run(move |conn| {
            Self::select_form(
                conn,
                "owner_id = ?1 AND id = ?2",
                rusqlite::params![owner_id, id],
                format!("form {id}"),
            )
        })
        .await
    }

    async fn update_content(
        &self,
        owner_id: &str,
        id: i64,
        content: &str,
    ) -> FormsmithResult<FormRecord> {
        let owner_id = owner_id.to_string();
        let content = content.to_string();
        self.run(move |conn| {
            let affected = conn
                .execute(
                    "UPDATE forms SET content = ?1 WHERE owner_id = ?2 AND id = ?3",
                    rusqlite::params![content, owner_id, id],
                )
                .map_err(db_err)?;
            if affected == 0 {
                return Err(FormsmithError::NotFound(format!("form {id}")));
            }
            Self::select_form(conn, "id = ?1", rusqlite::params![id], format!("form {id}"))
        })
        .await
    }

    async fn publish_form(&self, owner_id: &str, id: i64) -> FormsmithResult<FormRecord> {
        let owner_id = owner_id.to_string();
        self.run(move |conn| {
            let affected = conn
                .execute(
                    "UPDATE forms SET published = 1 WHERE owner_id = ?1 AND id = ?2",
                    rusqlite::params![owner_id, id],
                )
                .map_err(db_err)?;
            if affected == 0 {
                return Err(FormsmithError::NotFound(format!("form {id}")));
            }
            Self::select_form(conn, "id = ?1", rusqlite::params![id], format!("form {id}"))
        })
        .await
    }

    async fn form_by_share_url(&self, share_url: &str) -> FormsmithResult<FormRecord> {
        let share_url = share_url.to_string();
        self.run(move |conn| {
            Self::select_form(
                conn,
                "share_url = ?1",
                rusqlite::params![share_url],
                format!("form with share url {share_url}"),
            )
        })
        .await
    }

    async fn visit_form(&self, share_url: &str) -> FormsmithResult<String> {
        let share_url = share_url.to_string();
        self.run(move |conn| {
            let affected = conn
                .execute(
                    "UPDATE forms SET visits = visits + 1 WHERE share_url = ?1",
                    rusqlite::params![share_url],
                )
                .map_err(db_err)?;
            if affected == 0 {
                return Err(FormsmithError::NotFound(format!(
                    "form with share url {share_url}"
                )));
            }
            conn.query_row(
                "SELECT content FROM forms WHERE share_url = ?1",
                rusqlite::params![share_url],
                |row| row.get(0),
            )
            .map_err(|e| query_err(e, format!("form with share url {share_url}")))
        })
        .await
    }

    async fn submit_form(
        &self,
        share_url: &str,
        content: &str,
    ) -> FormsmithResult<SubmissionRecord> {
        let share_url = share_url.to_string();
        let content = content.to_string();
        self.run(move |conn| {
            // Counter increment and row append share one transaction.
            let tx = conn.transaction().map_err(db_err)?;
            let affected = tx
                .execute(
                    "UPDATE forms SET submissions = submissions + 1
                     WHERE share_url = ?1 AND published = 1",
                    rusqlite::params![share_url],
                )
                .map_err(db_err)?;
            if affected == 0 {
                return Err(FormsmithError::NotFound(format!(
                    "form with share url {share_url}"
                )));
            }
            let form_id: i64 = tx
                .query_row(
                    "SELECT id FROM forms WHERE share_url = ?1",
                    rusqlite::params![share_url],
                    |row| row.get(0),
                )
                .map_err(db_err)?;
            let created_at = Utc::now();
            tx.execute(
                "INSERT INTO form_submissions (form_id, content, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![form_id, content, created_at.to_rfc3339()],
            )
            .map_err(db_err)?;
            let id = tx.last_insert_rowid();
            tx.commit().map_err(db_err)?;
            Ok(SubmissionRecord {
                id,
                form_id,
                content,
                created_at,
            })
        })
        .await
    }

    async fn submissions_for_form(
        &self,
        owner_id: &str,
        id: i64,
    ) -> FormsmithResult<Vec<SubmissionRecord>> {
        let owner_id = owner_id.to_string();
        self.run(move |conn| {
            // Ownership gate before touching the submissions table.
            conn.query_row(
                "SELECT id FROM forms WHERE owner_id = ?1 AND id = ?2",
                rusqlite::params![owner_id, id],
                |row| row.get::<_, i64>(0),
            )
            .map_err(|e| query_err(e, format!("form {id}")))?;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SUBMISSION_COLUMNS} FROM form_submissions
                     WHERE form_id = ?1 ORDER BY created_at ASC, id ASC"
                ))
                .map_err(db_err)?;
            let rows = stmt
                .query_map(rusqlite::params![id], Self::row_to_submission)
                .map_err(db_err)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
        })
        .await
    }

    async fn owner_stats(&self, owner_id: &str) -> FormsmithResult<(i64, i64)> {
        let owner_id = owner_id.to_string();
        self.run(move |conn| {
            conn.query_row(
                "SELECT COALESCE(SUM(visits), 0), COALESCE(SUM(submissions), 0)
                 FROM forms WHERE owner_id = ?1",
                rusqlite::params![owner_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(db_err)
        })
        .await
    }
}
