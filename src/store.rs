use std::str::FromStr;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::sync::OnceCell;

use crate::error::AppError;
use crate::models::request::SongRequest;
use crate::object_id;

/// Hard cap on list results. No pagination exists beyond this.
pub const LIST_LIMIT: i64 = 500;

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    // One cached connection per process; requests reuse it.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// Lazily-initialized, process-wide store handle. The pool is created on
/// first use and memoized; concurrent first callers await the same
/// in-flight attempt instead of opening duplicate connections.
#[derive(Clone)]
pub struct Store {
    database_url: Option<String>,
    conn: Arc<OnceCell<SqlitePool>>,
}

impl Store {
    pub fn new(database_url: Option<String>) -> Self {
        Self {
            database_url,
            conn: Arc::new(OnceCell::new()),
        }
    }

    /// Wrap an already-connected pool. Used by tests.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            database_url: None,
            conn: Arc::new(OnceCell::new_with(Some(pool))),
        }
    }

    async fn pool(&self) -> Result<&SqlitePool, AppError> {
        self.conn
            .get_or_try_init(|| async {
                let url = self.database_url.as_deref().ok_or_else(|| {
                    AppError::Config(
                        "Missing DATABASE_URL. Add it to the environment.".to_string(),
                    )
                })?;
                create_pool(url).await.map_err(AppError::from)
            })
            .await
    }

    pub async fn create_request(&self, name: &str, song: &str) -> Result<SongRequest, AppError> {
        let pool = self.pool().await?;
        let id = object_id::generate();
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        sqlx::query(
            "INSERT INTO requests (id, name, song, status, created_at, updated_at) VALUES (?, ?, ?, 'pending', ?, ?)",
        )
        .bind(&id)
        .bind(name)
        .bind(song)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(SongRequest {
            id,
            name: name.to_string(),
            song: song.to_string(),
            status: "pending".to_string(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Up to [`LIST_LIMIT`] requests, newest first. Empty vec when there
    /// are none.
    pub async fn list_requests(&self) -> Result<Vec<SongRequest>, AppError> {
        let pool = self.pool().await?;
        let rows = sqlx::query_as::<_, (String, String, String, String, String, String)>(
            "SELECT id, name, song, status, created_at, updated_at FROM requests ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SongRequest {
                id: row.0,
                name: row.1,
                song: row.2,
                status: row.3,
                created_at: row.4,
                updated_at: row.5,
            })
            .collect())
    }

    /// Deletes and returns the row, atomically, so concurrent deletes of
    /// the same id report "not found" to the loser.
    pub async fn delete_request(&self, id: &str) -> Result<SongRequest, AppError> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, (String, String, String, String, String, String)>(
            "DELETE FROM requests WHERE id = ? RETURNING id, name, song, status, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found.".to_string()))?;

        Ok(SongRequest {
            id: row.0,
            name: row.1,
            song: row.2,
            status: row.3,
            created_at: row.4,
            updated_at: row.5,
        })
    }
}
