//! Schema bootstrap for the `SQLite` store.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

const CREATE_STATUSES: &str = "CREATE TABLE IF NOT EXISTS statuses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NULL,
    created_date TEXT NOT NULL,
    updated_date TEXT NOT NULL
)";

// BINARY collation keeps the constraint case-sensitive, matching validation.
const CREATE_STATUS_NAME_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_statuses_name ON statuses (name)";

const CREATE_TASK_ITEMS: &str = "CREATE TABLE IF NOT EXISTS task_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NULL,
    is_complete INTEGER NOT NULL DEFAULT 0,
    status_id INTEGER NOT NULL
)";

/// Statuses inserted into an empty database.
pub const DEFAULT_STATUSES: [(&str, &str); 3] = [
    ("Not Started", "The task has not been started yet."),
    ("In Progress", "The task is currently being worked on."),
    ("Completed", "The task has been completed."),
];

/// Creates the tables and the status name index if they are missing.
///
/// # Errors
///
/// Returns an error if a DDL statement fails.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_STATUSES).execute(pool).await?;
    sqlx::query(CREATE_STATUS_NAME_INDEX).execute(pool).await?;
    sqlx::query(CREATE_TASK_ITEMS).execute(pool).await?;
    debug!("Schema ensured");
    Ok(())
}

/// Inserts [`DEFAULT_STATUSES`] when the statuses table is empty.
///
/// Returns the number of rows inserted.
///
/// # Errors
///
/// Returns an error if the count or any insert fails.
pub async fn seed_statuses(pool: &SqlitePool, now: DateTime<Utc>) -> Result<usize, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM statuses")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for (name, description) in DEFAULT_STATUSES {
        sqlx::query(
            "INSERT INTO statuses (name, description, created_date, updated_date) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!(count = DEFAULT_STATUSES.len(), "Seeded default statuses");
    Ok(DEFAULT_STATUSES.len())
}
