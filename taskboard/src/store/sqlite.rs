//! `SQLite`-backed store.
//!
//! Every call acquires its own pooled connection, so each operation runs in a
//! fresh session. Task item reads `LEFT JOIN` the statuses table: `list`,
//! `get` and the instances returned by `create`/`update` carry a materialized
//! `status` whenever the referenced row still exists.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::{
    Row,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
};
use tracing::{info, instrument};

use super::schema;
use super::{StatusStore, StoreError, TaskItemStore};
use crate::domain::{Status, StatusId, TaskItem, TaskItemId};
use crate::infrastructure::config::DatabaseSettings;

const SELECT_TASK_ITEMS: &str = "SELECT t.id, t.title, t.description, t.is_complete, t.status_id,
        s.id AS s_id, s.name AS s_name, s.description AS s_description,
        s.created_date AS s_created_date, s.updated_date AS s_updated_date
    FROM task_items t
    LEFT JOIN statuses s ON s.id = t.status_id";

const SELECT_STATUSES: &str =
    "SELECT id, name, description, created_date, updated_date FROM statuses";

/// Store over a `SQLite` connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wraps an existing pool. The schema is assumed to exist.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool from settings, creates the schema and optionally seeds statuses.
    ///
    /// In-memory databases are held on one connection that is never recycled,
    /// since the database disappears with its last connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or the
    /// schema cannot be created.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let url = settings.url.expose_secret();
        let options = SqliteConnectOptions::from_str(url)?;

        let pool = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(settings.max_connections)
                .connect_with(options.create_if_missing(true))
                .await?
        };

        schema::ensure_schema(&pool).await?;
        if settings.seed_statuses {
            schema::seed_statuses(&pool, Utc::now()).await?;
        }

        info!(in_memory = is_in_memory(url), "Database ready");
        Ok(Self { pool })
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_task_item(&self, id: TaskItemId) -> Result<Option<TaskItem>, StoreError> {
        let sql = format!("{SELECT_TASK_ITEMS} WHERE t.id = ?");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(task_item_from_row).transpose()?)
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn name_conflict(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict {
            entity: "Status",
            field: "Name",
        },
        _ => StoreError::DbError(err),
    }
}

fn status_from_row(row: &SqliteRow) -> Result<Status, sqlx::Error> {
    Ok(Status {
        id: StatusId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_date: row.try_get("created_date")?,
        updated_date: row.try_get("updated_date")?,
    })
}

fn task_item_from_row(row: &SqliteRow) -> Result<TaskItem, sqlx::Error> {
    let status = match row.try_get::<Option<i64>, _>("s_id")? {
        Some(status_id) => Some(Status {
            id: StatusId::new(status_id),
            name: row.try_get("s_name")?,
            description: row.try_get("s_description")?,
            created_date: row.try_get::<DateTime<Utc>, _>("s_created_date")?,
            updated_date: row.try_get::<DateTime<Utc>, _>("s_updated_date")?,
        }),
        None => None,
    };

    Ok(TaskItem {
        id: TaskItemId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        is_complete: row.try_get("is_complete")?,
        status_id: StatusId::new(row.try_get("status_id")?),
        status,
    })
}

#[async_trait]
impl TaskItemStore for SqliteStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<TaskItem>, StoreError> {
        let sql = format!("{SELECT_TASK_ITEMS} ORDER BY t.id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(task_item_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: TaskItemId) -> Result<Option<TaskItem>, StoreError> {
        self.fetch_task_item(id).await
    }

    #[instrument(skip(self, item), fields(status_id = %item.status_id))]
    async fn create(&self, item: &TaskItem) -> Result<TaskItem, StoreError> {
        let result = sqlx::query(
            "INSERT INTO task_items (title, description, is_complete, status_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.is_complete)
        .bind(item.status_id.get())
        .execute(&self.pool)
        .await?;

        let id = TaskItemId::new(result.last_insert_rowid());
        self.fetch_task_item(id)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "TaskItem",
                id: id.get(),
            })
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn update(&self, item: &TaskItem) -> Result<TaskItem, StoreError> {
        let not_found = || StoreError::NotFound {
            entity: "TaskItem",
            id: item.id.get(),
        };

        let result = sqlx::query(
            "UPDATE task_items SET title = ?, description = ?, is_complete = ?, status_id = ? WHERE id = ?",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.is_complete)
        .bind(item.status_id.get())
        .bind(item.id.get())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        self.fetch_task_item(item.id).await?.ok_or_else(not_found)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: TaskItemId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM task_items WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl StatusStore for SqliteStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Status>, StoreError> {
        let sql = format!("{SELECT_STATUSES} ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(status_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: StatusId) -> Result<Option<Status>, StoreError> {
        let sql = format!("{SELECT_STATUSES} WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(status_from_row).transpose()?)
    }

    #[instrument(skip(self, status), fields(name = %status.name))]
    async fn create(&self, status: &Status) -> Result<Status, StoreError> {
        let result = sqlx::query(
            "INSERT INTO statuses (name, description, created_date, updated_date) VALUES (?, ?, ?, ?)",
        )
        .bind(&status.name)
        .bind(&status.description)
        .bind(status.created_date)
        .bind(status.updated_date)
        .execute(&self.pool)
        .await
        .map_err(name_conflict)?;

        Ok(Status {
            id: StatusId::new(result.last_insert_rowid()),
            ..status.clone()
        })
    }

    #[instrument(skip(self, status), fields(id = %status.id))]
    async fn update(&self, status: &Status) -> Result<Status, StoreError> {
        let result = sqlx::query(
            "UPDATE statuses SET name = ?, description = ?, created_date = ?, updated_date = ? WHERE id = ?",
        )
        .bind(&status.name)
        .bind(&status.description)
        .bind(status.created_date)
        .bind(status.updated_date)
        .bind(status.id.get())
        .execute(&self.pool)
        .await
        .map_err(name_conflict)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "Status",
                id: status.id.get(),
            });
        }
        Ok(status.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: StatusId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM statuses WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: StatusId) -> Result<bool, StoreError> {
        let (found,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM statuses WHERE id = ?)")
                .bind(id.get())
                .fetch_one(&self.pool)
                .await?;
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn name_taken(&self, name: &str, excluding: StatusId) -> Result<bool, StoreError> {
        // `=` on TEXT uses BINARY collation, which makes the match case-sensitive.
        let (taken,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM statuses WHERE name = ? AND id <> ?)")
                .bind(name)
                .bind(excluding.get())
                .fetch_one(&self.pool)
                .await?;
        Ok(taken)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
