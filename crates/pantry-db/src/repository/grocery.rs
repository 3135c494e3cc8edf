//! # Grocery Repository
//!
//! SQLite implementation of [`GroceryStore`].
//!
//! ## Bulk Purchase Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ids captured at read time: [a, b, c, ... 1200 ids]                    │
//! │       │                                                                 │
//! │       ▼  chunks of BULK_WRITE_CHUNK (no transaction)                   │
//! │  UPDATE grocery_items                                                  │
//! │     SET completed = 1, archived = 1, version = version + 1             │
//! │   WHERE (completed != 1 OR archived != 1)   ← already-applied rows     │
//! │     AND id IN (?, ?, ...)                     are skipped              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  modified = Σ rows_affected                                            │
//! │                                                                         │
//! │  A failure part-way leaves earlier chunks applied. Retrying with the   │
//! │  same id list finishes the job and counts only the remaining rows.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::gateway::{GroceryQuery, GroceryStore, RecordOrder};
use pantry_core::{GroceryChanges, GroceryFlags, GroceryItem, BULK_WRITE_CHUNK};

const COLUMNS: &str = "id, name, quantity, category, completed, archived, date_added, version";

/// Repository for grocery item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = GroceryRepository::new(pool);
/// let pending = repo.find(GroceryQuery::PENDING, RecordOrder::NewestFirst).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GroceryRepository {
    pool: SqlitePool,
}

impl GroceryRepository {
    /// Creates a new GroceryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GroceryRepository { pool }
    }

    /// Counts all rows, archived included.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM grocery_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl GroceryStore for GroceryRepository {
    async fn find(&self, query: GroceryQuery, order: RecordOrder) -> DbResult<Vec<GroceryItem>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM grocery_items \
             WHERE (?1 IS NULL OR completed = ?1) AND (?2 IS NULL OR archived = ?2) \
             ORDER BY julianday(date_added) {dir}, rowid {dir}",
            dir = order.sql()
        );

        let items = sqlx::query_as::<_, GroceryItem>(&sql)
            .bind(query.completed)
            .bind(query.archived)
            .fetch_all(&self.pool)
            .await?;

        debug!(?query, count = items.len(), "Fetched grocery items");
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> DbResult<Option<GroceryItem>> {
        let sql = format!("SELECT {COLUMNS} FROM grocery_items WHERE id = ?1");
        let item = sqlx::query_as::<_, GroceryItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn insert(&self, item: &GroceryItem) -> DbResult<GroceryItem> {
        debug!(id = %item.id, name = %item.name, "Inserting grocery item");

        sqlx::query(
            r#"
            INSERT INTO grocery_items (
                id, name, quantity, category, completed, archived, date_added, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.category)
        .bind(item.completed)
        .bind(item.archived)
        .bind(item.date_added)
        .bind(item.version)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    async fn update_one(
        &self,
        id: &str,
        changes: &GroceryChanges,
    ) -> DbResult<Option<GroceryItem>> {
        debug!(id = %id, "Updating grocery item");

        let sql = format!(
            "UPDATE grocery_items SET \
                name = ?2, quantity = ?3, category = ?4, completed = ?5, archived = ?6, \
                version = version + 1 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );

        let item = sqlx::query_as::<_, GroceryItem>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.quantity)
            .bind(&changes.category)
            .bind(changes.completed)
            .bind(changes.archived)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn update_many(&self, ids: &[String], flags: GroceryFlags) -> DbResult<u64> {
        let mut modified = 0;

        for chunk in ids.chunks(BULK_WRITE_CHUNK) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("UPDATE grocery_items SET completed = ");
            builder
                .push_bind(flags.completed)
                .push(", archived = ")
                .push_bind(flags.archived)
                .push(", version = version + 1 WHERE (completed != ")
                .push_bind(flags.completed)
                .push(" OR archived != ")
                .push_bind(flags.archived)
                .push(") AND id IN (");

            let mut list = builder.separated(", ");
            for id in chunk {
                list.push_bind(id.as_str());
            }
            list.push_unseparated(")");

            let result = builder.build().execute(&self.pool).await?;
            modified += result.rows_affected();

            debug!(
                chunk = chunk.len(),
                modified = result.rows_affected(),
                "Applied grocery flags to chunk"
            );
        }

        Ok(modified)
    }

    async fn delete_one(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting grocery item");

        let result = sqlx::query("DELETE FROM grocery_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Tests
// =============================================================================
