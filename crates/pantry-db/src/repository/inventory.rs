//! # Inventory Repository
//!
//! SQLite implementation of [`InventoryStore`].
//!
//! Updates are full replacements: every mutable column is rewritten and
//! `updated_at` is set to the caller's timestamp. `created_at` is never
//! touched after insert.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::gateway::{InventoryStore, RecordOrder};
use pantry_core::{InventoryItem, NewInventoryItem};

const COLUMNS: &str = "id, name, category, quantity, manufacture_date, expire_date, \
                       temperature, status, created_at, updated_at, version";

/// Repository for inventory item database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    async fn find(&self, order: RecordOrder) -> DbResult<Vec<InventoryItem>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM inventory_items \
             ORDER BY julianday(created_at) {dir}, rowid {dir}",
            dir = order.sql()
        );

        let items = sqlx::query_as::<_, InventoryItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Fetched inventory items");
        Ok(items)
    }

    async fn insert(&self, item: &InventoryItem) -> DbResult<InventoryItem> {
        debug!(id = %item.id, name = %item.name, "Inserting inventory item");

        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id, name, category, quantity, manufacture_date, expire_date,
                temperature, status, created_at, updated_at, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&item.id)
        .bind(item.name)
        .bind(item.category)
        .bind(item.quantity)
        .bind(item.manufacture_date)
        .bind(item.expire_date)
        .bind(item.temperature)
        .bind(item.status)
        .bind(item.created_at)
        .bind(item.updated_at)
        .bind(item.version)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    async fn update_one(
        &self,
        id: &str,
        item: &NewInventoryItem,
        updated_at: DateTime<Utc>,
    ) -> DbResult<Option<InventoryItem>> {
        debug!(id = %id, "Replacing inventory item");

        let sql = format!(
            "UPDATE inventory_items SET \
                name = ?2, category = ?3, quantity = ?4, manufacture_date = ?5, \
                expire_date = ?6, temperature = ?7, status = ?8, updated_at = ?9, \
                version = version + 1 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );

        let updated = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(id)
            .bind(item.name)
            .bind(item.category)
            .bind(item.quantity)
            .bind(item.manufacture_date)
            .bind(item.expire_date)
            .bind(item.temperature)
            .bind(item.status)
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete_one(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting inventory item");

        let result = sqlx::query("DELETE FROM inventory_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Tests
// =============================================================================
