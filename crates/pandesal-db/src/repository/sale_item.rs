//! # Sale Item Repository
//!
//! Sale lines. Items are only ever written together with their sale (see
//! [`SaleRepository::record_checkout`](super::sale::SaleRepository::record_checkout))
//! or by a restore.

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::DbResult;
use pandesal_core::SaleItem;

const SELECT_SALE_ITEM: &str =
    "SELECT id, sale_id, product_id, product_name, quantity, price, subtotal FROM sale_items";

/// Repository for sale item database operations.
#[derive(Debug, Clone)]
pub struct SaleItemRepository {
    pool: SqlitePool,
}

impl SaleItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleItemRepository { pool }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Lists every item in key order.
    pub async fn list_all(&self) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(&format!("{SELECT_SALE_ITEM} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Lists the items of one sale in key order.
    pub async fn list_for_sale(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(&format!(
            "{SELECT_SALE_ITEM} WHERE sale_id = ?1 ORDER BY id"
        ))
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts on a borrowed connection and returns the row's key.
    pub async fn insert_with(conn: &mut SqliteConnection, item: &SaleItem) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO sale_items (id, sale_id, product_id, product_name, quantity, price, subtotal)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(item.id)
        .bind(item.sale_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(item.quantity)
        .bind(item.price)
        .bind(item.subtotal)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Removes every item on a borrowed connection.
    pub async fn clear_with(conn: &mut SqliteConnection) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sale_items").execute(conn).await?;
        Ok(result.rows_affected())
    }
}
