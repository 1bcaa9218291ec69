//! # Sale Repository
//!
//! Database operations for sales, including writing a checkout.
//!
//! ## Checkout Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       record_checkout()                                 │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │   ├── INSERT sales        → new sale id                                │
//! │   ├── INSERT sale_items   (sale_id = new id) × n                       │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any failure drops the transaction: no sale without its items.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::sale_item::SaleItemRepository;
use pandesal_core::{CheckoutDraft, Sale, SaleItem};

const SELECT_SALE: &str =
    "SELECT id, total_amount, items_count, sale_date, customer_cash, change FROM sales";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Lists every sale in key order.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALE} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Lists the most recent sales first, for the history view.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "{SELECT_SALE} ORDER BY sale_date DESC, id DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Sum of `total_amount` over all sales, added up in key order.
    pub async fn total_revenue(&self) -> DbResult<f64> {
        let totals: Vec<f64> = sqlx::query_scalar("SELECT total_amount FROM sales ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(totals.into_iter().sum())
    }

    /// Writes a checkout: the sale and all of its lines, atomically.
    ///
    /// ## Returns
    /// The stored sale and items with their assigned keys, items pointing at
    /// the new sale.
    pub async fn record_checkout(&self, draft: &CheckoutDraft) -> DbResult<(Sale, Vec<SaleItem>)> {
        let mut tx = self.pool.begin().await?;

        let sale_id = Self::insert_with(&mut tx, &draft.sale).await?;

        let mut items = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            let item = SaleItem {
                sale_id,
                ..item.clone()
            };
            let id = SaleItemRepository::insert_with(&mut tx, &item).await?;
            items.push(SaleItem {
                id: Some(id),
                ..item
            });
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            sale_id = sale_id,
            total = draft.sale.total_amount,
            lines = items.len(),
            "Checkout recorded"
        );

        let sale = Sale {
            id: Some(sale_id),
            ..draft.sale.clone()
        };
        Ok((sale, items))
    }

    // =========================================================================
    // Connection-scoped operations
    // =========================================================================

    /// Inserts on a borrowed connection and returns the row's key.
    pub async fn insert_with(conn: &mut SqliteConnection, sale: &Sale) -> DbResult<i64> {
        debug!(sale_date = %sale.sale_date, "Inserting sale");

        let result = sqlx::query(
            r#"
            INSERT INTO sales (id, total_amount, items_count, sale_date, customer_cash, change)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(sale.id)
        .bind(sale.total_amount)
        .bind(sale.items_count)
        .bind(&sale.sale_date)
        .bind(sale.customer_cash)
        .bind(sale.change)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Removes every sale on a borrowed connection.
    pub async fn clear_with(conn: &mut SqliteConnection) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sales").execute(conn).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use pandesal_core::{build_checkout, Product};

    #[tokio::test]
    async fn test_record_checkout_links_items() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let regular = db.products().insert(&Product::new("Regular Pandesal", 3.0)).await.unwrap();
        let ube = db.products().insert(&Product::new("Ube Pandesal", 6.0)).await.unwrap();

        let draft = build_checkout(&[(regular, 4), (ube, 1)], 20.0, "2025-01-05T02:30:00.000Z")
            .unwrap();
        let (sale, items) = db.sales().record_checkout(&draft).await.unwrap();

        let sale_id = sale.id.unwrap();
        assert!(items.iter().all(|item| item.sale_id == sale_id));

        let stored = db.sales().get_by_id(sale_id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount, 18.0);
        assert_eq!(stored.change, Some(2.0));

        let stored_items = db.sale_items().list_for_sale(sale_id).await.unwrap();
        assert_eq!(stored_items, items);
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let bread = db.products().insert(&Product::new("Regular Pandesal", 3.0)).await.unwrap();

        for date in ["2025-01-05T01:00:00Z", "2025-01-07T01:00:00Z", "2025-01-06T01:00:00Z"] {
            let draft = build_checkout(&[(bread.clone(), 1)], 3.0, date).unwrap();
            db.sales().record_checkout(&draft).await.unwrap();
        }

        let recent = db.sales().list_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].sale_date, "2025-01-07T01:00:00Z");
        assert_eq!(recent[1].sale_date, "2025-01-06T01:00:00Z");
        assert_eq!(db.sales().total_revenue().await.unwrap(), 9.0);
    }
}
