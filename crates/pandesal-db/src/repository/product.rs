//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Listing (all, or only what the POS grid shows)
//! - CRUD with hard delete
//! - Active/inactive toggling
//!
//! Deleting a product leaves its historical sale items untouched; they carry
//! their own copy of name and price.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use pandesal_core::Product;

const SELECT_PRODUCT: &str = "SELECT id, name, price, image, is_active FROM products";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let grid = repo.list_active().await?;
/// let product = repo.get_by_id(3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Counts all products, active or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Lists every product in key order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Lists the products offered at the POS, in key order.
    pub async fn list_active(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "{SELECT_PRODUCT} WHERE is_active = 1 ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed active products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a product and returns it with its assigned key.
    ///
    /// An explicit `id` is kept; `None` gets the next key.
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let mut conn = self.pool.acquire().await?;
        let id = Self::insert_with(&mut conn, product).await?;

        Ok(Product {
            id: Some(id),
            ..product.clone()
        })
    }

    /// Updates name, price, image and active flag of an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist or has no id
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        let id = product
            .id
            .ok_or_else(|| DbError::not_found("Product", "none"))?;

        debug!(id = id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                image = ?4,
                is_active = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.is_active)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Shows or hides a product on the POS grid.
    pub async fn set_active(&self, id: i64, is_active: bool) -> DbResult<()> {
        debug!(id = id, is_active = is_active, "Toggling product");

        let result = sqlx::query("UPDATE products SET is_active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(is_active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Permanently removes a product.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    // =========================================================================
    // Connection-scoped operations
    // =========================================================================

    /// Inserts on a borrowed connection (usually a transaction) and returns
    /// the row's key.
    pub async fn insert_with(conn: &mut SqliteConnection, product: &Product) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (id, name, price, image, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.is_active)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Counts products on a borrowed connection.
    pub async fn count_with(conn: &mut SqliteConnection) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(conn)
            .await?;

        Ok(count)
    }

    /// Removes every product on a borrowed connection.
    pub async fn clear_with(conn: &mut SqliteConnection) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM products").execute(conn).await?;
        Ok(result.rows_affected())
    }
}
