//! # Database Pool Management
//!
//! Connection pool creation plus the whole-store operations that span all
//! three collections.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  CLI startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ├── products() / sales() / sale_items()   per-collection         │
//! │       ├── snapshot()      all three, one read transaction              │
//! │       ├── replace_all()   clear + reload, one write transaction        │
//! │       └── storage_info()  counts + revenue                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File-backed stores use WAL so history views can read while a checkout
//! is being written.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::sale_item::SaleItemRepository;
use pandesal_core::{Collections, Product, Sale, SaleItem, StorageInfo};

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the store lives and how many connections it may hold.
///
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/pandesal/pandesal.db").max_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,

    /// Default 4. A till has one writer; the rest serve history reads.
    pub max_connections: u32,

    /// How long to wait for a free connection before `PoolExhausted`.
    pub acquire_timeout: Duration,

    /// Migrations run on open unless switched off.
    pub run_migrations: bool,
}

impl DbConfig {
    /// A file-backed store, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            acquire_timeout: Duration::from_secs(10),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// A private, empty store that lives as long as the pool.
    ///
    /// Pinned to one connection: a second connection would open a
    /// different in-memory database.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            ..DbConfig::new(MEMORY_PATH)
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the store. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the store and runs migrations if enabled.
    ///
    /// ## Connection Settings
    /// - WAL journal for file-backed stores
    /// - NORMAL synchronous
    /// - foreign keys off: the schema declares none, sale items only refer
    ///   to sales and products by convention
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let mut connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(false)
            .create_if_missing(true);

        if !config.is_in_memory() {
            connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        }

        // The last connection to an in-memory store owns its data.
        let keep_alive = if config.is_in_memory() { 1 } else { 0 };

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(keep_alive)
            .idle_timeout(None)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Safe to call on an up-to-date store.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Returns the sale item repository.
    pub fn sale_items(&self) -> SaleItemRepository {
        SaleItemRepository::new(self.pool.clone())
    }

    // =========================================================================
    // Whole-store operations
    // =========================================================================

    /// Counts of all three collections and the revenue across all sales.
    pub async fn storage_info(&self) -> DbResult<StorageInfo> {
        let info = StorageInfo {
            products: self.products().count().await?,
            sales: self.sales().count().await?,
            sale_items: self.sale_items().count().await?,
            total_revenue: self.sales().total_revenue().await?,
        };

        debug!(
            products = info.products,
            sales = info.sales,
            sale_items = info.sale_items,
            "Storage info"
        );
        Ok(info)
    }

    /// Reads all three collections, each in key order, from one consistent
    /// view of the store.
    pub async fn snapshot(&self) -> DbResult<Collections> {
        let mut tx = self.pool.begin().await?;

        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, image, is_active FROM products ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, total_amount, items_count, sale_date, customer_cash, change FROM sales ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let sale_items = sqlx::query_as::<_, SaleItem>(
            "SELECT id, sale_id, product_id, product_name, quantity, price, subtotal FROM sale_items ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Collections {
            products,
            sales,
            sale_items,
        })
    }

    /// Replaces the contents of all three collections.
    ///
    /// Clears products, sales and sale items, then inserts the given records
    /// with their ids preserved, all in one transaction. On any failure
    /// (a duplicate id, for instance) nothing changes.
    pub async fn replace_all(&self, collections: &Collections) -> DbResult<()> {
        info!(
            products = collections.products.len(),
            sales = collections.sales.len(),
            sale_items = collections.sale_items.len(),
            "Replacing store contents"
        );

        let mut tx = self.pool.begin().await?;

        ProductRepository::clear_with(&mut tx).await?;
        SaleRepository::clear_with(&mut tx).await?;
        SaleItemRepository::clear_with(&mut tx).await?;

        for product in &collections.products {
            ProductRepository::insert_with(&mut tx, product).await?;
        }
        for sale in &collections.sales {
            SaleRepository::insert_with(&mut tx, sale).await?;
        }
        for item in &collections.sale_items {
            SaleItemRepository::insert_with(&mut tx, item).await?;
        }

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Replace commit failed");
            DbError::TransactionFailed(e.to_string())
        })?;

        info!("Store contents replaced");
        Ok(())
    }

    /// Closes the pool. Later operations fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// `true` when a trivial query succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(id: i64, total: f64) -> Sale {
        Sale {
            id: Some(id),
            total_amount: total,
            items_count: 1,
            sale_date: "2025-01-05T02:30:00.000Z".to_string(),
            customer_cash: None,
            change: None,
        }
    }

    fn item(id: i64, sale_id: i64) -> SaleItem {
        SaleItem {
            id: Some(id),
            sale_id,
            product_id: 1,
            product_name: "Regular Pandesal".to_string(),
            quantity: 1,
            price: 3.0,
            subtotal: 3.0,
        }
    }

    fn collections() -> Collections {
        Collections {
            products: vec![
                Product {
                    id: Some(1),
                    ..Product::new("Regular Pandesal", 3.0)
                },
                Product {
                    id: Some(7),
                    is_active: false,
                    image: Some("data:image/png;base64,AAAA".to_string()),
                    ..Product::new("Cheese Pandesal", 7.0)
                },
            ],
            sales: vec![sale(3, 10.5), sale(4, 20.0)],
            sale_items: vec![item(1, 3), item(2, 4), item(3, 99)],
        }
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/shop.db").max_connections(2).run_migrations(false);

        assert_eq!(config.max_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_replace_then_snapshot_preserves_records() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products().insert(&Product::new("Old", 1.0)).await.unwrap();

        db.replace_all(&collections()).await.unwrap();

        // Dangling sale_id 99 is kept as-is.
        assert_eq!(db.snapshot().await.unwrap(), collections());
    }

    #[tokio::test]
    async fn test_replace_rolls_back_on_duplicate_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.replace_all(&collections()).await.unwrap();

        let mut broken = Collections::default();
        broken.products.push(Product::new("New", 2.0));
        broken.sale_items = vec![item(5, 1), item(5, 1)];

        let err = db.replace_all(&broken).await.unwrap_err();
        assert!(matches!(err, DbError::DuplicateKey { .. }));

        assert_eq!(db.snapshot().await.unwrap(), collections());
    }

    #[tokio::test]
    async fn test_storage_info_matches_contents() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.replace_all(&collections()).await.unwrap();

        let info = db.storage_info().await.unwrap();
        assert_eq!(info.products, 2);
        assert_eq!(info.sales, 2);
        assert_eq!(info.sale_items, 3);
        assert_eq!(info.total_revenue, 30.5);
    }

    #[tokio::test]
    async fn test_new_ids_follow_restored_ids() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.replace_all(&collections()).await.unwrap();

        let added = db.products().insert(&Product::new("Ube Pandesal", 6.0)).await.unwrap();
        assert!(added.id.unwrap() > 7);
    }
}
