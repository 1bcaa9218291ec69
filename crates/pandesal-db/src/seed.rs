//! # First-Run Seeding
//!
//! Fills an empty catalog with the bakery's default products.
//!
//! ```text
//! seed_default_products()
//!      │
//!      ├── products table has rows? ──► AlreadyPopulated (no writes)
//!      │
//!      └── empty ──► insert the five defaults in one transaction ──► Seeded
//! ```
//!
//! Only products are ever seeded. Sales and sale items start empty.

use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::product::ProductRepository;
use pandesal_core::Product;

/// The catalog a fresh install starts with: `(name, price)`.
pub const DEFAULT_PRODUCTS: [(&str, f64); 5] = [
    ("Regular Pandesal", 3.0),
    ("Special Pandesal", 5.0),
    ("Ube Pandesal", 6.0),
    ("Cheese Pandesal", 7.0),
    ("Chocolate Pandesal", 8.0),
];

/// What a seeding attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog was empty; this many products were inserted.
    Seeded(usize),
    /// The catalog already held this many products; nothing was written.
    AlreadyPopulated(i64),
}

/// Default products as unsaved records: active, no image.
pub fn default_products() -> Vec<Product> {
    DEFAULT_PRODUCTS
        .iter()
        .map(|(name, price)| Product::new(*name, *price))
        .collect()
}

/// Seeds the catalog if, and only if, it is empty.
///
/// The emptiness check and the inserts share one transaction, so calling
/// this any number of times leaves at most one set of defaults.
pub async fn seed_default_products(db: &Database) -> DbResult<SeedOutcome> {
    let mut tx = db.pool().begin().await?;

    let existing = ProductRepository::count_with(&mut tx).await?;
    if existing > 0 {
        debug!(existing = existing, "Catalog already populated, skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated(existing));
    }

    let defaults = default_products();
    for product in &defaults {
        ProductRepository::insert_with(&mut tx, product).await?;
    }

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    info!(count = defaults.len(), "Seeded default products");
    Ok(SeedOutcome::Seeded(defaults.len()))
}
