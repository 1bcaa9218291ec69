//! # Product Commands
//!
//! Catalog management.
//!
//! ```text
//! add ──► validate name/price ──► insert ──► Product { id }
//! update ──► load ──► apply changes ──► validate ──► update
//! activate / deactivate ──► set_active
//! delete ──► hard delete (sale items keep their own copy)
//! ```

use tracing::info;

use crate::error::ApiError;
use pandesal_core::validation::{validate_price, validate_product_name};
use pandesal_core::Product;
use pandesal_db::Database;

/// Fields a catalog edit may change. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

pub async fn list_products(db: &Database, active_only: bool) -> Result<Vec<Product>, ApiError> {
    let products = if active_only {
        db.products().list_active().await?
    } else {
        db.products().list_all().await?
    };
    Ok(products)
}

/// Adds a product to the catalog.
pub async fn add_product(
    db: &Database,
    name: &str,
    price: f64,
    image: Option<String>,
    is_active: bool,
) -> Result<Product, ApiError> {
    validate_product_name(name)?;
    validate_price(price)?;

    let product = Product {
        image,
        is_active,
        ..Product::new(name.trim(), price)
    };
    let product = db.products().insert(&product).await?;

    info!(id = ?product.id, name = %product.name, "Product added");
    Ok(product)
}

/// Edits an existing product.
pub async fn update_product(
    db: &Database,
    id: i64,
    changes: ProductChanges,
) -> Result<Product, ApiError> {
    let mut product = db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    if let Some(name) = changes.name {
        validate_product_name(&name)?;
        product.name = name.trim().to_string();
    }
    if let Some(price) = changes.price {
        validate_price(price)?;
        product.price = price;
    }
    if let Some(image) = changes.image {
        product.image = (!image.is_empty()).then_some(image);
    }

    db.products().update(&product).await?;
    info!(id = id, "Product updated");
    Ok(product)
}

pub async fn set_product_active(db: &Database, id: i64, is_active: bool) -> Result<(), ApiError> {
    db.products().set_active(id, is_active).await?;
    info!(id = id, is_active = is_active, "Product visibility changed");
    Ok(())
}

pub async fn delete_product(db: &Database, id: i64) -> Result<(), ApiError> {
    db.products().delete(id).await?;
    info!(id = id, "Product deleted");
    Ok(())
}

/// Plain-text catalog table.
pub fn format_products(products: &[Product]) -> String {
    let mut out = format!("{:>4}  {:<28} {:>8}  {}\n", "ID", "Name", "Price", "Active");
    for product in products {
        out.push_str(&format!(
            "{:>4}  {:<28} {:>8.2}  {}\n",
            product.id.map(|id| id.to_string()).unwrap_or_default(),
            product.name,
            product.price,
            if product.is_active { "yes" } else { "no" }
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pandesal_db::DbConfig;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_trims_and_validates() {
        let db = db().await;

        let added = add_product(&db, "  Malunggay Pandesal ", 4.0, None, true)
            .await
            .unwrap();
        assert_eq!(added.name, "Malunggay Pandesal");
        assert!(added.id.is_some());

        let err = add_product(&db, "", 4.0, None, true).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_product(&db, "Free Sample", -1.0, None, true).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(list_products(&db, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let db = db().await;
        let added = add_product(&db, "Ube Pandesal", 6.0, Some("ube.png".into()), true)
            .await
            .unwrap();
        let id = added.id.unwrap();

        let updated = update_product(
            &db,
            id,
            ProductChanges {
                price: Some(6.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Ube Pandesal");
        assert_eq!(updated.price, 6.5);
        assert_eq!(updated.image.as_deref(), Some("ube.png"));

        let cleared = update_product(
            &db,
            id,
            ProductChanges {
                image: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared.image, None);
    }

    #[tokio::test]
    async fn test_toggle_and_delete() {
        let db = db().await;
        let id = add_product(&db, "Cheese Pandesal", 7.0, None, true)
            .await
            .unwrap()
            .id
            .unwrap();

        set_product_active(&db, id, false).await.unwrap();
        assert!(list_products(&db, true).await.unwrap().is_empty());

        delete_product(&db, id).await.unwrap();
        let err = delete_product(&db, id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_format_products() {
        let product = Product {
            id: Some(1),
            ..Product::new("Regular Pandesal", 3.0)
        };
        let table = format_products(&[product]);
        assert!(table.lines().nth(1).unwrap().contains("Regular Pandesal"));
        assert!(table.contains("3.00"));
    }
}
