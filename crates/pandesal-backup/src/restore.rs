//! # Backup Restore
//!
//! Replaces the whole store with the contents of a backup file.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  text ──► parse JSON ──── fails ─────────────────► failed()             │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  data.products / data.sales / data.saleItems truthy?                    │
//! │               │  no ─────────────────────────────► invalid_format()     │
//! │               ▼                                                         │
//! │  decode records ─── fails ───────────────────────► failed()             │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  db.replace_all()  (clear ×3, insert ×3, one transaction)               │
//! │               │  fails (rolled back) ────────────► failed()             │
//! │               ▼                                                         │
//! │  stats block missing or null ────────────────────► failed()             │
//! │               │  (data already replaced)                                │
//! │               ▼                                                         │
//! │  succeeded("Backup restored! <stats.totalProducts> products, ...")      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here returns an error. The caller always gets a
//! [`RestoreOutcome`] to show the user.

use std::path::Path;

use serde_json::Value;
use tracing::{error, info, warn};

use pandesal_core::backup::{decode_collections, has_required_collections, restore_success_message};
use pandesal_core::RestoreOutcome;
use pandesal_db::Database;

/// Restores from backup text.
pub async fn restore_backup_from_str(db: &Database, text: &str) -> RestoreOutcome {
    let document: Value = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(e) => {
            error!(error = %e, "Error restoring backup: not valid JSON");
            return RestoreOutcome::failed();
        }
    };

    if !has_required_collections(&document) {
        warn!("Backup file is missing data.products, data.sales or data.saleItems");
        return RestoreOutcome::invalid_format();
    }

    let collections = match decode_collections(&document) {
        Ok(collections) => collections,
        Err(e) => {
            error!(error = %e, "Error restoring backup: unreadable records");
            return RestoreOutcome::failed();
        }
    };

    if let Err(e) = db.replace_all(&collections).await {
        error!(error = %e, "Error restoring backup: store left unchanged");
        return RestoreOutcome::failed();
    }

    info!(
        products = collections.products.len(),
        sales = collections.sales.len(),
        sale_items = collections.sale_items.len(),
        "Backup restored"
    );

    // The data is already replaced; a file without stats still reports failure.
    match restore_success_message(&document) {
        Some(message) => RestoreOutcome::succeeded(message),
        None => {
            error!("Error restoring backup: file has no stats block");
            RestoreOutcome::failed()
        }
    }
}

/// Restores from a backup file on disk.
///
/// A file that cannot be read as UTF-8 text fails like malformed JSON.
pub async fn restore_backup_from_path(db: &Database, path: impl AsRef<Path>) -> RestoreOutcome {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(text) => restore_backup_from_str(db, &text).await,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error reading backup file");
            RestoreOutcome::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::create_backup_at;
    use crate::sink::MemorySink;
    use chrono::{TimeZone, Utc};
    use pandesal_core::backup::{INVALID_FORMAT_MESSAGE, RESTORE_FAILED_MESSAGE};
    use pandesal_core::{build_checkout, Collections};
    use pandesal_db::{seed_default_products, DbConfig};
    use serde_json::json;

    /// Seeded catalog plus two checkouts.
    async fn busy_store() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_default_products(&db).await.unwrap();

        let regular = db.products().get_by_id(1).await.unwrap().unwrap();
        let cheese = db.products().get_by_id(4).await.unwrap().unwrap();
        let first = build_checkout(&[(regular.clone(), 4), (cheese, 1)], 20.0, "2025-01-05T02:30:00.000Z")
            .unwrap();
        let second = build_checkout(&[(regular, 2)], 10.0, "2025-01-05T04:10:00.000Z").unwrap();
        db.sales().record_checkout(&first).await.unwrap();
        db.sales().record_checkout(&second).await.unwrap();

        db.products().set_active(5, false).await.unwrap();
        db
    }

    async fn backup_text(db: &Database) -> String {
        let sink = MemorySink::new();
        let now = Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap();
        create_backup_at(db, &sink, "pandehabibi", now).await.unwrap();
        sink.last().await.unwrap().contents
    }

    #[tokio::test]
    async fn test_round_trip_reproduces_store() {
        let db = busy_store().await;
        let before = db.snapshot().await.unwrap();
        let text = backup_text(&db).await;

        db.replace_all(&Collections::default()).await.unwrap();
        assert_eq!(db.storage_info().await.unwrap().products, 0);

        let outcome = restore_backup_from_str(&db, &text).await;

        assert_eq!(
            outcome,
            RestoreOutcome::succeeded("Backup restored! 5 products, 2 sales")
        );
        assert_eq!(db.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_missing_sales_is_invalid_and_changes_nothing() {
        let db = busy_store().await;
        let before = db.storage_info().await.unwrap();

        let text = json!({
            "version": "1.0",
            "data": { "products": [], "saleItems": [] },
            "stats": { "totalProducts": 0, "totalSales": 0 }
        })
        .to_string();
        let outcome = restore_backup_from_str(&db, &text).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, INVALID_FORMAT_MESSAGE);
        assert_eq!(db.storage_info().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_duplicate_item_ids_roll_back_everything() {
        let db = busy_store().await;
        let before = db.snapshot().await.unwrap();

        let text = json!({
            "data": {
                "products": [{ "id": 1, "name": "Only", "price": 1.0, "image": null, "is_active": true }],
                "sales": [{ "id": 1, "total_amount": 2.0, "items_count": 2, "sale_date": "2025-01-06T00:00:00.000Z" }],
                "saleItems": [
                    { "id": 9, "sale_id": 1, "product_id": 1, "product_name": "Only", "quantity": 1, "price": 1.0, "subtotal": 1.0 },
                    { "id": 9, "sale_id": 1, "product_id": 1, "product_name": "Only", "quantity": 1, "price": 1.0, "subtotal": 1.0 }
                ]
            },
            "stats": { "totalProducts": 1, "totalSales": 1 }
        })
        .to_string();
        let outcome = restore_backup_from_str(&db, &text).await;

        assert_eq!(outcome, RestoreOutcome::failed());
        assert_eq!(db.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_malformed_json_fails() {
        let db = busy_store().await;
        let before = db.storage_info().await.unwrap();

        let outcome = restore_backup_from_str(&db, "{ not json").await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, RESTORE_FAILED_MESSAGE);
        assert_eq!(db.storage_info().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_mistyped_collection_fails_without_mutation() {
        let db = busy_store().await;
        let before = db.storage_info().await.unwrap();

        let text = r#"{"data": {"products": "lots", "sales": [], "saleItems": []}}"#;
        let outcome = restore_backup_from_str(&db, text).await;

        assert_eq!(outcome, RestoreOutcome::failed());
        assert_eq!(db.storage_info().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_message_trusts_file_stats() {
        let db = busy_store().await;
        let mut document: Value = serde_json::from_str(&backup_text(&db).await).unwrap();
        document["stats"]["totalProducts"] = json!(99);

        let outcome = restore_backup_from_str(&db, &document.to_string()).await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "Backup restored! 99 products, 2 sales");
        assert_eq!(db.storage_info().await.unwrap().products, 5);
    }

    #[tokio::test]
    async fn test_missing_stats_block_reports_failure_after_replacing() {
        for stats in [None, Some(Value::Null)] {
            let db = busy_store().await;
            let mut document = json!({
                "data": {
                    "products": [{ "id": 1, "name": "Only", "price": 1.0, "image": null, "is_active": true }],
                    "sales": [],
                    "saleItems": []
                }
            });
            if let Some(stats) = stats {
                document["stats"] = stats;
            }

            let outcome = restore_backup_from_str(&db, &document.to_string()).await;

            assert_eq!(outcome, RestoreOutcome::failed());
            let info = db.storage_info().await.unwrap();
            assert_eq!((info.products, info.sales, info.sale_items), (1, 0, 0));
        }
    }

    #[tokio::test]
    async fn test_empty_collections_restore_to_empty_store() {
        let db = busy_store().await;

        let text = json!({
            "data": { "products": [], "sales": [], "saleItems": [] },
            "stats": { "totalProducts": 0, "totalSales": 0 }
        })
        .to_string();
        let outcome = restore_backup_from_str(&db, &text).await;

        assert_eq!(
            outcome,
            RestoreOutcome::succeeded("Backup restored! 0 products, 0 sales")
        );
        let info = db.storage_info().await.unwrap();
        assert_eq!((info.products, info.sales, info.sale_items), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_restore_from_path() {
        let db = busy_store().await;
        let before = db.snapshot().await.unwrap();
        let text = backup_text(&db).await;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pandehabibi-backup-2025-01-05.json");
        std::fs::write(&path, text).unwrap();
        db.replace_all(&Collections::default()).await.unwrap();

        let outcome = restore_backup_from_path(&db, &path).await;
        assert!(outcome.success);
        assert_eq!(db.snapshot().await.unwrap(), before);

        let missing = restore_backup_from_path(&db, tmp.path().join("nope.json")).await;
        assert_eq!(missing, RestoreOutcome::failed());
    }
}
