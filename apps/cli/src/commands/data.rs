//! # Data Commands
//!
//! Exports, backups, restore and storage info, all delivered through a
//! [`DirectorySink`] pointed at the configured export directory.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ApiError;
use pandesal_backup::{
    create_backup, export_products_csv, export_sales_csv, restore_backup_from_path, storage_info,
    DirectorySink,
};
use pandesal_core::{BackupStats, DisplayZone, RestoreOutcome, StorageInfo};
use pandesal_db::Database;

/// Where a CSV export landed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub path: PathBuf,
}

/// What a backup wrote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSummary {
    pub path: PathBuf,
    pub file_name: String,
    pub stats: BackupStats,
}

pub async fn export_sales(
    db: &Database,
    export_dir: &Path,
    zone: DisplayZone,
) -> Result<ExportSummary, ApiError> {
    let sink = DirectorySink::new(export_dir);
    let path = export_sales_csv(db, &sink, zone).await?;
    Ok(ExportSummary { path })
}

pub async fn export_products(db: &Database, export_dir: &Path) -> Result<ExportSummary, ApiError> {
    let sink = DirectorySink::new(export_dir);
    let path = export_products_csv(db, &sink).await?;
    Ok(ExportSummary { path })
}

pub async fn backup(
    db: &Database,
    export_dir: &Path,
    prefix: &str,
) -> Result<BackupSummary, ApiError> {
    let sink = DirectorySink::new(export_dir);
    let receipt = create_backup(db, &sink, prefix).await?;
    Ok(BackupSummary {
        path: receipt.location,
        file_name: receipt.file_name,
        stats: receipt.stats,
    })
}

/// Restore never errors; the outcome carries the message to show.
pub async fn restore(db: &Database, file: &Path) -> RestoreOutcome {
    restore_backup_from_path(db, file).await
}

pub async fn info(db: &Database) -> Result<StorageInfo, ApiError> {
    Ok(storage_info(db).await?)
}

pub fn format_storage_info(info: &StorageInfo) -> String {
    format!(
        "Products:      {}\nSales:         {}\nSale items:    {}\nTotal revenue: {:.2}\n",
        info.products, info.sales, info.sale_items, info.total_revenue
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sale::checkout;
    use crate::cli::CartLine;
    use chrono::Utc;
    use pandesal_db::{seed_default_products, DbConfig};

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_default_products(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_backup_then_restore_into_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded().await;
        let line = CartLine {
            product_id: 2,
            quantity: 2,
        };
        checkout(&db, &[line], 10.0, Utc::now()).await.unwrap();

        let summary = backup(&db, dir.path(), "pandehabibi").await.unwrap();
        assert!(summary.file_name.starts_with("pandehabibi-backup-"));
        assert_eq!(summary.stats.total_sales, 1);

        let fresh = Database::new(DbConfig::in_memory()).await.unwrap();
        let outcome = restore(&fresh, &summary.path).await;
        assert!(outcome.success, "{}", outcome.message);

        let info = info(&fresh).await.unwrap();
        assert_eq!(info.products, 5);
        assert_eq!(info.sales, 1);
        assert_eq!(info.sale_items, 1);
        assert_eq!(info.total_revenue, 10.0);
    }

    #[tokio::test]
    async fn test_exports_land_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded().await;

        let products = export_products(&db, dir.path()).await.unwrap();
        assert_eq!(products.path, dir.path().join("products-export.csv"));

        let sales = export_sales(&db, dir.path(), DisplayZone::Local).await.unwrap();
        let contents = std::fs::read_to_string(&sales.path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_restore_missing_file_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded().await;

        let outcome = restore(&db, &dir.path().join("nope.json")).await;

        assert!(!outcome.success);
        assert_eq!(db.products().count().await.unwrap(), 5);
    }

    #[test]
    fn test_format_storage_info() {
        let text = format_storage_info(&StorageInfo {
            products: 5,
            sales: 2,
            sale_items: 3,
            total_revenue: 30.5,
        });
        assert!(text.ends_with("Total revenue: 30.50\n"));
    }
}
