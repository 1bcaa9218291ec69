//! # Backup Creation
//!
//! ```text
//! db.snapshot()                 one read transaction, all three collections
//!      │
//!      ▼
//! BackupDocument::new(now)      version, timestamp, data, computed stats
//!      │
//!      ▼
//! to_pretty_json()              two-space indentation
//!      │
//!      ▼
//! sink.deliver("<prefix>-backup-YYYY-MM-DD.json")
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use pandesal_core::backup::{backup_file_name, BACKUP_MIME_TYPE};
use pandesal_core::{BackupDocument, BackupStats, ExportError};
use pandesal_db::Database;

use crate::error::TransferResult;
use crate::sink::{ExportFile, ExportSink};

/// What a successful backup produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupReceipt {
    pub location: PathBuf,
    pub file_name: String,
    pub stats: BackupStats,
}

/// Backs up the whole store, stamped with the current time.
pub async fn create_backup<S: ExportSink>(
    db: &Database,
    sink: &S,
    prefix: &str,
) -> TransferResult<BackupReceipt> {
    create_backup_at(db, sink, prefix, Utc::now()).await
}

/// Backs up the whole store as of `now`.
pub async fn create_backup_at<S: ExportSink>(
    db: &Database,
    sink: &S,
    prefix: &str,
    now: DateTime<Utc>,
) -> TransferResult<BackupReceipt> {
    let result = async {
        let collections = db.snapshot().await?;
        let document = BackupDocument::new(collections, now);
        let contents = document.to_pretty_json().map_err(ExportError::from)?;

        let file_name = backup_file_name(prefix, now.date_naive());
        let location = sink
            .deliver(ExportFile::new(file_name.clone(), BACKUP_MIME_TYPE, contents))
            .await?;

        info!(
            products = document.stats.total_products,
            sales = document.stats.total_sales,
            sale_items = document.stats.total_sale_items,
            path = %location.display(),
            "Backup created"
        );
        TransferResult::Ok(BackupReceipt {
            location,
            file_name,
            stats: document.stats,
        })
    }
    .await;

    if let Err(e) = &result {
        error!(error = %e, "Error creating backup");
    }
    result
}
