//! # CSV Export Routines
//!
//! Reads the store, renders a CSV document, hands it to a sink.
//!
//! ```text
//! list_all() ──► render_*_csv() ──► ExportFile ──► sink.deliver()
//!     │               │                                 │
//!     └───────────────┴──────── any failure ────────────┴──► error! + Err
//! ```
//!
//! The document is fully built before the sink sees it.

use std::path::PathBuf;

use tracing::{error, info};

use pandesal_core::export::{
    render_products_csv, render_sales_csv, CSV_MIME_TYPE, PRODUCTS_CSV_FILE_NAME,
    SALES_CSV_FILE_NAME,
};
use pandesal_core::DisplayZone;
use pandesal_db::Database;

use crate::error::TransferResult;
use crate::sink::{ExportFile, ExportSink};

/// Exports every sale with its items to `sales-export.csv`.
pub async fn export_sales_csv<S: ExportSink>(
    db: &Database,
    sink: &S,
    zone: DisplayZone,
) -> TransferResult<PathBuf> {
    let result = async {
        let sales = db.sales().list_all().await?;
        let items = db.sale_items().list_all().await?;
        let contents = render_sales_csv(&sales, &items, zone)?;

        let location = sink
            .deliver(ExportFile::new(SALES_CSV_FILE_NAME, CSV_MIME_TYPE, contents))
            .await?;

        info!(
            sales = sales.len(),
            items = items.len(),
            path = %location.display(),
            "Sales exported"
        );
        TransferResult::Ok(location)
    }
    .await;

    if let Err(e) = &result {
        error!(error = %e, "Error exporting sales");
    }
    result
}

/// Exports the whole catalog to `products-export.csv`.
pub async fn export_products_csv<S: ExportSink>(db: &Database, sink: &S) -> TransferResult<PathBuf> {
    let result = async {
        let products = db.products().list_all().await?;
        let contents = render_products_csv(&products)?;

        let location = sink
            .deliver(ExportFile::new(PRODUCTS_CSV_FILE_NAME, CSV_MIME_TYPE, contents))
            .await?;

        info!(products = products.len(), path = %location.display(), "Products exported");
        TransferResult::Ok(location)
    }
    .await;

    if let Err(e) = &result {
        error!(error = %e, "Error exporting products");
    }
    result
}
