//! Storage summary for the settings screen.

use tracing::error;

use pandesal_core::StorageInfo;
use pandesal_db::Database;

use crate::error::TransferResult;

/// Current counts of the three collections and the total revenue.
pub async fn storage_info(db: &Database) -> TransferResult<StorageInfo> {
    db.storage_info().await.map_err(|e| {
        error!(error = %e, "Error getting storage info");
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandesal_core::{Collections, Sale};
    use pandesal_db::DbConfig;

    #[tokio::test]
    async fn test_revenue_sums_all_sales() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sale = |total: f64| Sale {
            id: None,
            total_amount: total,
            items_count: 0,
            sale_date: "2025-01-05T00:00:00.000Z".to_string(),
            customer_cash: None,
            change: None,
        };
        db.replace_all(&Collections {
            sales: vec![sale(10.5), sale(20.0), sale(0.0)],
            ..Default::default()
        })
        .await
        .unwrap();

        let info = storage_info(&db).await.unwrap();

        assert_eq!(info.sales, 3);
        assert_eq!(info.total_revenue, 30.5);
        assert_eq!(info.products, 0);
        assert_eq!(info.sale_items, 0);
    }
}
