//! # Sale Commands
//!
//! Checkout and sales history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  --item 1:4 --item 3 --cash 20                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve each product id ──── missing ──► NOT_FOUND                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_checkout() ──── empty / inactive / qty / short cash ──► error   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  record_checkout()  one transaction: sale + items                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  receipt: total, change                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::cli::CartLine;
use crate::error::ApiError;
use pandesal_core::{build_checkout, CoreError, Sale, SaleItem};
use pandesal_db::Database;

/// A sale together with its lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

/// Records a sale stamped `now`.
pub async fn checkout(
    db: &Database,
    lines: &[CartLine],
    customer_cash: f64,
    now: DateTime<Utc>,
) -> Result<SaleDetail, ApiError> {
    let mut resolved = Vec::with_capacity(lines.len());
    for line in lines {
        let product = db
            .products()
            .get_by_id(line.product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(line.product_id))?;
        resolved.push((product, line.quantity));
    }

    let draft = build_checkout(
        &resolved,
        customer_cash,
        now.to_rfc3339_opts(SecondsFormat::Millis, true),
    )?;
    let (sale, items) = db.sales().record_checkout(&draft).await?;

    Ok(SaleDetail { sale, items })
}

/// All sales in key order, or the `latest` most recent ones.
pub async fn list_sales(db: &Database, latest: Option<u32>) -> Result<Vec<Sale>, ApiError> {
    let sales = match latest {
        Some(limit) => db.sales().list_recent(limit).await?,
        None => db.sales().list_all().await?,
    };
    Ok(sales)
}

pub async fn show_sale(db: &Database, id: i64) -> Result<SaleDetail, ApiError> {
    let sale = db
        .sales()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", id))?;
    let items = db.sale_items().list_for_sale(id).await?;

    Ok(SaleDetail { sale, items })
}

fn money(amount: Option<f64>) -> String {
    format!("{:.2}", amount.unwrap_or(0.0))
}

/// Plain-text sales table.
pub fn format_sales(sales: &[Sale]) -> String {
    let mut out = format!(
        "{:>5}  {:<24} {:>9} {:>6} {:>9} {:>9}\n",
        "ID", "Date", "Total", "Units", "Cash", "Change"
    );
    for sale in sales {
        out.push_str(&format!(
            "{:>5}  {:<24} {:>9.2} {:>6} {:>9} {:>9}\n",
            sale.id.map(|id| id.to_string()).unwrap_or_default(),
            sale.sale_date,
            sale.total_amount,
            sale.items_count,
            money(sale.customer_cash),
            money(sale.change),
        ));
    }
    out
}

/// Receipt-style rendering of one sale.
pub fn format_sale_detail(detail: &SaleDetail) -> String {
    let sale = &detail.sale;
    let mut out = format!(
        "Sale #{}  {}\n",
        sale.id.map(|id| id.to_string()).unwrap_or_default(),
        sale.sale_date
    );
    for item in &detail.items {
        out.push_str(&format!(
            "  {:>3} × {:<24} {:>8.2} {:>9.2}\n",
            item.quantity, item.product_name, item.price, item.subtotal
        ));
    }
    out.push_str(&format!("  Total  {:>9.2}\n", sale.total_amount));
    out.push_str(&format!("  Cash   {:>9}\n", money(sale.customer_cash)));
    out.push_str(&format!("  Change {:>9}\n", money(sale.change)));
    out
}
