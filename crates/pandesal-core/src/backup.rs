//! # Backup Documents
//!
//! The JSON document a backup writes and a restore reads back.
//!
//! ## Document Shape
//! ```text
//! {
//!   "version": "1.0",
//!   "timestamp": "2025-01-05T02:30:00.000Z",
//!   "data": {
//!     "products":  [ {id, name, price, image, is_active}, ... ],
//!     "sales":     [ {id, total_amount, items_count, sale_date, customer_cash, change}, ... ],
//!     "saleItems": [ {id, sale_id, product_id, product_name, quantity, price, subtotal}, ... ]
//!   },
//!   "stats": { "totalProducts", "totalSales", "totalSaleItems", "totalRevenue" }
//! }
//! ```
//!
//! ## Reading Untrusted Files
//! A restore looks at the file in two passes. The shape check works on a raw
//! [`serde_json::Value`] and only asks whether the three collections are
//! present and truthy. Only then are the collections decoded into records.
//! The `stats` block is never recomputed on restore; the success message
//! echoes whatever the file says.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::export::format_amount;
use crate::types::Collections;
use crate::BACKUP_FORMAT_VERSION;

/// Message returned when the file parses but lacks a collection.
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid backup file format";

/// Message returned for every other restore failure.
pub const RESTORE_FAILED_MESSAGE: &str = "Failed to restore backup. Please check the file.";

/// MIME type of backup files.
pub const BACKUP_MIME_TYPE: &str = "application/json";

// =============================================================================
// Stats
// =============================================================================

/// Summary counts written next to the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BackupStats {
    pub total_products: i64,
    pub total_sales: i64,
    pub total_sale_items: i64,
    pub total_revenue: f64,
}

impl BackupStats {
    pub fn from_collections(collections: &Collections) -> Self {
        BackupStats {
            total_products: collections.products.len() as i64,
            total_sales: collections.sales.len() as i64,
            total_sale_items: collections.sale_items.len() as i64,
            total_revenue: collections.total_revenue(),
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// A complete backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub version: String,
    /// Creation instant, RFC 3339 in UTC with milliseconds.
    pub timestamp: String,
    pub data: Collections,
    pub stats: BackupStats,
}

impl BackupDocument {
    /// Wraps a snapshot of the store taken at `now`.
    pub fn new(data: Collections, now: DateTime<Utc>) -> Self {
        let stats = BackupStats::from_collections(&data);
        BackupDocument {
            version: BACKUP_FORMAT_VERSION.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            data,
            stats,
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `<prefix>-backup-<YYYY-MM-DD>.json`
pub fn backup_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-backup-{}.json", prefix, date.format("%Y-%m-%d"))
}

// =============================================================================
// Restore Outcome
// =============================================================================

/// Result of a restore, reported to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RestoreOutcome {
    pub success: bool,
    pub message: String,
}

impl RestoreOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        RestoreOutcome {
            success: true,
            message: message.into(),
        }
    }

    pub fn invalid_format() -> Self {
        RestoreOutcome {
            success: false,
            message: INVALID_FORMAT_MESSAGE.to_string(),
        }
    }

    pub fn failed() -> Self {
        RestoreOutcome {
            success: false,
            message: RESTORE_FAILED_MESSAGE.to_string(),
        }
    }
}

// =============================================================================
// Reading Backups
// =============================================================================

/// Loose truthiness: `null`, `false`, `0`, and `""` are falsy.
///
/// Arrays and objects are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether `data.products`, `data.sales` and `data.saleItems` are all truthy.
pub fn has_required_collections(document: &Value) -> bool {
    let data = &document["data"];
    is_truthy(&data["products"]) && is_truthy(&data["sales"]) && is_truthy(&data["saleItems"])
}

/// Decodes the `data` block into typed collections.
pub fn decode_collections(document: &Value) -> serde_json::Result<Collections> {
    Collections::deserialize(&document["data"])
}

/// Renders one `stats` value the way it is shown in the restore message.
///
/// Follows string interpolation of loosely typed values: a missing key is
/// `undefined`, arrays join their elements with commas (nulls empty) and
/// objects collapse to `[object Object]`.
fn stat_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(value) => interpolated(value),
    }
}

fn interpolated(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_i64() {
            Some(whole) => whole.to_string(),
            None => number.as_f64().map(format_amount).unwrap_or_default(),
        },
        Value::Array(elements) => elements
            .iter()
            .map(|element| match element {
                Value::Null => String::new(),
                other => interpolated(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// `Backup restored! <totalProducts> products, <totalSales> sales`, taken
/// from the file's own stats block.
///
/// `None` when the file has no `stats` block at all (absent or `null`);
/// the restore then reports failure even though the data was replaced.
pub fn restore_success_message(document: &Value) -> Option<String> {
    let stats = match document.get("stats") {
        None | Some(Value::Null) => return None,
        Some(stats) => stats,
    };
    Some(format!(
        "Backup restored! {} products, {} sales",
        stat_text(stats.get("totalProducts")),
        stat_text(stats.get("totalSales"))
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, Sale, SaleItem};
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Collections {
        let sale = |id: i64, total: f64| Sale {
            id: Some(id),
            total_amount: total,
            items_count: 1,
            sale_date: "2025-01-05T02:30:00.000Z".to_string(),
            customer_cash: Some(total),
            change: Some(0.0),
        };
        Collections {
            products: vec![Product {
                id: Some(1),
                ..Product::new("Regular Pandesal", 3.0)
            }],
            sales: vec![sale(1, 10.5), sale(2, 20.0)],
            sale_items: vec![SaleItem {
                id: Some(1),
                sale_id: 1,
                product_id: 1,
                product_name: "Regular Pandesal".to_string(),
                quantity: 1,
                price: 10.5,
                subtotal: 10.5,
            }],
        }
    }

    #[test]
    fn test_document_stats_and_timestamp() {
        let now = Utc.with_ymd_and_hms(2025, 1, 5, 2, 30, 0).unwrap();
        let doc = BackupDocument::new(sample(), now);

        assert_eq!(doc.version, "1.0");
        assert_eq!(doc.timestamp, "2025-01-05T02:30:00.000Z");
        assert_eq!(doc.stats.total_products, 1);
        assert_eq!(doc.stats.total_sales, 2);
        assert_eq!(doc.stats.total_sale_items, 1);
        assert_eq!(doc.stats.total_revenue, 30.5);
    }

    #[test]
    fn test_pretty_json_layout() {
        let now = Utc.with_ymd_and_hms(2025, 1, 5, 2, 30, 0).unwrap();
        let text = BackupDocument::new(Collections::default(), now)
            .to_pretty_json()
            .unwrap();

        assert!(text.starts_with("{\n  \"version\": \"1.0\","));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["stats"]["totalRevenue"], json!(0.0));
        assert!(value["data"]["saleItems"].is_array());
    }

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            backup_file_name("pandehabibi", date),
            "pandehabibi-backup-2025-03-09.json"
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!("x")));
    }

    #[test]
    fn test_required_collections() {
        assert!(has_required_collections(
            &json!({"data": {"products": [], "sales": [], "saleItems": []}})
        ));
        assert!(!has_required_collections(
            &json!({"data": {"products": [], "saleItems": []}})
        ));
        assert!(!has_required_collections(
            &json!({"data": {"products": [], "sales": null, "saleItems": []}})
        ));
        assert!(!has_required_collections(&json!({"version": "1.0"})));
        assert!(!has_required_collections(&json!([1, 2, 3])));
    }

    #[test]
    fn test_decode_written_document() {
        let now = Utc.with_ymd_and_hms(2025, 1, 5, 2, 30, 0).unwrap();
        let text = BackupDocument::new(sample(), now).to_pretty_json().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(decode_collections(&value).unwrap(), sample());
    }

    #[test]
    fn test_success_message_echoes_file_stats() {
        let doc = json!({"stats": {"totalProducts": 5, "totalSales": 2}});
        assert_eq!(
            restore_success_message(&doc).as_deref(),
            Some("Backup restored! 5 products, 2 sales")
        );

        // Whatever the file claims, even if it disagrees with the data.
        let doc = json!({"stats": {"totalProducts": "many", "totalSales": 7.0}});
        assert_eq!(
            restore_success_message(&doc).as_deref(),
            Some("Backup restored! many products, 7 sales")
        );

        assert_eq!(
            restore_success_message(&json!({"stats": {}})).as_deref(),
            Some("Backup restored! undefined products, undefined sales")
        );
    }

    #[test]
    fn test_success_message_needs_stats_block() {
        assert_eq!(restore_success_message(&json!({})), None);
        assert_eq!(restore_success_message(&json!({"stats": null})), None);
        assert_eq!(
            restore_success_message(&json!({"stats": 3})).as_deref(),
            Some("Backup restored! undefined products, undefined sales")
        );
    }

    #[test]
    fn test_composite_stats_render_loosely() {
        let doc = json!({"stats": {"totalProducts": [1, null, "x"], "totalSales": {"n": 2}}});
        assert_eq!(
            restore_success_message(&doc).as_deref(),
            Some("Backup restored! 1,,x products, [object Object] sales")
        );

        let doc = json!({"stats": {"totalProducts": null, "totalSales": true}});
        assert_eq!(
            restore_success_message(&doc).as_deref(),
            Some("Backup restored! null products, true sales")
        );
    }
}
