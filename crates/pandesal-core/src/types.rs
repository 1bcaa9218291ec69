//! # Domain Types
//!
//! The three record types the store holds, plus the aggregate shapes built
//! from them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    SaleItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (auto)      │   │  id (auto)      │   │  id (auto)      │       │
//! │  │  name           │◄┐ │  total_amount   │◄──│  sale_id        │       │
//! │  │  price          │ │ │  items_count    │   │  product_id ────┼─┐     │
//! │  │  image          │ │ │  sale_date      │   │  product_name   │ │     │
//! │  │  is_active      │ │ │  customer_cash  │   │  quantity       │ │     │
//! │  └─────────────────┘ │ │  change         │   │  price          │ │     │
//! │                      │ └─────────────────┘   │  subtotal       │ │     │
//! │                      │                       └─────────────────┘ │     │
//! │                      └───────────────────────────────────────────┘     │
//! │                                                                         │
//! │  Both references are plain integers: nothing in the store enforces    │
//! │  them, and sale items carry their own copy of name and price.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names serialize exactly as they appear in backup files
//! (`total_amount`, `is_active`, ...). Only the aggregate shapes use
//! camelCase (`saleItems`, `totalRevenue`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the bakery catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned key. `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<i64>,

    /// Display name shown on the POS grid and receipts.
    pub name: String,

    /// Unit price.
    pub price: f64,

    /// Optional image reference (URL or data URI).
    #[serde(default)]
    pub image: Option<String>,

    /// Whether the product is offered at the POS.
    pub is_active: bool,
}

impl Product {
    /// Creates an unsaved, active product without an image.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Product {
            id: None,
            name: name.into(),
            price,
            image: None,
            is_active: true,
        }
    }

    /// Returns the price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_decimal(self.price)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<i64>,

    /// Sum of all line subtotals.
    pub total_amount: f64,

    /// Total number of units sold.
    pub items_count: i64,

    /// When the sale happened (RFC 3339 text).
    pub sale_date: String,

    /// Cash handed over by the customer. Older records may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub customer_cash: Option<f64>,

    /// `customer_cash - total_amount`. Older records may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub change: Option<f64>,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line of a sale.
/// Uses snapshot pattern to freeze product name and price at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<i64>,

    /// Owning sale, by convention only.
    pub sale_id: i64,

    /// Product sold, by convention only.
    pub product_id: i64,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    pub quantity: i64,

    /// Unit price at time of sale (frozen).
    pub price: f64,

    /// `quantity × price`.
    pub subtotal: f64,
}

// =============================================================================
// Aggregates
// =============================================================================

/// Full contents of the three collections, each in primary-key order.
///
/// This is the `data` block of a backup document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collections {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub sale_items: Vec<SaleItem>,
}

impl Collections {
    /// Sum of `total_amount` over all sales, in iteration order.
    pub fn total_revenue(&self) -> f64 {
        self.sales.iter().map(|sale| sale.total_amount).sum()
    }

    /// Items belonging to one sale, in iteration order.
    pub fn items_for(&self, sale_id: i64) -> impl Iterator<Item = &SaleItem> {
        self.sale_items
            .iter()
            .filter(move |item| item.sale_id == sale_id)
    }
}

/// Current size of the store, as shown on the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StorageInfo {
    pub products: i64,
    pub sales: i64,
    pub sale_items: i64,
    pub total_revenue: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let mut product = Product::new("Ube Pandesal", 6.0);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ube Pandesal",
                "price": 6.0,
                "image": null,
                "is_active": true
            })
        );

        product.id = Some(3);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn test_sale_without_cash_fields_decodes() {
        let sale: Sale = serde_json::from_value(serde_json::json!({
            "id": 1,
            "total_amount": 15,
            "items_count": 3,
            "sale_date": "2025-01-05T02:30:00.000Z"
        }))
        .unwrap();

        assert_eq!(sale.total_amount, 15.0);
        assert_eq!(sale.customer_cash, None);
        assert_eq!(sale.change, None);

        let back = serde_json::to_value(&sale).unwrap();
        assert!(back.get("customer_cash").is_none());
    }

    #[test]
    fn test_collections_use_camel_case_key() {
        let json = serde_json::to_value(Collections::default()).unwrap();
        assert!(json.get("saleItems").is_some());
        assert!(json.get("sale_items").is_none());
    }

    #[test]
    fn test_total_revenue() {
        let sale = |total: f64| Sale {
            id: None,
            total_amount: total,
            items_count: 1,
            sale_date: "2025-01-05T00:00:00Z".to_string(),
            customer_cash: None,
            change: None,
        };
        let collections = Collections {
            sales: vec![sale(10.5), sale(20.0), sale(0.0)],
            ..Default::default()
        };
        assert_eq!(collections.total_revenue(), 30.5);
    }
}
