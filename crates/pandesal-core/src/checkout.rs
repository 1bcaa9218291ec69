//! # Checkout
//!
//! Turns a cart into the sale record and line items the POS view writes.
//!
//! ```text
//! cart: [(Regular Pandesal 3.00, ×4), (Ube Pandesal 6.00, ×1)]   cash: 20.00
//!      │
//!      ▼
//! build_checkout()
//!      │
//!      ├── SaleItem { Regular Pandesal, qty 4, price 3, subtotal 12 }
//!      ├── SaleItem { Ube Pandesal,     qty 1, price 6, subtotal 6  }
//!      └── Sale { total_amount 18, items_count 5, customer_cash 20, change 2 }
//! ```
//!
//! All arithmetic runs on [`Money`]; values are converted back to decimals
//! only when the records are built.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, Sale, SaleItem};
use crate::validation::{
    validate_cart_size, validate_customer_cash, validate_price, validate_quantity,
};

/// A sale and its lines, ready to be written in one transaction.
///
/// `items[*].sale_id` is a placeholder until the sale has been inserted and
/// its id is known.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutDraft {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

/// Builds a checkout from resolved catalog products and quantities.
///
/// ## Rules
/// - at least one line, at most [`crate::MAX_CART_LINES`]
/// - every product persisted and active
/// - every quantity in `1..=MAX_ITEM_QUANTITY`
/// - every price finite, non-negative and at most [`crate::MAX_AMOUNT`]
/// - cash finite, non-negative and at least the total
pub fn build_checkout(
    lines: &[(Product, i64)],
    customer_cash: f64,
    sale_date: impl Into<String>,
) -> CoreResult<CheckoutDraft> {
    if lines.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    validate_cart_size(lines.len()).map_err(|_| CoreError::CartTooLarge {
        max: crate::MAX_CART_LINES,
    })?;
    validate_customer_cash(customer_cash)?;

    let mut items = Vec::with_capacity(lines.len());
    let mut total = Money::zero();
    let mut units = 0_i64;

    for (product, quantity) in lines {
        let product_id = product.id.ok_or_else(|| ValidationError::Required {
            field: "product id".to_string(),
        })?;
        if !product.is_active {
            return Err(CoreError::ProductInactive {
                id: product_id,
                name: product.name.clone(),
            });
        }
        validate_quantity(*quantity)?;
        // Restored catalogs skip catalog validation.
        validate_price(product.price)?;

        let unit_price = product.unit_price();
        let subtotal = unit_price
            .checked_mul_quantity(*quantity)
            .ok_or(CoreError::AmountOverflow)?;
        total = total.checked_add(subtotal).ok_or(CoreError::AmountOverflow)?;
        units += quantity;

        items.push(SaleItem {
            id: None,
            sale_id: 0,
            product_id,
            product_name: product.name.clone(),
            quantity: *quantity,
            price: unit_price.to_decimal(),
            subtotal: subtotal.to_decimal(),
        });
    }

    let cash = Money::from_decimal(customer_cash);
    let change = cash - total;
    if change.is_negative() {
        return Err(CoreError::InsufficientCash {
            total: total.to_string(),
            cash: cash.to_string(),
        });
    }

    Ok(CheckoutDraft {
        sale: Sale {
            id: None,
            total_amount: total.to_decimal(),
            items_count: units,
            sale_date: sale_date.into(),
            customer_cash: Some(cash.to_decimal()),
            change: Some(change.to_decimal()),
        },
        items,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: f64) -> Product {
        Product {
            id: Some(id),
            ..Product::new(name, price)
        }
    }

    #[test]
    fn test_build_checkout_totals_and_change() {
        let lines = vec![
            (product(1, "Regular Pandesal", 3.0), 4),
            (product(3, "Ube Pandesal", 6.0), 1),
        ];

        let draft = build_checkout(&lines, 20.0, "2025-01-05T02:30:00.000Z").unwrap();

        assert_eq!(draft.sale.total_amount, 18.0);
        assert_eq!(draft.sale.items_count, 5);
        assert_eq!(draft.sale.customer_cash, Some(20.0));
        assert_eq!(draft.sale.change, Some(2.0));
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0].subtotal, 12.0);
        assert_eq!(draft.items[1].product_name, "Ube Pandesal");
    }

    #[test]
    fn test_exact_cash_gives_zero_change() {
        let lines = vec![(product(2, "Special Pandesal", 5.0), 2)];
        let draft = build_checkout(&lines, 10.0, "2025-01-05T00:00:00Z").unwrap();
        assert_eq!(draft.sale.change, Some(0.0));
    }

    #[test]
    fn test_rejects_empty_cart() {
        assert!(matches!(
            build_checkout(&[], 10.0, "2025-01-05T00:00:00Z"),
            Err(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_rejects_insufficient_cash() {
        let lines = vec![(product(5, "Chocolate Pandesal", 8.0), 3)];
        let err = build_checkout(&lines, 20.0, "2025-01-05T00:00:00Z").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Customer cash 20.00 does not cover total 24.00"
        );
    }

    #[test]
    fn test_rejects_inactive_product_and_bad_quantity() {
        let mut inactive = product(4, "Cheese Pandesal", 7.0);
        inactive.is_active = false;
        assert!(matches!(
            build_checkout(&[(inactive, 1)], 10.0, "2025-01-05T00:00:00Z"),
            Err(CoreError::ProductInactive { id: 4, .. })
        ));

        let lines = vec![(product(1, "Regular Pandesal", 3.0), 0)];
        assert!(matches!(
            build_checkout(&lines, 10.0, "2025-01-05T00:00:00Z"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_oversized_amounts_are_rejected_not_wrapped() {
        let lines = vec![(product(9, "Gold Pandesal", 1e17), 2)];
        assert!(matches!(
            build_checkout(&lines, 1e9, "2025-01-05T00:00:00Z"),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let lines = vec![(product(1, "Regular Pandesal", 3.0), 1)];
        assert!(matches!(
            build_checkout(&lines, 1e18, "2025-01-05T00:00:00Z"),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let priciest = crate::MAX_AMOUNT as f64;
        let lines: Vec<_> = (1..=crate::MAX_CART_LINES as i64)
            .map(|id| (product(id, "Wedding Cake", priciest), crate::MAX_ITEM_QUANTITY))
            .collect();
        let err = build_checkout(&lines, priciest, "2025-01-05T00:00:00Z").unwrap_err();
        assert!(matches!(err, CoreError::InsufficientCash { .. }));
    }
}
