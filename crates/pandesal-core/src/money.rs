//! # Money
//!
//! Records keep prices and totals as decimals (`3.0`, `10.5`), which is what
//! the views write and what backups carry. Checkout converts each amount to
//! whole centavos once, does every sum and product on integers, and converts
//! back once when the sale is written.
//!
//! ```text
//! 0.1 + 0.2           = 0.30000000000000004
//! 10¢ + 20¢ → 30¢     = 0.3
//! ```
//!
//! ```rust
//! use pandesal_core::money::Money;
//!
//! let line = Money::from_decimal(0.1).checked_mul_quantity(3).unwrap();
//! assert_eq!(line.to_decimal(), 0.3);
//! ```

use std::fmt;
use std::ops::Sub;

/// An amount in centavos. Signed, so change can go negative before it is
/// checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds to the nearest centavo. NaN becomes zero and out-of-range
    /// amounts saturate; validate first.
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    #[inline]
    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Line subtotal: unit price × quantity. `None` on overflow.
    #[inline]
    pub const fn checked_mul_quantity(self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

/// `23.00`, `-1.50`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Saturating: change is only computed from bounded, validated amounts.
impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_conversion() {
        assert_eq!(Money::from_decimal(3.0).cents(), 300);
        assert_eq!(Money::from_decimal(10.5).cents(), 1050);
        assert_eq!(Money::from_decimal(1.239).cents(), 124);
        assert_eq!(Money::from_decimal(f64::NAN).cents(), 0);
        assert_eq!(Money::from_cents(1050).to_decimal(), 10.5);
    }

    #[test]
    fn test_sum_has_no_float_drift() {
        let total = Money::from_decimal(0.1)
            .checked_add(Money::from_decimal(0.2))
            .unwrap();
        assert_eq!(total.to_decimal(), 0.3);
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = Money::from_decimal(1e17);
        assert_eq!(huge.checked_mul_quantity(2), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_decimal(1e30).cents(), i64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2300).to_string(), "23.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_change_can_go_negative() {
        let cash = Money::from_cents(2000);
        let total = Money::from_cents(600).checked_mul_quantity(4).unwrap();

        assert!((cash - total).is_negative());
        assert_eq!((cash - total).cents(), -400);
    }
}
