//! Order bill calculation.

use crate::config::ShippingConfig;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Final price breakdown shown in the order summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bill {
    /// Cart total before shipping.
    pub subtotal: Money,
    pub shipping_fee: Money,
    /// `subtotal + shipping_fee`.
    pub total: Money,
}

impl Bill {
    /// Price a subtotal under a shipping policy.
    ///
    /// Shipping is free only when the subtotal is strictly above the
    /// threshold.
    pub fn compute(subtotal: Money, shipping: &ShippingConfig) -> Self {
        let shipping_fee = if subtotal > shipping.free_shipping_threshold {
            Money::ZERO
        } else {
            shipping.flat_fee
        };

        Self {
            subtotal,
            shipping_fee,
            total: subtotal + shipping_fee,
        }
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping_fee.is_zero()
    }

    /// "Free" or the fee amount, as in the order summary.
    pub fn shipping_label(&self) -> String {
        if self.has_free_shipping() {
            "Free".to_string()
        } else {
            self.shipping_fee.display()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(subtotal: i64) -> Bill {
        Bill::compute(Money::rupees(subtotal), &ShippingConfig::default())
    }

    #[test]
    fn test_above_threshold_ships_free() {
        let b = bill(1299);
        assert_eq!(b.shipping_fee, Money::ZERO);
        assert_eq!(b.total, Money::rupees(1299));
        assert_eq!(b.shipping_label(), "Free");
    }

    #[test]
    fn test_below_threshold_pays_flat_fee() {
        let b = bill(699);
        assert_eq!(b.shipping_fee, Money::rupees(99));
        assert_eq!(b.total, Money::rupees(798));
        assert_eq!(b.shipping_label(), "\u{20b9}99");
    }

    #[test]
    fn test_threshold_itself_is_not_free() {
        assert_eq!(bill(1000).shipping_fee, Money::rupees(99));
        assert_eq!(bill(1001).shipping_fee, Money::ZERO);
    }

    #[test]
    fn test_custom_policy() {
        let policy = ShippingConfig {
            free_shipping_threshold: Money::rupees(500),
            flat_fee: Money::rupees(49),
        };
        let below = Bill::compute(Money::rupees(450), &policy);
        assert_eq!(below.total, Money::rupees(499));
        let above = Bill::compute(Money::rupees(501), &policy);
        assert!(above.has_free_shipping());
    }
}
