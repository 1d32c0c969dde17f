//! Placed order snapshot.

use chrono::{DateTime, Utc};

use crate::cart::{CartItem, CartState};
use crate::checkout::{Bill, PaymentMethod, ShippingInfo};
use crate::ids::OrderId;
use serde::{Deserialize, Serialize};

/// Delivery estimate printed on every confirmation.
pub const EXPECTED_DELIVERY: &str = "2-3 business days";

/// Everything the confirmation screen shows, captured at the moment the
/// order was placed. It stays valid after the cart is cleared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
    pub bill: Bill,
    pub shipping: ShippingInfo,
    pub payment_method: PaymentMethod,
    pub expected_delivery: String,
}

impl OrderConfirmation {
    /// Snapshot the cart and checkout details.
    pub fn capture(
        cart: &CartState,
        bill: Bill,
        shipping: ShippingInfo,
        payment_method: PaymentMethod,
    ) -> Self {
        let placed_at = Utc::now();
        Self {
            id: OrderId::generate(),
            order_number: Self::order_number_at(placed_at),
            placed_at,
            items: cart.items().to_vec(),
            bill,
            shipping,
            payment_method,
            expected_delivery: EXPECTED_DELIVERY.to_string(),
        }
    }

    /// Order number for a placement time.
    pub fn order_number_at(at: DateTime<Utc>) -> String {
        format!("ORD-{}", at.timestamp())
    }

    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Delivery address as shown in the summary.
    pub fn delivery_address(&self) -> String {
        self.shipping.delivery_line()
    }
}
