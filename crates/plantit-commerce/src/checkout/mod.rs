//! Checkout module.
//!
//! The step state machine, shipping details, payment selection, billing and
//! the controller that ties a checkout session to the shared cart.

mod bill;
mod controller;
mod flow;
mod order;
mod payment;
mod shipping;

pub use bill::Bill;
pub use controller::CheckoutController;
pub use flow::{CheckoutFlow, CheckoutStep};
pub use order::{OrderConfirmation, EXPECTED_DELIVERY};
pub use payment::PaymentMethod;
pub use shipping::{is_valid_email, ShippingInfo};
