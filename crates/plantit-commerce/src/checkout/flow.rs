//! Checkout flow state machine.

use std::fmt;

use crate::cart::CartState;
use crate::checkout::{PaymentMethod, ShippingInfo};
use crate::config::CheckoutConfig;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Cart review.
    Cart,
    /// Contact and delivery address.
    Shipping,
    /// Payment method.
    Payment,
    /// Order placed. Terminal.
    Confirmation,
}

impl CheckoutStep {
    /// Steps shown in the progress indicator.
    pub const VISIBLE: [CheckoutStep; 3] = [
        CheckoutStep::Cart,
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Cart => "cart",
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirmation => "confirmation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Cart => "Shopping Cart",
            CheckoutStep::Shipping => "Shipping Information",
            CheckoutStep::Payment => "Payment Details",
            CheckoutStep::Confirmation => "Order Confirmed",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Cart => 1,
            CheckoutStep::Shipping => 2,
            CheckoutStep::Payment => 3,
            CheckoutStep::Confirmation => 4,
        }
    }

    /// The step one forward, if any.
    pub fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Cart => Some(CheckoutStep::Shipping),
            CheckoutStep::Shipping => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Confirmation),
            CheckoutStep::Confirmation => None,
        }
    }

    /// The step one back, if going back is allowed.
    pub fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Shipping => Some(CheckoutStep::Cart),
            CheckoutStep::Payment => Some(CheckoutStep::Shipping),
            CheckoutStep::Cart | CheckoutStep::Confirmation => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == CheckoutStep::Confirmation
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout session state.
///
/// Holds the current step and the input collected so far. It reads the cart
/// only to check guards; it never changes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    shipping: ShippingInfo,
    payment_method: Option<PaymentMethod>,
    require_non_empty_cart: bool,
}

impl CheckoutFlow {
    /// Start a session on the cart step.
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            step: CheckoutStep::Cart,
            shipping: ShippingInfo::default(),
            payment_method: config.default_payment_method,
            require_non_empty_cart: config.require_non_empty_cart,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Shipping details as last submitted.
    pub fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn is_complete(&self) -> bool {
        self.step.is_terminal()
    }

    /// Move `Cart → Shipping`.
    pub fn proceed_to_shipping(&mut self, cart: &CartState) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Cart, CheckoutStep::Shipping)?;
        self.check_cart(cart)?;
        Ok(self.enter(CheckoutStep::Shipping))
    }

    /// Submit the shipping form and move `Shipping → Payment`.
    ///
    /// The submitted details are kept even when rejected, so the form can be
    /// corrected rather than refilled. On rejection the step stays on
    /// `Shipping` and the field-level errors are returned.
    pub fn submit_shipping(&mut self, info: ShippingInfo) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Shipping, CheckoutStep::Payment)?;
        self.shipping = info;

        if let Err(errors) = self.shipping.validate() {
            tracing::warn!(fields = ?errors.fields(), "shipping details rejected");
            return Err(CommerceError::Validation(errors));
        }

        Ok(self.enter(CheckoutStep::Payment))
    }

    /// Choose a payment method. Allowed on any step before confirmation.
    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<(), CommerceError> {
        if self.step.is_terminal() {
            return Err(self.invalid(self.step));
        }
        self.payment_method = Some(method);
        Ok(())
    }

    /// Move `Payment → Confirmation`, returning the chosen payment method.
    pub fn confirm(&mut self, cart: &CartState) -> Result<PaymentMethod, CommerceError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Confirmation)?;
        self.check_cart(cart)?;
        let method = match self.payment_method {
            Some(method) => method,
            None => return Err(CommerceError::CheckoutIncomplete("payment method".into())),
        };
        self.enter(CheckoutStep::Confirmation);
        Ok(method)
    }

    /// Go back one step.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        match self.step.previous() {
            Some(prev) => Ok(self.enter(prev)),
            None => Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: "none".to_string(),
            }),
        }
    }

    /// Jump back to the cart from any step before confirmation.
    pub fn return_to_cart(&mut self) -> Result<CheckoutStep, CommerceError> {
        if self.step.is_terminal() {
            return Err(self.invalid(CheckoutStep::Cart));
        }
        Ok(self.enter(CheckoutStep::Cart))
    }

    /// Position in the progress indicator as `(current, total)`.
    pub fn progress(&self) -> (u8, u8) {
        let total = CheckoutStep::VISIBLE.len() as u8;
        (self.step.number().min(total), total)
    }

    fn enter(&mut self, step: CheckoutStep) -> CheckoutStep {
        tracing::info!(from = %self.step, to = %step, "checkout step changed");
        self.step = step;
        step
    }

    fn expect_step(&self, expected: CheckoutStep, to: CheckoutStep) -> Result<(), CommerceError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(self.invalid(to))
        }
    }

    fn check_cart(&self, cart: &CartState) -> Result<(), CommerceError> {
        if self.require_non_empty_cart && cart.is_empty() {
            tracing::warn!(step = %self.step, "checkout blocked: cart is empty");
            return Err(CommerceError::EmptyCart);
        }
        Ok(())
    }

    fn invalid(&self, to: CheckoutStep) -> CommerceError {
        tracing::warn!(from = %self.step, to = %to, "rejected checkout transition");
        CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new(&CheckoutConfig::default())
    }
}
