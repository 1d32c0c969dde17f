//! Checkout controller: the flow bound to a cart store.

use crate::cart::{CartState, CartStore};
use crate::checkout::{
    Bill, CheckoutFlow, CheckoutStep, OrderConfirmation, PaymentMethod, ShippingInfo,
};
use crate::config::{CheckoutConfig, ShippingConfig, StoreConfig};
use crate::schedule::ScheduledTask;
use crate::CommerceError;

/// Drives one checkout session against the shared cart.
///
/// The controller only reads the cart, except for the single clear it
/// schedules once an order is placed. The clear runs after the settle delay
/// so the confirmation can be shown first; dropping the controller before
/// then cancels it, while [`CheckoutController::leave`] runs it immediately.
#[derive(Debug)]
pub struct CheckoutController {
    cart: CartStore,
    shipping_policy: ShippingConfig,
    checkout: CheckoutConfig,
    flow: CheckoutFlow,
    confirmation: Option<OrderConfirmation>,
    pending_clear: Option<ScheduledTask>,
}

impl CheckoutController {
    /// Start a session on the cart step.
    pub fn new(cart: CartStore, config: &StoreConfig) -> Self {
        Self {
            cart,
            shipping_policy: config.shipping.clone(),
            checkout: config.checkout.clone(),
            flow: CheckoutFlow::new(&config.checkout),
            confirmation: None,
            pending_clear: None,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.flow.step()
    }

    pub fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Current bill.
    ///
    /// Live from the cart until the order is placed; afterwards the
    /// snapshot taken at placement, even once the cart has been cleared.
    pub fn bill(&self) -> Bill {
        match &self.confirmation {
            Some(order) => order.bill,
            None => Bill::compute(self.cart.total(), &self.shipping_policy),
        }
    }

    pub fn proceed_to_shipping(&mut self) -> Result<CheckoutStep, CommerceError> {
        let cart = self.cart.snapshot();
        self.flow.proceed_to_shipping(&cart)
    }

    pub fn submit_shipping(&mut self, info: ShippingInfo) -> Result<CheckoutStep, CommerceError> {
        self.flow.submit_shipping(info)
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<(), CommerceError> {
        self.flow.select_payment_method(method)
    }

    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.flow.go_back()
    }

    pub fn return_to_cart(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.flow.return_to_cart()
    }

    /// Place the order: move to confirmation, snapshot the summary and
    /// schedule the cart clear.
    ///
    /// Outside a tokio runtime the clear is not timed; it stays pending until
    /// [`CheckoutController::leave`] runs it.
    pub fn place_order(&mut self) -> Result<&OrderConfirmation, CommerceError> {
        let cart: CartState = self.cart.snapshot();
        let payment_method = self.flow.confirm(&cart)?;

        let bill = Bill::compute(cart.total(), &self.shipping_policy);
        let shipping = self.flow.shipping().clone();
        let order = OrderConfirmation::capture(&cart, bill, shipping, payment_method);

        tracing::info!(
            order_number = %order.order_number,
            items = order.item_count(),
            subtotal = bill.subtotal.amount(),
            shipping_fee = bill.shipping_fee.amount(),
            total = bill.total.amount(),
            payment = payment_method.as_str(),
            "order placed"
        );

        let store = self.cart.clone();
        self.pending_clear = Some(ScheduledTask::after(
            "checkout.clear_cart",
            self.checkout.settle_delay(),
            move || {
                store.clear();
            },
        ));

        Ok(self.confirmation.insert(order))
    }

    /// The confirmed order, once placed.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Whether the post-order cart clear has yet to run.
    pub fn is_clear_pending(&self) -> bool {
        self.pending_clear
            .as_ref()
            .is_some_and(ScheduledTask::is_pending)
    }

    /// End the session, discarding it.
    ///
    /// If an order was placed and the cart has not been cleared yet, the
    /// clear runs now. Returns the confirmation, if any.
    pub fn leave(mut self) -> Option<OrderConfirmation> {
        if let Some(task) = self.pending_clear.take() {
            task.run_now();
        }
        tracing::debug!(step = %self.flow.step(), "checkout session left");
        self.confirmation.take()
    }
}
