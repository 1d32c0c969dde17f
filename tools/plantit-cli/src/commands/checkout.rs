//! Scripted checkout.

use anyhow::Result;
use plantit_commerce::cart::CartStore;
use plantit_commerce::catalog::{CatalogProvider, StaticCatalog};
use plantit_commerce::checkout::{
    CheckoutController, OrderConfirmation, PaymentMethod, ShippingInfo,
};
use plantit_commerce::ProductId;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let catalog = StaticCatalog::builtin();
    let cart = CartStore::new();
    for id in &args.add {
        let product = catalog.require(&ProductId::new(id.as_str()))?;
        if !product.is_available() {
            ctx.output
                .warn(&format!("{} is marked out of stock", product.name));
        }
        cart.add(product.clone());
    }

    let mut checkout = CheckoutController::new(cart.clone(), &ctx.config);

    report_step(ctx, &checkout);
    for item in cart.items() {
        ctx.output
            .line_item(&item.product.name, item.quantity, item.line_total());
    }
    ctx.output.bill(&checkout.bill());

    checkout.proceed_to_shipping()?;
    report_step(ctx, &checkout);
    if let Err(err) = checkout.submit_shipping(shipping_info(&args)) {
        if let Some(errors) = err.validation_errors() {
            for field in errors.iter() {
                ctx.output
                    .error(&format!("--{} {}", flag_for(field.field), field.message));
            }
        }
        return Err(err.into());
    }

    report_step(ctx, &checkout);
    if let Some(method) = args.payment.as_deref() {
        checkout.select_payment_method(method.parse::<PaymentMethod>()?)?;
    }
    if let Some(method) = checkout.flow().payment_method() {
        ctx.output.field("Method", method);
    }

    let order = checkout.place_order()?.clone();
    report_step(ctx, &checkout);

    let spinner = ctx.output.spinner("Finalising order");
    tokio::time::sleep(ctx.config.checkout.settle_delay()).await;
    spinner.finish_and_clear();

    // The clear has normally fired by now; leave() runs it otherwise.
    checkout.leave();
    ctx.output
        .debug(&format!("cart items after checkout: {}", cart.item_count()));

    if ctx.output.is_json() {
        ctx.output.json(&order);
    } else {
        print_confirmation(ctx, &order);
    }

    Ok(())
}

fn report_step(ctx: &Context, checkout: &CheckoutController) {
    let step = checkout.step();
    ctx.output.checkout_step(step, checkout.flow().progress());
    ctx.output.debug(&format!("checkout step: {}", step.as_str()));
}

fn shipping_info(args: &CheckoutArgs) -> ShippingInfo {
    ShippingInfo {
        full_name: args.name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        address: args.address.clone(),
        city: args.city.clone(),
        region: args.state.clone(),
        postal_code: args.pin.clone(),
        landmark: args.landmark.clone().filter(|l| !l.trim().is_empty()),
    }
}

/// Command-line flag for a shipping form field.
fn flag_for(field: &str) -> &str {
    match field {
        "full_name" => "name",
        "region" => "state",
        "postal_code" => "pin",
        other => other,
    }
}

fn print_confirmation(ctx: &Context, order: &OrderConfirmation) {
    ctx.output.field("Order number", &order.order_number);
    for item in &order.items {
        ctx.output
            .line_item(&item.product.name, item.quantity, item.line_total());
    }
    ctx.output.bill(&order.bill);
    ctx.output.field("Payment", order.payment_method);
    ctx.output.field("Deliver to", order.delivery_address());
    ctx.output.field("Expected delivery", &order.expected_delivery);
    ctx.output.success("Your order has been placed successfully.");
}
