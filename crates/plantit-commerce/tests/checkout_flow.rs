//! End-to-end storefront flows through the public API.

use std::sync::Arc;
use std::time::Duration;

use plantit_commerce::diagnosis::FixedSelector;
use plantit_commerce::prelude::*;

fn shipping_info() -> ShippingInfo {
    ShippingInfo {
        full_name: "Kavya Rao".into(),
        email: "kavya@example.in".into(),
        phone: "+91 99000 11111".into(),
        address: "22 Residency Road".into(),
        city: "Mysuru".into(),
        region: "Karnataka".into(),
        postal_code: "570001".into(),
        landmark: None,
    }
}

fn product(id: &str) -> Product {
    StaticCatalog::builtin()
        .require(&ProductId::new(id))
        .unwrap()
        .clone()
}

fn checkout_single(id: &str) -> (CartStore, CheckoutController) {
    let cart = CartStore::new();
    cart.add(product(id));

    let mut checkout = CheckoutController::new(cart.clone(), &StoreConfig::default());
    checkout.proceed_to_shipping().unwrap();
    checkout.submit_shipping(shipping_info()).unwrap();
    checkout.select_payment_method(PaymentMethod::Upi).unwrap();
    checkout.place_order().unwrap();
    (cart, checkout)
}

#[tokio::test(start_paused = true)]
async fn test_order_above_threshold_ships_free() {
    let (_cart, checkout) = checkout_single("npk-fertilizer");
    let order = checkout.confirmation().unwrap();

    assert_eq!(order.bill.subtotal, Money::rupees(1299));
    assert_eq!(order.bill.shipping_fee, Money::ZERO);
    assert_eq!(order.bill.total, Money::rupees(1299));
    assert_eq!(order.payment_method, PaymentMethod::Upi);
}

#[tokio::test(start_paused = true)]
async fn test_order_below_threshold_pays_shipping() {
    let (_cart, checkout) = checkout_single("bone-meal");
    let bill = checkout.bill();

    assert_eq!(bill.subtotal, Money::rupees(699));
    assert_eq!(bill.shipping_fee, Money::rupees(99));
    assert_eq!(bill.total, Money::rupees(798));
}

#[tokio::test(start_paused = true)]
async fn test_cart_clears_but_confirmation_keeps_snapshot() {
    let (cart, checkout) = checkout_single("npk-fertilizer");
    let mut changes = cart.subscribe();

    tokio::time::sleep(Duration::from_millis(2100)).await;

    assert!(changes.has_changed().unwrap());
    assert!(changes.borrow_and_update().is_empty());
    assert!(cart.items().is_empty());
    assert_eq!(cart.total(), Money::ZERO);

    assert_eq!(checkout.step(), CheckoutStep::Confirmation);
    assert_eq!(checkout.bill().total, Money::rupees(1299));
    assert_eq!(checkout.confirmation().unwrap().item_count(), 1);
}

#[test]
fn test_checkout_without_runtime_clears_on_leave() {
    let (cart, checkout) = checkout_single("npk-fertilizer");
    assert_eq!(checkout.step(), CheckoutStep::Confirmation);
    assert_eq!(cart.item_count(), 1);

    let order = checkout.leave().unwrap();
    assert!(cart.items().is_empty());
    assert_eq!(order.bill.total, Money::rupees(1299));
}

#[tokio::test(start_paused = true)]
async fn test_support_chat_answers_on_each_channel() {
    let mut chat = ChatSession::new(&SupportConfig::default());
    chat.send(SupportChannel::Nursery, "Do you ship bonsai to Mysuru?");
    chat.send(SupportChannel::Tech, "The scan page is blank");

    tokio::time::sleep(Duration::from_millis(1001)).await;

    let nursery = chat.transcript(SupportChannel::Nursery);
    let last = nursery.last().unwrap();
    assert_eq!(last.text, SupportChannel::Nursery.canned_reply());
    assert_eq!(chat.messages().len(), 5);
    assert_eq!(chat.pending_replies(), 0);
}

#[test]
fn test_add_twice_update_then_remove_empties_cart() {
    let cart = CartStore::new();
    let p = product("moisture-meter");

    cart.add(p.clone());
    cart.add(p.clone());
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);

    cart.update_quantity(p.id.clone(), 5);
    assert_eq!(cart.total(), Money::rupees(5 * 399));

    cart.remove(p.id.clone());
    assert!(cart.items().is_empty());
    assert_eq!(cart.total(), Money::ZERO);
}

#[test]
fn test_update_to_zero_matches_remove() {
    let start = CartState::new()
        .apply(&CartCommand::Add(product("neem-oil")))
        .apply(&CartCommand::Add(product("spray-bottle")));
    let id = ProductId::new("neem-oil");

    let zeroed = start.apply(&CartCommand::UpdateQuantity {
        id: id.clone(),
        quantity: 0,
    });
    let removed = start.apply(&CartCommand::Remove(id));
    assert_eq!(zeroed, removed);
    assert_eq!(removed.total(), Money::rupees(299));
}

#[test]
fn test_incomplete_shipping_keeps_step() {
    let cart = CartStore::new();
    cart.add(product("potting-mix"));
    let mut checkout = CheckoutController::new(cart, &StoreConfig::default());
    checkout.proceed_to_shipping().unwrap();

    let partial = ShippingInfo {
        full_name: "Kavya Rao".into(),
        ..Default::default()
    };
    let err = checkout.submit_shipping(partial).unwrap_err();

    assert_eq!(checkout.step(), CheckoutStep::Shipping);
    let errors = err.validation_errors().unwrap();
    assert!(errors.has("email"));
    assert!(!errors.has("full_name"));
    // Entered values survive the rejection.
    assert_eq!(checkout.flow().shipping().full_name, "Kavya Rao");
}

#[tokio::test(start_paused = true)]
async fn test_scan_recommendations_flow_into_checkout() {
    let provider = MockDiagnosisProvider::new(&ScanConfig::default())
        .with_selector(FixedSelector(1));
    let mut scan = ScanSession::new(Arc::new(provider));
    scan.select_image(PlantImage::new("monstera.jpg", "image/jpeg", 4096).unwrap());

    let diagnosis = scan.analyze().await.unwrap();
    assert_eq!(diagnosis.severity, Severity::Healthy);

    let cart = CartStore::new();
    scan.add_all_to_cart(&cart).unwrap();
    assert_eq!(cart.total(), Money::rupees(749 + 1099));

    let checkout = CheckoutController::new(cart, &StoreConfig::default());
    assert!(checkout.bill().has_free_shipping());
}
