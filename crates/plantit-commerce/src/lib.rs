//! Storefront domain types and logic for Plant.It.
//!
//! This crate holds everything behind the plant-care storefront:
//!
//! - **Catalog**: Products, categories, listing queries
//! - **Cart**: Pure cart state plus the shared [`cart::CartStore`]
//! - **Checkout**: Step flow, shipping validation, billing, order confirmation
//! - **Diagnosis**: Mock plant scan with recommended products
//! - **Nursery**: Partner registration form and submission
//! - **Support**: Chat with canned replies from the tech team and nurseries
//!
//! # Example
//!
//! ```rust,ignore
//! use plantit_commerce::prelude::*;
//!
//! let catalog = StaticCatalog::builtin();
//! let cart = CartStore::new();
//! cart.add(catalog.require(&ProductId::new("npk-fertilizer"))?.clone());
//!
//! let mut checkout = CheckoutController::new(cart.clone(), &StoreConfig::default());
//! checkout.proceed_to_shipping()?;
//! checkout.submit_shipping(shipping_info)?;
//! checkout.select_payment_method(PaymentMethod::Upi)?;
//!
//! let order = checkout.place_order()?;
//! println!("{} total {}", order.order_number, order.bill.total);
//! // The cart empties two seconds later; `order` keeps the snapshot.
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod schedule;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod diagnosis;
pub mod nursery;
pub mod support;

pub use config::StoreConfig;
pub use error::{CommerceError, FieldError, ValidationErrors};
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{
        CheckoutConfig, NurseryConfig, ScanConfig, ShippingConfig, StoreConfig, SupportConfig,
    };
    pub use crate::error::{CommerceError, FieldError, ValidationErrors};
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        CatalogProvider, CatalogQuery, Product, ProductCategory, SortOption, StaticCatalog,
    };

    // Cart
    pub use crate::cart::{CartCommand, CartItem, CartState, CartStore};

    // Checkout
    pub use crate::checkout::{
        Bill, CheckoutController, CheckoutFlow, CheckoutStep, OrderConfirmation, PaymentMethod,
        ShippingInfo,
    };

    // Diagnosis
    pub use crate::diagnosis::{
        Diagnosis, DiagnosisProvider, MockDiagnosisProvider, PlantImage, ScanSession, Severity,
    };

    // Nursery
    pub use crate::nursery::{
        BusinessType, NurseryApplication, NurseryRegistrar, RegistrationReceipt,
    };

    // Support
    pub use crate::support::{ChatMessage, ChatSession, SupportChannel};
}
