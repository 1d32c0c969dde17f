//! Cart state and its transition function.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line in the cart: a product plus the requested quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Always at least 1.
    pub quantity: i64,
}

impl CartItem {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// `price × quantity`.
    pub fn line_total(&self) -> Money {
        self.product.price.saturating_mul(self.quantity)
    }
}

/// A command accepted by the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CartCommand {
    /// Add one unit of a product.
    Add(Product),
    /// Set a line's quantity; zero or less removes the line.
    UpdateQuantity { id: ProductId, quantity: i64 },
    /// Remove a line.
    Remove(ProductId),
    /// Empty the cart.
    Clear,
}

impl CartCommand {
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::Add(_) => "add",
            CartCommand::UpdateQuantity { .. } => "update_quantity",
            CartCommand::Remove(_) => "remove",
            CartCommand::Clear => "clear",
        }
    }
}

/// Cart contents with a derived total.
///
/// Items and total are private: the only way to change them is
/// [`CartState::apply`], which refolds the total from the items every time.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CartState {
    items: Vec<CartItem>,
    total: Money,
}

impl CartState {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from items, recomputing the total.
    fn from_items(items: Vec<CartItem>) -> Self {
        let total = items.iter().map(CartItem::line_total).sum();
        Self { items, total }
    }

    /// Apply a command, returning the resulting state.
    ///
    /// Pure: the same state and command always produce the same result.
    /// Commands that target an absent product leave the items unchanged.
    pub fn apply(&self, command: &CartCommand) -> CartState {
        match command {
            CartCommand::Add(product) => self.with_added(product),
            CartCommand::UpdateQuantity { id, quantity } => self.with_quantity(id, *quantity),
            CartCommand::Remove(id) => self.without(id),
            CartCommand::Clear => CartState::new(),
        }
    }

    fn with_added(&self, product: &Product) -> CartState {
        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.product.id == product.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => items.push(CartItem::new(product.clone())),
        }
        Self::from_items(items)
    }

    fn with_quantity(&self, id: &ProductId, quantity: i64) -> CartState {
        if quantity <= 0 {
            return self.without(id);
        }
        let items = self
            .items
            .iter()
            .cloned()
            .map(|mut item| {
                if &item.product.id == id {
                    item.quantity = quantity;
                }
                item
            })
            .collect();
        Self::from_items(items)
    }

    fn without(&self, id: &ProductId) -> CartState {
        let items = self
            .items
            .iter()
            .filter(|i| &i.product.id != id)
            .cloned()
            .collect();
        Self::from_items(items)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Σ(price × quantity) over all items.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Sum of quantities (the cart badge).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product.id == id)
    }

    pub fn quantity_of(&self, id: &ProductId) -> i64 {
        self.get(id).map_or(0, |i| i.quantity)
    }
}
