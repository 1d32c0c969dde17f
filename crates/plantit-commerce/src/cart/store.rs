//! Shared cart store.

use std::sync::Arc;

use tokio::sync::watch;

use crate::cart::{CartCommand, CartItem, CartState};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// The single owner of cart state.
///
/// Cloning yields another handle to the same cart. Every command replaces
/// the whole state in one step and notifies subscribers when the state
/// actually changed.
#[derive(Debug, Clone)]
pub struct CartStore {
    tx: Arc<watch::Sender<CartState>>,
}

impl CartStore {
    /// Create a store holding an empty cart.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CartState::new());
        Self { tx: Arc::new(tx) }
    }

    /// Apply a command to the cart.
    ///
    /// Returns `true` if the cart changed.
    pub fn dispatch(&self, command: CartCommand) -> bool {
        let changed = self.tx.send_if_modified(|state| {
            let next = state.apply(&command);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });

        tracing::debug!(
            command = command.name(),
            changed,
            items = self.tx.borrow().item_count(),
            "cart command applied"
        );
        changed
    }

    pub fn add(&self, product: Product) -> bool {
        self.dispatch(CartCommand::Add(product))
    }

    pub fn update_quantity(&self, id: impl Into<ProductId>, quantity: i64) -> bool {
        self.dispatch(CartCommand::UpdateQuantity {
            id: id.into(),
            quantity,
        })
    }

    pub fn remove(&self, id: impl Into<ProductId>) -> bool {
        self.dispatch(CartCommand::Remove(id.into()))
    }

    pub fn clear(&self) -> bool {
        self.dispatch(CartCommand::Clear)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CartState {
        self.tx.borrow().clone()
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.tx.borrow().items().to_vec()
    }

    pub fn total(&self) -> Money {
        self.tx.borrow().total()
    }

    /// Sum of quantities, shown on the cart badge.
    pub fn item_count(&self) -> i64 {
        self.tx.borrow().item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Receive every new cart state.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.tx.subscribe()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
