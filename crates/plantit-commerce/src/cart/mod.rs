//! Shopping cart module.
//!
//! [`CartState`] is the pure state and transition function; [`CartStore`]
//! is the shared container every view reads from and dispatches into.

mod state;
mod store;

pub use state::{CartCommand, CartItem, CartState};
pub use store::CartStore;
