//! Product catalog module.
//!
//! Contains product types, the catalog provider and listing queries.

mod product;
mod provider;
mod query;

pub use product::{Product, ProductCategory};
pub use provider::{CatalogProvider, StaticCatalog};
pub use query::{CatalogQuery, SortOption};
