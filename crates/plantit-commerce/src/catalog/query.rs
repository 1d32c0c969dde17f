//! Catalog filtering and sorting.

use std::fmt;
use std::str::FromStr;

use crate::catalog::{Product, ProductCategory};
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Name A-Z, case-insensitive.
    #[default]
    Name,
    /// Price, low to high.
    Price,
    /// Highest rated. No per-product ratings are tracked, so this keeps
    /// catalog order.
    Rating,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Name => "name",
            SortOption::Price => "price",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Name => "Sort by Name",
            SortOption::Price => "Sort by Price",
            SortOption::Rating => "Sort by Rating",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortOption::Name),
            "price" => Ok(SortOption::Price),
            "rating" => Ok(SortOption::Rating),
            other => Err(CommerceError::UnknownValue {
                kind: "sort option",
                value: other.to_string(),
            }),
        }
    }
}

/// A product listing query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Restrict to one category; `None` lists all.
    pub category: Option<ProductCategory>,
    /// Case-insensitive substring of the product name.
    pub search: String,
    pub sort: SortOption,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ProductCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check if a product passes the category and search filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.category.map_or(true, |c| product.category == c) && product.name_matches(&self.search)
    }

    /// Filter and sort a product list. Sorting is stable.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut results: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();

        match self.sort {
            SortOption::Name => {
                results.sort_by_cached_key(|p| p.name.to_lowercase());
            }
            SortOption::Price => results.sort_by_key(|p| p.price),
            SortOption::Rating => {}
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogProvider, StaticCatalog};
    use crate::money::Money;

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_category_filter() {
        let catalog = StaticCatalog::builtin();
        let query = CatalogQuery::new().category(ProductCategory::Tool);
        let tools = catalog.search(&query);
        assert_eq!(tools.len(), 6);
        assert!(tools.iter().all(|p| p.category == ProductCategory::Tool));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = StaticCatalog::builtin();
        let results = catalog.search(&CatalogQuery::new().search("COPPER"));
        assert_eq!(
            names(&results),
            vec!["Copper Fungicide Spray", "Copper Watering Can"]
        );
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = StaticCatalog::builtin();
        let query = CatalogQuery::new()
            .category(ProductCategory::Tool)
            .sort(SortOption::Price);
        let results = catalog.search(&query);
        let prices: Vec<Money> = results.iter().map(|p| p.price).collect();
        assert_eq!(
            prices,
            [199, 299, 399, 549, 799, 1899].map(Money::rupees).to_vec()
        );
    }

    #[test]
    fn test_sort_by_name() {
        let catalog = StaticCatalog::builtin();
        let query = CatalogQuery::new().category(ProductCategory::Medicine);
        let results = catalog.search(&query);
        assert_eq!(results[0].name, "Copper Fungicide Spray");
        assert_eq!(results[5].name, "Systemic Insecticide");
    }

    #[test]
    fn test_rating_keeps_catalog_order() {
        let catalog = StaticCatalog::builtin();
        let query = CatalogQuery::new().sort(SortOption::Rating);
        let results = catalog.search(&query);
        let expected: Vec<&Product> = catalog.products().iter().collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_no_matches() {
        let catalog = StaticCatalog::builtin();
        let query = CatalogQuery::new().search("orchid");
        assert!(catalog.search(&query).is_empty());
    }

    #[test]
    fn test_sort_option_parse() {
        assert_eq!("Price".parse::<SortOption>().unwrap(), SortOption::Price);
        assert!("newest".parse::<SortOption>().is_err());
    }
}
