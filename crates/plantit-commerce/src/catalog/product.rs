//! Product types.

use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    /// Fertilizers, composts and growing media.
    Fertilizer,
    /// Fungicides, pesticides and plant treatments.
    Medicine,
    /// Garden tools and meters.
    Tool,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Fertilizer,
        ProductCategory::Medicine,
        ProductCategory::Tool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Fertilizer => "fertilizer",
            ProductCategory::Medicine => "medicine",
            ProductCategory::Tool => "tool",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductCategory::Fertilizer => "Fertilizer",
            ProductCategory::Medicine => "Medicine",
            ProductCategory::Tool => "Tool",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fertilizer" => Ok(ProductCategory::Fertilizer),
            "medicine" => Ok(ProductCategory::Medicine),
            "tool" => Ok(ProductCategory::Tool),
            other => Err(CommerceError::UnknownValue {
                kind: "product category",
                value: other.to_string(),
            }),
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in whole rupees.
    pub price: Money,
    /// Display glyph.
    pub icon: String,
    pub category: ProductCategory,
    /// Short description for listings.
    pub description: String,
    /// Advisory availability; the cart does not enforce it.
    pub in_stock: bool,
}

impl Product {
    /// Create an in-stock product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: ProductCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            icon: String::new(),
            category,
            description: String::new(),
            in_stock: true,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    pub fn is_available(&self) -> bool {
        self.in_stock
    }

    /// Case-insensitive name match used by catalog search.
    pub fn name_matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "Medicine".parse::<ProductCategory>().unwrap(),
            ProductCategory::Medicine
        );
        assert!("seeds".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_product_builder() {
        let p = Product::new(
            "moisture-meter",
            "Soil Moisture Meter",
            Money::rupees(399),
            ProductCategory::Tool,
        )
        .with_icon("💧")
        .with_description("Accurate soil moisture measurement tool");
        assert!(p.is_available());
        assert!(p.name_matches("MOISTURE"));
        assert!(!p.name_matches("shears"));
        assert!(!p.clone().out_of_stock().is_available());
    }

    #[test]
    fn test_product_json_shape() {
        let p = Product::new(
            "bone-meal",
            "Organic Bone Meal",
            Money::rupees(699),
            ProductCategory::Fertilizer,
        );
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], "bone-meal");
        assert_eq!(json["price"], 699);
        assert_eq!(json["category"], "fertilizer");
        assert_eq!(json["in_stock"], true);
    }
}
