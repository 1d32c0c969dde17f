//! Catalog providers.

use crate::catalog::ProductCategory::{Fertilizer, Medicine, Tool};
use crate::catalog::{CatalogQuery, Product, ProductCategory};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Source of catalog products.
pub trait CatalogProvider: Send + Sync {
    /// All products, in catalog order.
    fn products(&self) -> &[Product];

    /// Look up a product by id.
    fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|p| &p.id == id)
    }

    /// Look up a product by id, failing if it is unknown.
    fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Products matching a query, filtered and sorted.
    fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(self.products())
    }
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's built-in catalog: six products per category.
    pub fn builtin() -> Self {
        Self::new(BUILTIN.iter().map(BuiltinProduct::to_product).collect())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CatalogProvider for StaticCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }
}

struct BuiltinProduct {
    id: &'static str,
    name: &'static str,
    price: i64,
    icon: &'static str,
    category: ProductCategory,
    description: &'static str,
    in_stock: bool,
}

impl BuiltinProduct {
    fn to_product(&self) -> Product {
        let price = Money::rupees(self.price);
        let product = Product::new(self.id, self.name, price, self.category)
            .with_icon(self.icon)
            .with_description(self.description);
        if self.in_stock {
            product
        } else {
            product.out_of_stock()
        }
    }
}

/// The storefront's built-in products, in catalog order.
const BUILTIN: [BuiltinProduct; 18] = [
    BuiltinProduct {
        id: "npk-fertilizer",
        name: "NPK Complete Fertilizer",
        price: 1299,
        icon: "🌱",
        category: Fertilizer,
        description: "Balanced NPK formula for all-round plant nutrition and healthy growth",
        in_stock: true,
    },
    BuiltinProduct {
        id: "organic-compost",
        name: "Premium Organic Compost",
        price: 899,
        icon: "🍂",
        category: Fertilizer,
        description: "Rich organic matter to improve soil structure and fertility",
        in_stock: true,
    },
    BuiltinProduct {
        id: "liquid-fertilizer",
        name: "Liquid Plant Fertilizer",
        price: 849,
        icon: "🧪",
        category: Fertilizer,
        description: "Fast-acting liquid nutrition for quick results",
        in_stock: true,
    },
    BuiltinProduct {
        id: "bone-meal",
        name: "Organic Bone Meal",
        price: 699,
        icon: "🦴",
        category: Fertilizer,
        description: "Slow-release phosphorus for strong root development",
        in_stock: true,
    },
    BuiltinProduct {
        id: "seaweed-extract",
        name: "Seaweed Extract Fertilizer",
        price: 1199,
        icon: "🌊",
        category: Fertilizer,
        description: "Natural growth stimulant with trace minerals",
        in_stock: false,
    },
    BuiltinProduct {
        id: "potting-mix",
        name: "Premium Potting Mix",
        price: 599,
        icon: "🪴",
        category: Fertilizer,
        description: "Well-draining soil mix perfect for container plants",
        in_stock: true,
    },
    BuiltinProduct {
        id: "copper-fungicide",
        name: "Copper Fungicide Spray",
        price: 899,
        icon: "🧴",
        category: Medicine,
        description: "Effective copper-based fungicide for leaf spot treatment",
        in_stock: true,
    },
    BuiltinProduct {
        id: "neem-oil",
        name: "Organic Neem Oil",
        price: 1199,
        icon: "🌿",
        category: Medicine,
        description: "Natural organic treatment for various plant issues",
        in_stock: true,
    },
    BuiltinProduct {
        id: "insecticidal-soap",
        name: "Insecticidal Soap Spray",
        price: 749,
        icon: "🧼",
        category: Medicine,
        description: "Safe and effective pest control for soft-bodied insects",
        in_stock: true,
    },
    BuiltinProduct {
        id: "systemic-insecticide",
        name: "Systemic Insecticide",
        price: 1399,
        icon: "💊",
        category: Medicine,
        description: "Long-lasting protection against sucking insects",
        in_stock: true,
    },
    BuiltinProduct {
        id: "root-rot-treatment",
        name: "Root Rot Treatment",
        price: 999,
        icon: "🩹",
        category: Medicine,
        description: "Specialized treatment for root rot and fungal infections",
        in_stock: false,
    },
    BuiltinProduct {
        id: "plant-antibiotic",
        name: "Plant Antibiotic Solution",
        price: 1599,
        icon: "💉",
        category: Medicine,
        description: "Broad-spectrum treatment for bacterial plant diseases",
        in_stock: true,
    },
    BuiltinProduct {
        id: "ph-test-kit",
        name: "Digital pH Test Kit",
        price: 549,
        icon: "📏",
        category: Tool,
        description: "Monitor soil pH for optimal plant health",
        in_stock: true,
    },
    BuiltinProduct {
        id: "moisture-meter",
        name: "Soil Moisture Meter",
        price: 399,
        icon: "💧",
        category: Tool,
        description: "Accurate soil moisture measurement tool",
        in_stock: true,
    },
    BuiltinProduct {
        id: "pruning-shears",
        name: "Professional Pruning Shears",
        price: 799,
        icon: "✂️",
        category: Tool,
        description: "Sharp, durable shears for precise plant trimming",
        in_stock: true,
    },
    BuiltinProduct {
        id: "spray-bottle",
        name: "Adjustable Spray Bottle",
        price: 299,
        icon: "🔫",
        category: Tool,
        description: "Multi-setting spray bottle for plant care applications",
        in_stock: true,
    },
    BuiltinProduct {
        id: "plant-stakes",
        name: "Bamboo Plant Stakes Set",
        price: 199,
        icon: "🎋",
        category: Tool,
        description: "Natural bamboo stakes for plant support",
        in_stock: true,
    },
    BuiltinProduct {
        id: "watering-can",
        name: "Copper Watering Can",
        price: 1899,
        icon: "🪣",
        category: Tool,
        description: "Elegant copper watering can with long spout",
        in_stock: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = StaticCatalog::builtin();
        assert_eq!(catalog.len(), 18);

        for category in ProductCategory::ALL {
            let count = catalog
                .products()
                .iter()
                .filter(|p| p.category == category)
                .count();
            assert_eq!(count, 6, "category {}", category);
        }

        let ids: HashSet<_> = catalog.products().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), 18);
        assert!(catalog.products().iter().all(|p| p.price.is_positive()));
    }

    #[test]
    fn test_lookup() {
        let catalog = StaticCatalog::builtin();
        let npk = catalog.get(&ProductId::new("npk-fertilizer")).unwrap();
        assert_eq!(npk.price, Money::rupees(1299));

        let can = catalog.require(&ProductId::new("watering-can")).unwrap();
        assert!(!can.in_stock);
        assert!(matches!(
            catalog.require(&ProductId::new("orchid")),
            Err(CommerceError::ProductNotFound(_))
        ));
    }
}
