//! Diagnosis results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductCategory};
use crate::error::CommerceError;
use crate::money::Money;

/// How serious a detected condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Healthy,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Healthy => "healthy",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }

    /// Whether the plant needs treatment.
    pub fn needs_treatment(&self) -> bool {
        *self != Severity::Healthy
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "healthy" => Ok(Severity::Healthy),
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            other => Err(CommerceError::UnknownValue {
                kind: "severity",
                value: other.to_string(),
            }),
        }
    }
}

/// Outcome of analysing a plant photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub condition: String,
    pub severity: Severity,
    pub description: String,
    pub treatment: String,
    /// Products recommended for the condition; each can go straight into
    /// the cart.
    pub products: Vec<Product>,
}

impl Diagnosis {
    /// Look up a recommended product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Combined price of every recommended product.
    pub fn products_total(&self) -> Money {
        self.products.iter().map(|p| p.price).sum()
    }
}

fn recommend(
    id: &str,
    name: &str,
    price: i64,
    icon: &str,
    category: ProductCategory,
    description: &str,
) -> Product {
    Product::new(id, name, Money::rupees(price), category)
        .with_icon(icon)
        .with_description(description)
}

/// The diagnoses the mock analyser chooses from.
pub fn builtin_diagnoses() -> Vec<Diagnosis> {
    use ProductCategory::{Fertilizer, Medicine, Tool};

    vec![
        Diagnosis {
            condition: "Leaf Spot Disease".into(),
            severity: Severity::Moderate,
            description: "Your plant appears to have leaf spot disease, likely caused by fungal \
                infection. This is common in humid conditions and can be treated effectively \
                with proper fungicide application."
                .into(),
            treatment: "Remove affected leaves, improve air circulation, and apply copper-based \
                fungicide twice weekly for 3 weeks."
                .into(),
            products: vec![
                recommend(
                    "copper-fungicide",
                    "Copper Fungicide Spray",
                    899,
                    "🧴",
                    Medicine,
                    "Effective copper-based fungicide for leaf spot treatment",
                ),
                recommend(
                    "immune-booster",
                    "Plant Immune Booster",
                    649,
                    "💊",
                    Medicine,
                    "Strengthens plant immunity against diseases",
                ),
                recommend(
                    "neem-oil",
                    "Organic Neem Oil",
                    1199,
                    "🌿",
                    Medicine,
                    "Natural organic treatment for various plant issues",
                ),
            ],
        },
        Diagnosis {
            condition: "Healthy Plant".into(),
            severity: Severity::Healthy,
            description: "Great news! Your plant appears to be healthy with no visible signs of \
                disease or pest damage. Continue with your current care routine."
                .into(),
            treatment: "Maintain current watering schedule and ensure adequate light. Consider \
                monthly fertilization during growing season."
                .into(),
            products: vec![
                recommend(
                    "plant-food",
                    "All-Purpose Plant Food",
                    749,
                    "🌱",
                    Fertilizer,
                    "Complete nutrition for healthy plant growth",
                ),
                recommend(
                    "growth-enhancer",
                    "Growth Enhancer",
                    1099,
                    "💚",
                    Fertilizer,
                    "Promotes vigorous growth and flowering",
                ),
            ],
        },
        Diagnosis {
            condition: "Nutrient Deficiency".into(),
            severity: Severity::Mild,
            description: "Your plant shows signs of nutrient deficiency, particularly nitrogen. \
                The yellowing of lower leaves is a classic indicator."
                .into(),
            treatment: "Apply balanced liquid fertilizer every 2 weeks and ensure proper drainage \
                to improve nutrient uptake."
                .into(),
            products: vec![
                recommend(
                    "liquid-fertilizer",
                    "Liquid Plant Fertilizer",
                    849,
                    "🧪",
                    Fertilizer,
                    "Fast-acting liquid nutrition for quick results",
                ),
                recommend(
                    "soil-conditioner",
                    "Soil Conditioner",
                    999,
                    "🪨",
                    Fertilizer,
                    "Improves soil structure and nutrient retention",
                ),
                recommend(
                    "ph-test-kit",
                    "pH Test Kit",
                    549,
                    "📏",
                    Tool,
                    "Monitor soil pH for optimal plant health",
                ),
            ],
        },
    ]
}
