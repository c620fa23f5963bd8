use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Product grouping within the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Cleanser,
    Treatment,
    Moisturizer,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Cleanser,
        ProductCategory::Treatment,
        ProductCategory::Moisturizer,
    ];
}

impl Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProductCategory::Cleanser => "cleanser",
            ProductCategory::Treatment => "treatment",
            ProductCategory::Moisturizer => "moisturizer",
        };
        write!(f, "{}", label)
    }
}

/// Read-only catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique name, doubles as the product identifier
    pub name: String,
    /// Shelf price in dollars
    pub price: f64,
    /// Average customer rating in `[0, 5]`
    pub rating: f64,
    /// Whether the retailer stocks the product
    #[serde(default)]
    pub available_at_retailer: bool,
}

/// Output of the recommendation resolver
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub advice: Vec<String>,
    pub recommendations: Vec<Product>,
}

impl RecommendationResult {
    /// The "no capture yet" result
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.advice.is_empty() && self.recommendations.is_empty()
    }
}
