//! Static product catalog.
//!
//! The catalog is loaded and validated once at startup. Rule evaluation never
//! indexes into category listings; it works against [`CatalogRoles`], which are
//! bound to fixed listing positions during validation.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::models::{Product, ProductCategory};

mod loader;

pub use loader::{default_catalog, load_catalog, CatalogConfig, ProductEntry};

/// Minimum number of entries each category must carry
pub const MIN_PRODUCTS_PER_CATEGORY: usize = 3;

/// Highest allowed product rating
pub const MAX_RATING: f64 = 5.0;

/// Errors raised while loading or validating a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("category '{category}' has {found} products, at least {required} required")]
    TooFewProducts {
        category: ProductCategory,
        found: usize,
        required: usize,
    },
    #[error("duplicate product name '{0}'")]
    DuplicateName(String),
    #[error("product '{name}' has invalid price {price}")]
    InvalidPrice { name: String, price: f64 },
    #[error("product '{name}' has rating {rating} outside [0, 5]")]
    InvalidRating { name: String, rating: f64 },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Products bound to the roles the recommendation rules refer to
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRoles {
    /// First cleanser; oil-control pick
    pub oil_control_cleanser_a: Product,
    /// Second cleanser; oil-control pick
    pub oil_control_cleanser_b: Product,
    /// Third cleanser; default gentle pick
    pub gentle_cleanser: Product,
    /// First treatment; added for severe acne
    pub active_serum: Product,
    /// Second treatment; picked when no acne is present
    pub anti_aging_serum: Product,
    /// Third treatment; picked for any acne
    pub acne_treatment: Product,
    /// First moisturizer; picked for dry skin
    pub hydrating_moisturizer: Product,
    /// Second moisturizer; not referenced by any rule
    pub night_cream: Product,
    /// Third moisturizer; default pick
    pub daily_moisturizer: Product,
}

/// Validated, read-only catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    listings: BTreeMap<ProductCategory, Vec<Product>>,
    roles: CatalogRoles,
}

impl Catalog {
    /// Validates a parsed configuration and binds rule roles
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        let listings = config.into_listings();

        for category in ProductCategory::ALL {
            let found = listings.get(&category).map_or(0, Vec::len);
            if found < MIN_PRODUCTS_PER_CATEGORY {
                return Err(CatalogError::TooFewProducts {
                    category,
                    found,
                    required: MIN_PRODUCTS_PER_CATEGORY,
                });
            }
        }

        let mut seen = HashSet::new();
        for product in listings.values().flatten() {
            validate_product(product)?;
            if !seen.insert(product.name.as_str()) {
                return Err(CatalogError::DuplicateName(product.name.clone()));
            }
        }

        let pick = |category: ProductCategory, index: usize| -> Result<Product, CatalogError> {
            let listing = listings.get(&category).map(Vec::as_slice).unwrap_or(&[]);
            listing
                .get(index)
                .cloned()
                .ok_or(CatalogError::TooFewProducts {
                    category,
                    found: listing.len(),
                    required: MIN_PRODUCTS_PER_CATEGORY,
                })
        };

        let roles = CatalogRoles {
            oil_control_cleanser_a: pick(ProductCategory::Cleanser, 0)?,
            oil_control_cleanser_b: pick(ProductCategory::Cleanser, 1)?,
            gentle_cleanser: pick(ProductCategory::Cleanser, 2)?,
            active_serum: pick(ProductCategory::Treatment, 0)?,
            anti_aging_serum: pick(ProductCategory::Treatment, 1)?,
            acne_treatment: pick(ProductCategory::Treatment, 2)?,
            hydrating_moisturizer: pick(ProductCategory::Moisturizer, 0)?,
            night_cream: pick(ProductCategory::Moisturizer, 1)?,
            daily_moisturizer: pick(ProductCategory::Moisturizer, 2)?,
        };

        tracing::debug!(
            products = seen.len(),
            "Catalog validated"
        );

        Ok(Self { listings, roles })
    }

    pub fn roles(&self) -> &CatalogRoles {
        &self.roles
    }

    /// Products of one category in catalog order
    pub fn products(&self, category: ProductCategory) -> &[Product] {
        self.listings
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up a product by its unique name
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.listings.values().flatten().find(|p| p.name == name)
    }

    /// All listings grouped by category
    pub fn listings(&self) -> &BTreeMap<ProductCategory, Vec<Product>> {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_product(product: &Product) -> Result<(), CatalogError> {
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(CatalogError::InvalidPrice {
            name: product.name.clone(),
            price: product.price,
        });
    }
    if !(0.0..=MAX_RATING).contains(&product.rating) {
        return Err(CatalogError::InvalidRating {
            name: product.name.clone(),
            rating: product.rating,
        });
    }
    Ok(())
}
