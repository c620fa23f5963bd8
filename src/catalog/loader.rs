//! TOML catalog loading.
//!
//! Provides two loading methods:
//! - `default_catalog()` - Parses the catalog embedded in the binary
//! - `load_catalog(path)` - Parses a catalog file from disk

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::models::{Product, ProductCategory};

use super::{Catalog, CatalogError};

/// Catalog embedded at compile time from `config/catalog.toml`
const DEFAULT_CATALOG: &str = include_str!("../../config/catalog.toml");

/// Raw catalog file layout: one array of tables per category
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub cleanser: Vec<ProductEntry>,
    #[serde(default)]
    pub treatment: Vec<ProductEntry>,
    #[serde(default)]
    pub moisturizer: Vec<ProductEntry>,
}

/// Product as written in the catalog file
#[derive(Debug, Clone, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    pub price: f64,
    pub rating: f64,
    #[serde(default)]
    pub available_at_retailer: bool,
}

impl From<ProductEntry> for Product {
    fn from(entry: ProductEntry) -> Self {
        Product {
            name: entry.name,
            price: entry.price,
            rating: entry.rating,
            available_at_retailer: entry.available_at_retailer,
        }
    }
}

impl CatalogConfig {
    /// Parses a catalog from TOML text
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    pub(super) fn into_listings(self) -> BTreeMap<ProductCategory, Vec<Product>> {
        let convert = |entries: Vec<ProductEntry>| -> Vec<Product> {
            entries.into_iter().map(Product::from).collect()
        };

        BTreeMap::from([
            (ProductCategory::Cleanser, convert(self.cleanser)),
            (ProductCategory::Treatment, convert(self.treatment)),
            (ProductCategory::Moisturizer, convert(self.moisturizer)),
        ])
    }
}

/// Loads and validates a catalog file at the given path.
///
/// # Example
/// ```ignore
/// let catalog = load_catalog(Path::new("/etc/skinsmart/catalog.toml"))?;
/// ```
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    let catalog = Catalog::from_config(CatalogConfig::from_toml(&content)?)?;

    tracing::info!(
        path = %path.display(),
        products = catalog.len(),
        "Loaded catalog from file"
    );

    Ok(catalog)
}

/// Loads the catalog embedded in the binary
pub fn default_catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_config(CatalogConfig::from_toml(DEFAULT_CATALOG)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_loads() {
        let catalog = default_catalog().unwrap();
        assert_eq!(catalog.len(), 9);
        for category in ProductCategory::ALL {
            assert_eq!(catalog.products(category).len(), 3);
        }
    }

    #[test]
    fn test_default_catalog_roles() {
        let catalog = default_catalog().unwrap();
        let roles = catalog.roles();
        assert_eq!(roles.gentle_cleanser.name, "Cetaphil Gentle Skin Cleanser");
        assert_eq!(roles.acne_treatment.name, "Neutrogena Rapid Clear Acne Treatment");
        assert_eq!(roles.active_serum.name, "The Ordinary Niacinamide 10%");
        assert!(!roles.active_serum.available_at_retailer);
        assert_eq!(roles.daily_moisturizer.name, "Cetaphil Daily Facial Moisturizer");
    }

    #[test]
    fn test_missing_category_is_rejected() {
        let content = r#"
            [[cleanser]]
            name = "Only One"
            price = 1.0
            rating = 3.0
        "#;
        let config = CatalogConfig::from_toml(content).unwrap();
        let err = Catalog::from_config(config).unwrap_err();
        assert!(matches!(err, CatalogError::TooFewProducts { found: 1, .. }));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = CatalogConfig::from_toml("[[cleanser]\nname = ").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(DEFAULT_CATALOG.as_bytes()).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 9);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
