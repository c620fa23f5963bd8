use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{AppError, AppResult};

use super::analysis::METRIC_MAX;

/// Products offered as "previously used" choices in the profile form
pub const KNOWN_PREVIOUS_PRODUCTS: [&str; 6] = [
    "CeraVe Hydrating Cleanser",
    "Neutrogena Ultra Gentle Cleanser",
    "The Ordinary Niacinamide",
    "Cetaphil Daily Moisturizer",
    "Olay Regenerist Serum",
    "L'Oreal Revitalift Cream",
];

/// Self-reported skin type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SkinType {
    #[default]
    Normal,
    Oily,
    Dry,
    Combination,
    Sensitive,
}

/// User-adjustable profile that outlives individual captures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Sensitivity slider value in `[0, 100]`
    pub sensitivity: i64,
    pub has_tan: bool,
    /// Names of products the user has used before
    pub previous_products: BTreeSet<String>,
    pub skin_type: SkinType,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub sensitivity: Option<i64>,
    pub has_tan: Option<bool>,
    pub previous_products: Option<BTreeSet<String>>,
    pub skin_type: Option<SkinType>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile {
    /// Creates the profile a new user starts with
    pub fn new() -> Self {
        Self {
            sensitivity: 50,
            has_tan: false,
            previous_products: BTreeSet::new(),
            skin_type: SkinType::Normal,
        }
    }

    /// Adds the product if absent, removes it if present.
    /// Returns whether the product is selected afterwards.
    pub fn toggle_product(&mut self, product: &str) -> bool {
        if self.previous_products.remove(product) {
            false
        } else {
            self.previous_products.insert(product.to_string());
            true
        }
    }

    /// Applies a partial update after validating it
    pub fn apply(&mut self, update: ProfileUpdate) -> AppResult<()> {
        if let Some(sensitivity) = update.sensitivity {
            validate_sensitivity(sensitivity)?;
        }
        let previous_products = update
            .previous_products
            .map(normalize_products)
            .transpose()?;

        if let Some(sensitivity) = update.sensitivity {
            self.sensitivity = sensitivity;
        }
        if let Some(has_tan) = update.has_tan {
            self.has_tan = has_tan;
        }
        if let Some(products) = previous_products {
            self.previous_products = products;
        }
        if let Some(skin_type) = update.skin_type {
            self.skin_type = skin_type;
        }
        Ok(())
    }
}

fn validate_sensitivity(value: i64) -> AppResult<()> {
    if (0..=METRIC_MAX).contains(&value) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "sensitivity must be between 0 and {}, got {}",
            METRIC_MAX, value
        )))
    }
}

/// Trims a product name, rejecting names that are blank
pub fn normalize_product_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput(
            "product name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn normalize_products(products: BTreeSet<String>) -> AppResult<BTreeSet<String>> {
    products
        .iter()
        .map(|name| normalize_product_name(name))
        .collect()
}
