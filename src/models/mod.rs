pub mod analysis;
pub mod product;
pub mod profile;

pub use analysis::{AcneLevel, Analysis, METRIC_MAX};
pub use product::{Product, ProductCategory, RecommendationResult};
pub use profile::{Profile, ProfileUpdate, SkinType, KNOWN_PREVIOUS_PRODUCTS};
