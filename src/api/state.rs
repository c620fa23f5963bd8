use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::catalog::{default_catalog, load_catalog, Catalog};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Analysis, Profile};
use crate::services::{AnalysisSource, RandomAnalysisSource};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-only catalog, validated at startup
    pub catalog: Arc<Catalog>,
    /// Where new analyses come from
    pub capture: Arc<dyn AnalysisSource>,
    pub session: Arc<RwLock<Session>>,
}

/// The analysis currently shown to the user
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapturedAnalysis {
    #[serde(flatten)]
    pub analysis: Analysis,
    pub captured_at: DateTime<Utc>,
    /// Name of the source that produced the analysis
    pub source: String,
}

/// Per-user state held for the lifetime of the process
#[derive(Debug, Default)]
pub struct Session {
    pub profile: Profile,
    /// At most one analysis is current; a new capture replaces it
    pub current: Option<CapturedAnalysis>,
    /// Favorited product names; view state only, never read by the resolver
    pub favorites: BTreeSet<String>,
}

impl Session {
    /// Makes `analysis` the current one, discarding any previous capture
    pub fn replace_analysis(&mut self, analysis: Analysis, source: &str) -> CapturedAnalysis {
        let captured = CapturedAnalysis {
            analysis,
            captured_at: Utc::now(),
            source: source.to_string(),
        };
        self.current = Some(captured.clone());
        captured
    }

    /// Returns to the idle "no capture yet" state
    pub fn clear_analysis(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Adds the product to favorites if absent, removes it otherwise.
    /// Returns whether the product is a favorite afterwards.
    pub fn toggle_favorite(&mut self, product: &str) -> bool {
        if self.favorites.remove(product) {
            false
        } else {
            self.favorites.insert(product.to_string());
            true
        }
    }
}

impl AppState {
    /// Creates application state around a catalog and capture source
    pub fn new(catalog: Catalog, capture: Arc<dyn AnalysisSource>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            capture,
            session: Arc::new(RwLock::new(Session::default())),
        }
    }

    /// Builds state from configuration, loading and validating the catalog.
    /// Catalog failures surface as [`AppError::Catalog`](crate::error::AppError::Catalog).
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => load_catalog(path)?,
            None => default_catalog()?,
        };

        let capture = Arc::new(RandomAnalysisSource::new(config.capture_delay()));
        Ok(Self::new(catalog, capture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use axum::response::IntoResponse;
    use crate::models::AcneLevel;

    fn analysis(oiliness: i64) -> Analysis {
        Analysis {
            acne_level: AcneLevel::None,
            pores: 10,
            oiliness,
            dryness: 10,
            dark_spots: 10,
        }
    }

    #[test]
    fn test_new_capture_replaces_previous() {
        let mut session = Session::default();
        session.replace_analysis(analysis(10), "random");
        session.replace_analysis(analysis(90), "manual");

        let current = session.current.as_ref().unwrap();
        assert_eq!(current.analysis.oiliness, 90);
        assert_eq!(current.source, "manual");
    }

    #[test]
    fn test_clear_analysis() {
        let mut session = Session::default();
        assert!(!session.clear_analysis());
        session.replace_analysis(analysis(10), "random");
        assert!(session.clear_analysis());
        assert!(session.current.is_none());
    }

    #[test]
    fn test_toggle_favorite() {
        let mut session = Session::default();
        assert!(session.toggle_favorite("Cetaphil Gentle Skin Cleanser"));
        assert!(session.toggle_favorite("Olay Regenerist Face Serum"));
        assert!(!session.toggle_favorite("Cetaphil Gentle Skin Cleanser"));
        assert_eq!(session.favorites.len(), 1);
    }

    #[test]
    fn test_captured_analysis_flattens_metrics() {
        let mut session = Session::default();
        let captured = session.replace_analysis(analysis(42), "random");
        let json = serde_json::to_value(&captured).unwrap();
        assert_eq!(json["oiliness"], 42);
        assert_eq!(json["acneLevel"], "none");
        assert_eq!(json["source"], "random");
        assert!(json["capturedAt"].is_string());
    }

    #[test]
    fn test_from_config_uses_embedded_catalog() {
        let config = Config::from_vars(Vec::new()).unwrap();
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.catalog.len(), 9);
        assert_eq!(state.capture.name(), "random");
    }

    #[test]
    fn test_from_config_reports_missing_catalog_file() {
        let config = Config::from_vars(vec![(
            "CATALOG_PATH".to_string(),
            "/nonexistent/catalog.toml".to_string(),
        )])
        .unwrap();
        let result = AppState::from_config(&config);
        assert!(matches!(
            result,
            Err(AppError::Catalog(crate::catalog::CatalogError::Io(_)))
        ));
    }

    #[test]
    fn test_invalid_catalog_file_is_a_catalog_error() {
        let path = std::env::temp_dir().join(format!("catalog-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[[cleanser]]\nname = \"Only\"\nprice = 1.0\nrating = 4.0\navailable_at_retailer = true\n",
        )
        .unwrap();

        let config = Config::from_vars(vec![(
            "CATALOG_PATH".to_string(),
            path.display().to_string(),
        )])
        .unwrap();
        let result = AppState::from_config(&config);
        std::fs::remove_file(&path).ok();

        let error = match result {
            Err(error) => error,
            Ok(_) => panic!("under-populated catalog must be rejected"),
        };
        assert!(matches!(error, AppError::Catalog(_)));
        assert_eq!(
            error.into_response().status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
