use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::profile::normalize_product_name;
use crate::models::{
    Analysis, Product, ProductCategory, Profile, ProfileUpdate, RecommendationResult,
    KNOWN_PREVIOUS_PRODUCTS,
};
use crate::services::resolve;

use super::extract::AppJson;
use super::state::CapturedAnalysis;
use super::AppState;

/// Source label for analyses supplied directly by the caller
const MANUAL_SOURCE: &str = "manual";

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct ProductToggleRequest {
    pub product: String,
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub analysis: Option<Analysis>,
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    pub favorites: Vec<String>,
    /// Whether the toggled product is a favorite after the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the catalog grouped by category
pub async fn get_catalog(
    State(state): State<AppState>,
) -> Json<BTreeMap<ProductCategory, Vec<Product>>> {
    Json(state.catalog.listings().clone())
}

/// Get the current profile
pub async fn get_profile(State(state): State<AppState>) -> Json<Profile> {
    let session = state.session.read().await;
    Json(session.profile.clone())
}

/// Apply a partial profile update
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(update): AppJson<ProfileUpdate>,
) -> AppResult<Json<Profile>> {
    let mut session = state.session.write().await;
    session.profile.apply(update)?;

    tracing::info!(
        request_id = %request_id,
        sensitivity = session.profile.sensitivity,
        skin_type = ?session.profile.skin_type,
        "Profile updated"
    );

    Ok(Json(session.profile.clone()))
}

/// Previously used products offered as profile choices
pub async fn get_known_products() -> Json<Vec<&'static str>> {
    Json(KNOWN_PREVIOUS_PRODUCTS.to_vec())
}

/// Toggle a previously used product on the profile
pub async fn toggle_previous_product(
    State(state): State<AppState>,
    AppJson(request): AppJson<ProductToggleRequest>,
) -> AppResult<Json<Profile>> {
    let product = normalize_product_name(&request.product)?;

    let mut session = state.session.write().await;
    session.profile.toggle_product(&product);
    Ok(Json(session.profile.clone()))
}

/// Capture a new analysis from the configured source
pub async fn capture_analysis(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<(StatusCode, Json<CapturedAnalysis>)> {
    tracing::info!(
        request_id = %request_id,
        source = state.capture.name(),
        "Capturing analysis"
    );

    // The session lock is not held while the source runs
    let analysis = state.capture.produce_analysis().await?;

    let captured = state
        .session
        .write()
        .await
        .replace_analysis(analysis, state.capture.name());

    tracing::info!(
        request_id = %request_id,
        acne_level = %captured.analysis.acne_level,
        "Analysis captured"
    );

    Ok((StatusCode::CREATED, Json(captured)))
}

/// Store a caller-supplied analysis as the current one
pub async fn put_analysis(
    State(state): State<AppState>,
    AppJson(analysis): AppJson<Analysis>,
) -> AppResult<Json<CapturedAnalysis>> {
    analysis.validate()?;

    let captured = state
        .session
        .write()
        .await
        .replace_analysis(analysis, MANUAL_SOURCE);

    Ok(Json(captured))
}

/// Get the current analysis
pub async fn get_analysis(State(state): State<AppState>) -> AppResult<Json<CapturedAnalysis>> {
    let session = state.session.read().await;
    session
        .current
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No analysis captured yet".to_string()))
}

/// Discard the current analysis
pub async fn clear_analysis(State(state): State<AppState>) -> StatusCode {
    state.session.write().await.clear_analysis();
    StatusCode::NO_CONTENT
}

/// Recommendations for the current analysis and profile
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<RecommendationResult> {
    let (analysis, profile) = {
        let session = state.session.read().await;
        (
            session.current.as_ref().map(|c| c.analysis),
            session.profile.clone(),
        )
    };

    let result = resolve(analysis.as_ref(), &profile, &state.catalog);

    tracing::info!(
        request_id = %request_id,
        has_analysis = analysis.is_some(),
        advice_count = result.advice.len(),
        recommendation_count = result.recommendations.len(),
        "Recommendations resolved"
    );

    Json(result)
}

/// Stateless resolution over a request body
///
/// Metrics are not range-checked here: values outside `[0, 100]` simply pass
/// or fail the rule thresholds.
pub async fn resolve_request(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResolveRequest>,
) -> Json<RecommendationResult> {
    Json(resolve(
        request.analysis.as_ref(),
        &request.profile,
        &state.catalog,
    ))
}

/// List favorited products
pub async fn get_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    let session = state.session.read().await;
    Json(FavoritesResponse {
        favorites: session.favorites.iter().cloned().collect(),
        is_favorite: None,
    })
}

/// Toggle a catalog product as favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    AppJson(request): AppJson<ProductToggleRequest>,
) -> AppResult<Json<FavoritesResponse>> {
    if state.catalog.find(&request.product).is_none() {
        return Err(AppError::NotFound(format!(
            "Product '{}' is not in the catalog",
            request.product
        )));
    }

    let mut session = state.session.write().await;
    let is_favorite = session.toggle_favorite(&request.product);

    Ok(Json(FavoritesResponse {
        favorites: session.favorites.iter().cloned().collect(),
        is_favorite: Some(is_favorite),
    }))
}
