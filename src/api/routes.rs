use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            // Outermost first; the request id must exist before the trace span is made
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/catalog", get(handlers::get_catalog))
        // Profile
        .route(
            "/profile",
            get(handlers::get_profile).patch(handlers::update_profile),
        )
        .route(
            "/profile/products",
            get(handlers::get_known_products).post(handlers::toggle_previous_product),
        )
        // Analysis
        .route(
            "/analysis",
            get(handlers::get_analysis)
                .post(handlers::capture_analysis)
                .put(handlers::put_analysis)
                .delete(handlers::clear_analysis),
        )
        // Recommendations
        .route("/recommendations", get(handlers::get_recommendations))
        .route("/resolve", post(handlers::resolve_request))
        // Favorites
        .route(
            "/favorites",
            get(handlers::get_favorites).post(handlers::toggle_favorite),
        )
}
