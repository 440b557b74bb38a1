use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::handlers::{auth, dashboard, health, products, profile};
use crate::middleware::auth_gate;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Sign-in / logout
        .route("/signin", get(auth::signin_page).post(auth::signin))
        .route("/logout", post(auth::logout))
        .route("/profile", get(profile::profile))
        // Dashboard page views
        .route("/dashboard", get(dashboard::open_dashboard))
        .route(
            "/dashboard/views/{view_id}",
            get(dashboard::show_view).delete(dashboard::dispose_view),
        )
        // Admin mutations
        .route("/dashboard/views/{view_id}/products", post(products::create_product))
        .route(
            "/dashboard/views/{view_id}/products/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for the configured browser origins. `None` when no
/// origin is usable.
pub fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
