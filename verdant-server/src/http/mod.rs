//! HTTP server module

mod api;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::middleware::{authenticate, require_facility_scope, resolve_context};

pub use api::{CanResponse, EntitlementsResponse, FacilityCanRequest, HealthResponse};

/// Create the HTTP router with all routes configured
///
/// Layers run outermost first: authenticate, resolve context, then (on
/// facility routes) facility scope.
pub fn create_router(state: Arc<AppState>) -> Router {
    let facility_routes = Router::new()
        .route(
            "/api/facilities/:facility_id/entitlements",
            get(api::facility_entitlements),
        )
        .route(
            "/api/facilities/:facility_id/can/:capability",
            get(api::facility_can),
        )
        .route("/api/facility/entitlements", get(api::facility_entitlements))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_facility_scope,
        ));

    let authenticated_routes = Router::new()
        .route("/api/entitlements", get(api::entitlements))
        .route("/api/facility/can", post(api::facility_can_body))
        .merge(facility_routes)
        .layer(middleware::from_fn(resolve_context))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            authenticate,
        ));

    Router::new()
        .route("/api/health", get(api::health))
        .merge(authenticated_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
