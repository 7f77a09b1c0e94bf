//! REST API handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, Uri},
};
use serde::{Deserialize, Serialize};
use verdant_core::{CATALOG_VERSION, Capability, Entitlements, FacilityScope, RequestContext};

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::resolve_facility_id;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Version of the capability catalog this server enforces
    pub catalog_version: u32,
    /// Seconds since server started
    pub uptime_seconds: i64,
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_version: CATALOG_VERSION,
        uptime_seconds: state.uptime_seconds(),
    })
}

/// A caller's compiled entitlements
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementsResponse {
    pub user_id: String,
    pub facility_id: Option<String>,
    pub entitlements: Entitlements,
    /// Capabilities that currently pass `can`
    pub allowed: Vec<Capability>,
}

/// GET /api/entitlements - entitlements outside any facility
pub async fn entitlements(Extension(ctx): Extension<RequestContext>) -> Json<EntitlementsResponse> {
    let entitlements = ctx.entitlements();
    Json(EntitlementsResponse {
        user_id: ctx.user_id().to_string(),
        facility_id: None,
        allowed: entitlements.allowed(),
        entitlements: Entitlements::clone(entitlements),
    })
}

/// GET /api/facilities/:facility_id/entitlements - entitlements inside a facility
pub async fn facility_entitlements(
    Extension(scope): Extension<FacilityScope>,
) -> Json<EntitlementsResponse> {
    let entitlements = scope.entitlements();
    Json(EntitlementsResponse {
        user_id: scope.user_id().to_string(),
        facility_id: Some(scope.facility_id().to_string()),
        allowed: entitlements.allowed(),
        entitlements: Entitlements::clone(entitlements),
    })
}

/// Answer to a single capability question
#[derive(Debug, Serialize, Deserialize)]
pub struct CanResponse {
    pub capability: String,
    pub allowed: bool,
}

/// GET /api/facilities/:facility_id/can/:capability
///
/// Keys outside the catalog are answered with `allowed: false`.
pub async fn facility_can(
    Extension(scope): Extension<FacilityScope>,
    Path(params): Path<HashMap<String, String>>,
) -> Json<CanResponse> {
    let capability = params.get("capability").cloned().unwrap_or_default();
    let allowed = scope.entitlements().can_key(&capability);
    tracing::debug!(
        user_id = scope.user_id(),
        facility_id = scope.facility_id(),
        capability = %capability,
        allowed,
        "capability check"
    );
    Json(CanResponse {
        capability,
        allowed,
    })
}

/// Body of a capability question naming its facility inline
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityCanRequest {
    #[serde(default)]
    pub facility_id: Option<String>,
    pub capability: String,
}

/// POST /api/facility/can - facility id from the JSON body
///
/// A body `facilityId` wins; otherwise the header and query string are
/// consulted like on the other facility routes. Membership is verified here
/// because middleware never buffers the body.
pub async fn facility_can_body(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    headers: HeaderMap,
    uri: Uri,
    Json(request): Json<FacilityCanRequest>,
) -> Result<Json<CanResponse>, ApiError> {
    let facility_id = request
        .facility_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| resolve_facility_id(None, &headers, uri.query()));

    let scope =
        FacilityScope::require(&ctx, facility_id.as_deref(), state.memberships.as_ref()).await?;
    let allowed = scope.entitlements().can_key(&request.capability);
    tracing::debug!(
        user_id = scope.user_id(),
        facility_id = scope.facility_id(),
        capability = %request.capability,
        allowed,
        "capability check"
    );
    Ok(Json(CanResponse {
        capability: request.capability,
        allowed,
    }))
}
