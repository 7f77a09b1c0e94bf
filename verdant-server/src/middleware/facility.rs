//! Facility scope middleware

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    RequestExt,
    extract::{Path, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use verdant_core::{AccessError, FacilityScope, RequestContext};

use crate::AppState;
use crate::error::ApiError;

/// Header carrying the facility id on routes without a path parameter
pub const FACILITY_ID_HEADER: &str = "x-facility-id";

/// Query parameter carrying the facility id
pub const FACILITY_ID_QUERY: &str = "facilityId";

/// Pick the facility id from path, then header, then query string
pub fn resolve_facility_id(
    path_param: Option<&str>,
    headers: &HeaderMap,
    query: Option<&str>,
) -> Option<String> {
    let non_empty = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    if let Some(id) = path_param.and_then(non_empty) {
        return Some(id);
    }
    if let Some(id) = headers
        .get(FACILITY_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(non_empty)
    {
        return Some(id);
    }
    query.and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == FACILITY_ID_QUERY)
            .and_then(|(_, value)| non_empty(&*value))
    })
}

/// Verify membership in the requested facility and attach a [`FacilityScope`]
///
/// Membership is read from the store on every request.
pub async fn require_facility_scope(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .ok_or(AccessError::AuthRequired)?;

    let path_params = request
        .extract_parts::<Path<HashMap<String, String>>>()
        .await
        .ok();
    let facility_id = resolve_facility_id(
        path_params
            .as_ref()
            .and_then(|Path(params)| params.get("facility_id"))
            .map(String::as_str),
        request.headers(),
        request.uri().query(),
    );

    let scope =
        FacilityScope::require(&ctx, facility_id.as_deref(), state.memberships.as_ref()).await?;
    request.extensions_mut().insert(scope);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_path_param_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(FACILITY_ID_HEADER, HeaderValue::from_static("fac-header"));
        let id = resolve_facility_id(Some("fac-path"), &headers, Some("facilityId=fac-query"));
        assert_eq!(id.as_deref(), Some("fac-path"));
    }

    #[test]
    fn test_header_before_query() {
        let mut headers = HeaderMap::new();
        headers.insert(FACILITY_ID_HEADER, HeaderValue::from_static("fac-header"));
        let id = resolve_facility_id(None, &headers, Some("facilityId=fac-query"));
        assert_eq!(id.as_deref(), Some("fac-header"));
    }

    #[test]
    fn test_query_fallback() {
        let headers = HeaderMap::new();
        let id = resolve_facility_id(None, &headers, Some("x=1&facilityId=fac%201"));
        assert_eq!(id.as_deref(), Some("fac 1"));
    }

    #[test]
    fn test_blank_values_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(FACILITY_ID_HEADER, HeaderValue::from_static("  "));
        assert_eq!(resolve_facility_id(Some(""), &headers, Some("facilityId=")), None);
    }
}
