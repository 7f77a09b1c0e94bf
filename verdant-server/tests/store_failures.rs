//! Membership store outages surface as 503, never as access

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use common::{expiry, server_with_store};
use serde_json::Value;
use verdant_core::{FacilityMembership, MembershipStore, StoreError};
use verdant_server::auth::SessionClaims;

struct OfflineDirectory;

#[async_trait]
impl MembershipStore for OfflineDirectory {
    async fn facility_exists(&self, _facility_id: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("directory offline".into()))
    }

    async fn membership(
        &self,
        _facility_id: &str,
        _user_id: &str,
    ) -> Result<Option<FacilityMembership>, StoreError> {
        Err(StoreError::Unavailable("directory offline".into()))
    }
}

fn bearer(validator: &verdant_server::auth::SessionValidator) -> HeaderValue {
    let claims = SessionClaims::new("owner", expiry()).with_plan("facility", "facility");
    let token = validator.issue(&claims).unwrap();
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

#[tokio::test]
async fn facility_route_answers_service_unavailable() {
    let (server, validator) = server_with_store(Arc::new(OfflineDirectory));

    let response = server
        .get("/api/facilities/fac1/can/facility.audit")
        .add_header(AUTHORIZATION, bearer(&validator))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MEMBERSHIP_LOOKUP_FAILED");
    assert!(body.get("allowed").is_none());
}

#[tokio::test]
async fn unscoped_routes_unaffected_by_outage() {
    let (server, validator) = server_with_store(Arc::new(OfflineDirectory));

    let response = server
        .get("/api/entitlements")
        .add_header(AUTHORIZATION, bearer(&validator))
        .await;
    response.assert_status_ok();
}
