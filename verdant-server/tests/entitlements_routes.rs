//! Unscoped entitlements route

mod common;

use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use common::{Harness, expiry};
use serde_json::Value;
use verdant_server::auth::SessionClaims;

#[tokio::test]
async fn free_user_requesting_commercial_is_downgraded() {
    let h = Harness::new();
    let (name, value) = h.bearer("u9", "free", "commercial");

    let response = h.server.get("/api/entitlements").add_header(name, value).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["entitlements"]["mode"], "personal");
    assert_eq!(body["entitlements"]["requestedMode"], "commercial");
    let allowed = body["allowed"].as_array().unwrap();
    assert!(!allowed.contains(&Value::from("commercial.offers")));
}

#[tokio::test]
async fn facility_plan_outside_facility_has_no_facility_capabilities() {
    let h = Harness::new();
    let (name, value) = h.bearer("owner", "facility", "facility");

    let body: Value = h
        .server
        .get("/api/entitlements")
        .add_header(name, value)
        .await
        .json();
    assert!(body["entitlements"]["facilityRole"].is_null());
    let allowed = body["allowed"].as_array().unwrap();
    assert!(
        allowed
            .iter()
            .all(|cap| !cap.as_str().unwrap().starts_with("facility."))
    );
}

#[tokio::test]
async fn admin_sees_everything() {
    let h = Harness::new();
    let (name, value) = h.bearer_for(
        SessionClaims::new("root", expiry())
            .with_plan("free", "personal")
            .with_app_role("admin"),
    );

    let body: Value = h
        .server
        .get("/api/entitlements")
        .add_header(name, value)
        .await
        .json();
    assert_eq!(body["entitlements"]["plan"], "free");
    assert_eq!(
        body["allowed"].as_array().unwrap().len(),
        verdant_core::ALL_CAPABILITIES.len()
    );
}

#[tokio::test]
async fn garbage_plan_falls_back_to_free() {
    let h = Harness::new();
    let (name, value) = h.bearer("u9", "diamond", "personal");

    let response = h.server.get("/api/entitlements").add_header(name, value).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["entitlements"]["plan"], "free");
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let h = Harness::new();
    let (name, value) = h.bearer_for(SessionClaims::new("u1", chrono::Utc::now().timestamp() - 7200));

    let response = h.server.get("/api/entitlements").add_header(name, value).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_authorization_is_unauthorized() {
    let h = Harness::new();
    let response = h
        .server
        .get("/api/entitlements")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn health_needs_no_token() {
    let h = Harness::new();
    let body: Value = h.server.get("/api/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["catalog_version"], verdant_core::CATALOG_VERSION);
}
