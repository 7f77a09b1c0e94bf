//! Shared test utilities for verdant-server integration tests

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use axum_test::TestServer;
use verdant_core::{FacilityRole, MembershipStore, MemoryMembershipStore};
use verdant_server::auth::{AuthConfig, SessionClaims, SessionValidator};
use verdant_server::{AppState, create_router};

pub const SECRET: &str = "test-secret";

#[allow(dead_code)]
pub const DIRECTORY: &str = r#"
[[facilities]]
id = "fac1"
name = "North Greenhouse"

[[facilities.members]]
user_id = "owner"
role = "OWNER"

[[facilities.members]]
user_id = "staff"
role = "STAFF"

[[facilities.members]]
user_id = "u1"
role = "MANAGER"
deleted_at = "2025-06-01T12:00:00Z"

[[facilities]]
id = "fac2"
"#;

/// Test harness holding the store so tests can change membership mid-test
#[allow(dead_code)]
pub struct Harness {
    pub server: TestServer,
    pub store: Arc<MemoryMembershipStore>,
    pub validator: SessionValidator,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryMembershipStore::from_toml(DIRECTORY).unwrap());
        let state = AppState::new(
            store.clone(),
            SessionValidator::new(AuthConfig::new(SECRET)).unwrap(),
        );
        let server = TestServer::new(create_router(Arc::new(state))).unwrap();
        Self {
            server,
            store,
            validator: SessionValidator::new(AuthConfig::new(SECRET)).unwrap(),
        }
    }

    /// Authorization header for a user on the given plan and mode
    pub fn bearer(&self, user_id: &str, plan: &str, mode: &str) -> (HeaderName, HeaderValue) {
        self.bearer_for(SessionClaims::new(user_id, expiry()).with_plan(plan, mode))
    }

    pub fn bearer_for(&self, claims: SessionClaims) -> (HeaderName, HeaderValue) {
        let token = self.validator.issue(&claims).unwrap();
        (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        )
    }

    pub async fn set_role(&self, user_id: &str, role: FacilityRole) {
        self.store.upsert_member("fac1", user_id, role).await;
    }
}

#[allow(dead_code)]
pub fn expiry() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

/// A server backed by an arbitrary membership store, plus a validator that
/// signs tokens it accepts
#[allow(dead_code)]
pub fn server_with_store(store: Arc<dyn MembershipStore>) -> (TestServer, SessionValidator) {
    let state = AppState::new(
        store,
        SessionValidator::new(AuthConfig::new(SECRET)).unwrap(),
    );
    let server = TestServer::new(create_router(Arc::new(state))).unwrap();
    (server, SessionValidator::new(AuthConfig::new(SECRET)).unwrap())
}
