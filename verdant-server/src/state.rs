//! Shared application state for the verdant server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use verdant_core::{MembershipStore, MemoryMembershipStore};

use crate::auth::SessionValidator;

/// Shared application state accessible by all handlers and middleware
#[derive(Clone)]
pub struct AppState {
    /// Source of truth for facility membership
    pub memberships: Arc<dyn MembershipStore>,
    /// Session token verifier
    pub validator: Arc<SessionValidator>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(memberships: Arc<dyn MembershipStore>, validator: SessionValidator) -> Self {
        Self {
            memberships,
            validator: Arc::new(validator),
            started_at: Utc::now(),
        }
    }

    /// State with an empty in-memory directory
    pub fn with_empty_directory(validator: SessionValidator) -> Self {
        Self::new(Arc::new(MemoryMembershipStore::new()), validator)
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
