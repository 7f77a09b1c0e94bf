//! Server-side verification of facility membership
//!
//! A facility-scoped request moves through
//! `Unscoped → FacilityIdPresent → MembershipVerified → RoleAttached`.
//! Any failed step ends the request with an [`AccessError`]; nothing is
//! retried and nothing is cached between requests.

use std::fmt;
use std::sync::Arc;

use super::{FacilityMembership, FacilityRole, MembershipStore};
use crate::catalog::Capability;
use crate::context::RequestContext;
use crate::entitlements::Entitlements;
use crate::error::AccessError;

/// Progress of a facility-scoped request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeStage {
    Unscoped,
    FacilityIdPresent,
    MembershipVerified,
    RoleAttached,
}

impl fmt::Display for ScopeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScopeStage::Unscoped => "unscoped",
            ScopeStage::FacilityIdPresent => "facility_id_present",
            ScopeStage::MembershipVerified => "membership_verified",
            ScopeStage::RoleAttached => "role_attached",
        };
        f.write_str(name)
    }
}

/// Look up the caller's live membership in a facility
///
/// Removed memberships are reported exactly like missing ones.
pub async fn verify_membership(
    store: &dyn MembershipStore,
    facility_id: &str,
    user_id: &str,
) -> Result<FacilityMembership, AccessError> {
    if !store.facility_exists(facility_id).await? {
        tracing::debug!(facility_id, user_id, "facility not found");
        return Err(AccessError::FacilityNotFound(facility_id.to_string()));
    }

    match store.membership(facility_id, user_id).await? {
        Some(membership) if membership.is_active() => Ok(membership),
        Some(_) => {
            tracing::debug!(facility_id, user_id, "membership removed, denying");
            Err(AccessError::FacilityAccessDenied(facility_id.to_string()))
        }
        None => {
            tracing::debug!(facility_id, user_id, "no membership, denying");
            Err(AccessError::FacilityAccessDenied(facility_id.to_string()))
        }
    }
}

/// A request verified to be operating inside one facility
#[derive(Debug, Clone)]
pub struct FacilityScope {
    user_id: String,
    facility_id: String,
    facility_role: FacilityRole,
    entitlements: Arc<Entitlements>,
}

impl FacilityScope {
    /// Verify membership and attach the authoritative facility role
    ///
    /// The stored role replaces anything the client claimed.
    pub async fn require(
        ctx: &RequestContext,
        facility_id: Option<&str>,
        store: &dyn MembershipStore,
    ) -> Result<Self, AccessError> {
        let mut stage = ScopeStage::Unscoped;

        let facility_id = facility_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                tracing::debug!(user_id = ctx.user_id(), %stage, "no facility id on scoped route");
                AccessError::FacilityIdRequired
            })?;
        stage = ScopeStage::FacilityIdPresent;
        tracing::trace!(user_id = ctx.user_id(), facility_id, %stage);

        let membership = verify_membership(store, facility_id, ctx.user_id()).await?;
        stage = ScopeStage::MembershipVerified;
        tracing::trace!(user_id = ctx.user_id(), facility_id, %stage);

        let entitlements = ctx
            .entitlements()
            .recompile_with_facility_role(Some(membership.role));
        stage = ScopeStage::RoleAttached;
        tracing::trace!(user_id = ctx.user_id(), facility_id, role = %membership.role, %stage);

        Ok(Self {
            user_id: ctx.user_id().to_string(),
            facility_id: facility_id.to_string(),
            facility_role: membership.role,
            entitlements: Arc::new(entitlements),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn facility_id(&self) -> &str {
        &self.facility_id
    }

    pub fn facility_role(&self) -> FacilityRole {
        self.facility_role
    }

    pub fn entitlements(&self) -> &Arc<Entitlements> {
        &self.entitlements
    }

    /// Require the caller to hold one of `roles` in this facility
    pub fn require_role(&self, roles: &[FacilityRole]) -> Result<(), AccessError> {
        if roles.contains(&self.facility_role) {
            return Ok(());
        }
        let wanted: Vec<&str> = roles.iter().map(FacilityRole::as_str).collect();
        tracing::debug!(
            user_id = %self.user_id,
            facility_id = %self.facility_id,
            role = %self.facility_role,
            "facility role not in required set"
        );
        Err(AccessError::RoleNotAllowed {
            role: Some(self.facility_role),
            action: format!("act as one of [{}]", wanted.join(", ")),
        })
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.entitlements.can(capability)
    }

    pub fn require_capability(&self, capability: Capability) -> Result<(), AccessError> {
        self.entitlements.require(capability)
    }
}
