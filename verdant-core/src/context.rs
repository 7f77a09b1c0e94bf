//! Request context types
//!
//! Each stage of request handling is a distinct type built from the one
//! before it: [`Authenticated`] → [`RequestContext`] →
//! [`FacilityScope`](crate::facility::FacilityScope). Skipping a stage does
//! not type-check.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entitlements::{Entitlements, PrincipalInputs, compile};

/// Proof that the caller has been authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    user_id: String,
}

impl Authenticated {
    /// Only authenticators should call this, after verifying credentials
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Profile values as delivered by the session endpoint
///
/// Everything is optional and unvalidated. Missing or unrecognized values
/// are normalized when compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub app_role: Option<String>,
    #[serde(default)]
    pub facility_id: Option<String>,
    #[serde(default)]
    pub facility_role: Option<String>,
}

impl Profile {
    pub fn new(plan: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            plan: Some(plan.into()),
            mode: Some(mode.into()),
            ..Default::default()
        }
    }

    pub fn with_app_role(mut self, app_role: impl Into<String>) -> Self {
        self.app_role = Some(app_role.into());
        self
    }

    pub fn with_facility(
        mut self,
        facility_id: impl Into<String>,
        facility_role: impl Into<String>,
    ) -> Self {
        self.facility_id = Some(facility_id.into());
        self.facility_role = Some(facility_role.into());
        self
    }

    /// Normalized inputs, including whatever facility role the profile claims
    pub fn inputs(&self) -> PrincipalInputs {
        PrincipalInputs::normalize(
            self.plan.as_deref(),
            self.mode.as_deref(),
            self.app_role.as_deref(),
            self.facility_role.as_deref(),
        )
    }
}

/// An authenticated caller with entitlements compiled from their profile
///
/// Any facility role claimed by the profile is dropped here. Facility roles
/// only enter through [`FacilityScope`](crate::facility::FacilityScope).
#[derive(Debug, Clone)]
pub struct RequestContext {
    user_id: String,
    entitlements: Arc<Entitlements>,
}

impl RequestContext {
    pub fn resolve(auth: Authenticated, profile: &Profile) -> Self {
        let inputs = profile.inputs().with_facility_role(None);
        Self {
            user_id: auth.user_id,
            entitlements: Arc::new(compile(inputs)),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn entitlements(&self) -> &Arc<Entitlements> {
        &self.entitlements
    }
}
