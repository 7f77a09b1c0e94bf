//! The entitlements compiler

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Capability, all_capabilities};
use crate::facility::FacilityRole;
use crate::mode::{Mode, resolve_mode};
use crate::plan::{Limits, Plan};

/// Application-wide role of the principal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    #[default]
    User,
    Admin,
}

impl AppRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::User => "user",
            AppRole::Admin => "admin",
        }
    }

    pub fn parse(raw: &str) -> Option<AppRole> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Some(AppRole::User),
            "admin" => Some(AppRole::Admin),
            _ => None,
        }
    }

    /// Parse a role, falling back to [`AppRole::User`]
    pub fn normalize(raw: Option<&str>) -> AppRole {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            None => AppRole::User,
            Some(value) => AppRole::parse(value).unwrap_or_else(|| {
                tracing::warn!(app_role = %value, "unrecognized app role, falling back to user");
                AppRole::User
            }),
        }
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized compiler inputs
///
/// Equal inputs always compile to equal entitlements, so this is also the
/// memoization key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalInputs {
    pub plan: Plan,
    pub mode: Mode,
    pub app_role: AppRole,
    pub facility_role: Option<FacilityRole>,
}

impl PrincipalInputs {
    pub fn new(plan: Plan, mode: Mode) -> Self {
        Self {
            plan,
            mode,
            app_role: AppRole::User,
            facility_role: None,
        }
    }

    /// Normalize raw values, substituting safe defaults for anything unrecognized
    pub fn normalize(
        plan: Option<&str>,
        mode: Option<&str>,
        app_role: Option<&str>,
        facility_role: Option<&str>,
    ) -> Self {
        Self {
            plan: Plan::normalize(plan),
            mode: Mode::normalize(mode),
            app_role: AppRole::normalize(app_role),
            facility_role: FacilityRole::normalize(facility_role),
        }
    }

    pub fn with_app_role(mut self, app_role: AppRole) -> Self {
        self.app_role = app_role;
        self
    }

    pub fn with_facility_role(mut self, facility_role: Option<FacilityRole>) -> Self {
        self.facility_role = facility_role;
        self
    }
}

/// Compiled, immutable authorization snapshot for one principal
///
/// Only produced by [`compile`]. A change to any input means compiling a new
/// snapshot, never editing this one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlements {
    plan: Plan,
    mode: Mode,
    requested_mode: Mode,
    app_role: AppRole,
    facility_role: Option<FacilityRole>,
    capabilities: BTreeSet<Capability>,
    limits: Limits,
}

impl Entitlements {
    pub fn plan(&self) -> Plan {
        self.plan
    }

    /// The effective mode after consistency checks
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The mode that was asked for
    pub fn requested_mode(&self) -> Mode {
        self.requested_mode
    }

    /// Returns true if the requested mode was degraded to personal
    pub fn mode_downgraded(&self) -> bool {
        self.mode != self.requested_mode
    }

    pub fn app_role(&self) -> AppRole {
        self.app_role
    }

    pub fn is_admin(&self) -> bool {
        self.app_role == AppRole::Admin
    }

    pub fn facility_role(&self) -> Option<FacilityRole> {
        self.facility_role
    }

    pub fn capabilities(&self) -> &BTreeSet<Capability> {
        &self.capabilities
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The normalized inputs this snapshot was compiled from
    pub fn inputs(&self) -> PrincipalInputs {
        PrincipalInputs {
            plan: self.plan,
            mode: self.requested_mode,
            app_role: self.app_role,
            facility_role: self.facility_role,
        }
    }

    /// Compile a fresh snapshot for the same principal under another facility role
    pub fn recompile_with_facility_role(&self, facility_role: Option<FacilityRole>) -> Entitlements {
        compile(self.inputs().with_facility_role(facility_role))
    }
}

/// Compile entitlements from normalized inputs
///
/// Pure and total.
pub fn compile(inputs: PrincipalInputs) -> Entitlements {
    if inputs.app_role == AppRole::Admin {
        return Entitlements {
            plan: inputs.plan,
            mode: inputs.mode,
            requested_mode: inputs.mode,
            app_role: AppRole::Admin,
            facility_role: inputs.facility_role,
            capabilities: all_capabilities().iter().copied().collect(),
            limits: Limits::unlimited(),
        };
    }

    let grant = inputs.plan.resolve();
    let resolution = resolve_mode(inputs.mode, &grant.capabilities);

    Entitlements {
        plan: inputs.plan,
        mode: resolution.mode,
        requested_mode: inputs.mode,
        app_role: AppRole::User,
        facility_role: inputs.facility_role,
        capabilities: grant.capabilities,
        limits: grant.limits,
    }
}

/// Compile entitlements from raw profile values
///
/// Unrecognized or empty values fall back to `free`, `personal`, `user` and
/// no facility role.
pub fn compute(
    plan: &str,
    mode: &str,
    app_role: &str,
    facility_role: Option<&str>,
) -> Entitlements {
    compile(PrincipalInputs::normalize(
        Some(plan),
        Some(mode),
        Some(app_role),
        facility_role,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Limit;

    #[test]
    fn free_user_in_personal_mode() {
        let ent = compute("free", "personal", "user", None);
        assert_eq!(ent.plan(), Plan::Free);
        assert_eq!(ent.mode(), Mode::Personal);
        assert!(!ent.mode_downgraded());
        assert!(!ent.is_admin());
        assert_eq!(ent.capabilities(), &Plan::Free.capabilities());
    }

    #[test]
    fn downgrade_keeps_requested_mode_for_display() {
        let ent = compute("pro", "facility", "user", None);
        assert_eq!(ent.mode(), Mode::Personal);
        assert_eq!(ent.requested_mode(), Mode::Facility);
        assert!(ent.mode_downgraded());
    }

    #[test]
    fn garbage_inputs_fall_back_to_safest_defaults() {
        let ent = compute("platinum", "spaceship", "superuser", Some("GOD"));
        assert_eq!(ent.plan(), Plan::Free);
        assert_eq!(ent.mode(), Mode::Personal);
        assert_eq!(ent.app_role(), AppRole::User);
        assert_eq!(ent.facility_role(), None);
    }

    #[test]
    fn empty_inputs_fall_back_to_safest_defaults() {
        let ent = compute("", "", "", None);
        assert_eq!(ent.inputs(), PrincipalInputs::new(Plan::Free, Mode::Personal));
    }

    #[test]
    fn admin_gets_full_catalog_and_requested_mode() {
        let ent = compute("free", "commercial", "admin", None);
        assert!(ent.is_admin());
        assert_eq!(ent.plan(), Plan::Free);
        assert_eq!(ent.mode(), Mode::Commercial);
        assert_eq!(ent.capabilities().len(), all_capabilities().len());
        assert_eq!(ent.limits().max_paid_courses, Limit::Unlimited);
    }

    #[test]
    fn capabilities_never_exceed_plan() {
        for plan in Plan::ALL {
            for mode in Mode::ALL {
                let ent = compile(PrincipalInputs::new(plan, mode));
                assert!(ent.capabilities().is_subset(&plan.capabilities()));
            }
        }
    }

    #[test]
    fn recompile_replaces_facility_role() {
        let ent = compute("facility", "facility", "user", Some("STAFF"));
        let owner = ent.recompile_with_facility_role(Some(FacilityRole::Owner));
        assert_eq!(owner.facility_role(), Some(FacilityRole::Owner));
        assert_eq!(ent.facility_role(), Some(FacilityRole::Staff));
        assert_eq!(owner.capabilities(), ent.capabilities());
    }

    #[test]
    fn serializes_camel_case() {
        let ent = compute("commercial", "commercial", "user", None);
        let json = serde_json::to_value(&ent).unwrap();
        assert_eq!(json["plan"], "commercial");
        assert_eq!(json["mode"], "commercial");
        assert_eq!(json["appRole"], "user");
        assert!(json["facilityRole"].is_null());
        assert!(
            json["capabilities"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("commercial.offers"))
        );
        assert_eq!(json["limits"]["maxPaidCourses"]["kind"], "capped");
    }
}
