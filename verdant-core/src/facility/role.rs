//! Facility roles and the per-role gate on facility capabilities

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::FacilityCapability;

/// A caller's role inside one specific facility
///
/// Roles are never global; they are always looked up for a
/// (user, facility) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityRole {
    Owner,
    Manager,
    Staff,
    Viewer,
    /// Read and audit access for compliance reviewers
    Auditor,
}

const MANAGERS: &[FacilityRole] = &[FacilityRole::Owner, FacilityRole::Manager];
const OVERSIGHT: &[FacilityRole] = &[
    FacilityRole::Owner,
    FacilityRole::Manager,
    FacilityRole::Auditor,
];
const OWNER_ONLY: &[FacilityRole] = &[FacilityRole::Owner];

impl FacilityRole {
    pub const ALL: [FacilityRole; 5] = [
        FacilityRole::Owner,
        FacilityRole::Manager,
        FacilityRole::Staff,
        FacilityRole::Viewer,
        FacilityRole::Auditor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityRole::Owner => "OWNER",
            FacilityRole::Manager => "MANAGER",
            FacilityRole::Staff => "STAFF",
            FacilityRole::Viewer => "VIEWER",
            FacilityRole::Auditor => "AUDITOR",
        }
    }

    pub fn parse(raw: &str) -> Option<FacilityRole> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "OWNER" => Some(FacilityRole::Owner),
            "MANAGER" => Some(FacilityRole::Manager),
            "STAFF" => Some(FacilityRole::Staff),
            "VIEWER" => Some(FacilityRole::Viewer),
            "AUDITOR" => Some(FacilityRole::Auditor),
            _ => None,
        }
    }

    /// Parse an optional role; unrecognized values mean no facility context
    pub fn normalize(raw: Option<&str>) -> Option<FacilityRole> {
        let value = raw?.trim();
        if value.is_empty() {
            return None;
        }
        let role = FacilityRole::parse(value);
        if role.is_none() {
            tracing::warn!(role = %value, "unrecognized facility role, ignoring");
        }
        role
    }
}

impl fmt::Display for FacilityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles allowed to exercise `capability`, or `None` if any member may
pub fn allowed_roles(capability: FacilityCapability) -> Option<&'static [FacilityRole]> {
    match capability {
        FacilityCapability::Sops
        | FacilityCapability::TaskVerification
        | FacilityCapability::Members => Some(MANAGERS),
        FacilityCapability::Compliance | FacilityCapability::Audit => Some(OVERSIGHT),
        FacilityCapability::Settings => Some(OWNER_ONLY),
        FacilityCapability::Dashboard
        | FacilityCapability::Tasks
        | FacilityCapability::Inventory
        | FacilityCapability::Reports => None,
    }
}

/// Facility role gate
///
/// Always false without a role, even for role-unrestricted capabilities.
pub fn can_in_facility_role(capability: FacilityCapability, role: Option<FacilityRole>) -> bool {
    let Some(role) = role else {
        return false;
    };
    match allowed_roles(capability) {
        Some(roles) => roles.contains(&role),
        None => true,
    }
}
