//! Legacy key spellings
//!
//! Older clients gate on camelCase flags such as `canUseCompliance`. These are
//! translated to catalog entries at the boundary; the canonical key is the
//! only thing ever sent back over the wire.

use super::Capability;

/// Legacy camelCase flag names and the catalog entry each one stands for
pub const LEGACY_ALIASES: &[(&str, Capability)] = &[
    ("canBrowseCourses", Capability::COURSES_BROWSE),
    ("canEnrollCourses", Capability::COURSES_ENROLL),
    ("canCreateCourses", Capability::COURSES_CREATE),
    ("canSellCourses", Capability::COURSES_PAID),
    ("canViewCourseAnalytics", Capability::COURSES_ANALYTICS),
    ("canUseVpd", Capability::TOOLS_VPD),
    ("canUseDli", Capability::TOOLS_DLI),
    ("canUseNutrientCalc", Capability::TOOLS_NUTRIENT_CALC),
    ("canUseAiDiagnose", Capability::TOOLS_AI_DIAGNOSE),
    ("canExport", Capability::TOOLS_EXPORT),
    ("canPostOffers", Capability::COMMERCIAL_OFFERS),
    ("canAdvertise", Capability::COMMERCIAL_ADVERTISING),
    ("canViewLeads", Capability::COMMERCIAL_LEADS),
    ("canUseStorefront", Capability::COMMERCIAL_STOREFRONT),
    ("canViewFacilityDashboard", Capability::FACILITY_DASHBOARD),
    ("canManageTasks", Capability::FACILITY_TASKS),
    ("canManageInventory", Capability::FACILITY_INVENTORY),
    ("canViewReports", Capability::FACILITY_REPORTS),
    ("canUseCompliance", Capability::FACILITY_COMPLIANCE),
    ("canAudit", Capability::FACILITY_AUDIT),
    ("canManageSops", Capability::FACILITY_SOPS),
    ("canVerifyTasks", Capability::FACILITY_TASK_VERIFICATION),
    ("canManageMembers", Capability::FACILITY_MEMBERS),
    ("canManageFacility", Capability::FACILITY_SETTINGS),
];

/// Resolve a canonical key or a legacy alias to a catalog entry
///
/// Returns `None` for anything else. Callers that authorize must treat
/// `None` as denied.
pub fn normalize_key(key: &str) -> Option<Capability> {
    let key = key.trim();
    if let Ok(cap) = key.parse() {
        return Some(cap);
    }
    LEGACY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, cap)| *cap)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn canonical_keys_pass_through() {
        assert_eq!(normalize_key("tools.vpd"), Some(Capability::TOOLS_VPD));
        assert_eq!(
            normalize_key(" facility.audit "),
            Some(Capability::FACILITY_AUDIT)
        );
    }

    #[test]
    fn legacy_aliases_resolve_to_canonical() {
        let cap = normalize_key("canUseCompliance").unwrap();
        assert_eq!(cap.as_str(), "facility.compliance");
    }

    #[test]
    fn unknown_keys_resolve_to_none() {
        assert_eq!(normalize_key("canFly"), None);
        assert_eq!(normalize_key("facility.teleport"), None);
    }

    #[test]
    fn aliases_never_collide_with_catalog_keys() {
        for (alias, _) in LEGACY_ALIASES {
            assert!(!super::super::is_known_capability(alias));
        }
    }

    #[test]
    fn aliases_are_unique() {
        let names: HashSet<&str> = LEGACY_ALIASES.iter().map(|(a, _)| *a).collect();
        assert_eq!(names.len(), LEGACY_ALIASES.len());
    }
}
