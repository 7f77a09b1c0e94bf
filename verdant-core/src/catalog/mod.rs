//! The closed set of capabilities the system recognizes
//!
//! This is the only place capabilities are declared. Everything else names
//! them through the associated constants on [`Capability`].

mod alias;
mod capability;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub use alias::{LEGACY_ALIASES, normalize_key};
pub use capability::{
    Capability, CommercialCapability, CourseCapability, FacilityCapability, ToolCapability,
};

/// Bumped whenever a capability is added, removed or renamed
pub const CATALOG_VERSION: u32 = 3;

/// Every capability in the catalog, grouped by domain
pub const ALL_CAPABILITIES: [Capability; 24] = [
    Capability::COURSES_BROWSE,
    Capability::COURSES_ENROLL,
    Capability::COURSES_CREATE,
    Capability::COURSES_PAID,
    Capability::COURSES_ANALYTICS,
    Capability::TOOLS_VPD,
    Capability::TOOLS_DLI,
    Capability::TOOLS_NUTRIENT_CALC,
    Capability::TOOLS_AI_DIAGNOSE,
    Capability::TOOLS_EXPORT,
    Capability::COMMERCIAL_OFFERS,
    Capability::COMMERCIAL_ADVERTISING,
    Capability::COMMERCIAL_LEADS,
    Capability::COMMERCIAL_STOREFRONT,
    Capability::FACILITY_DASHBOARD,
    Capability::FACILITY_TASKS,
    Capability::FACILITY_INVENTORY,
    Capability::FACILITY_REPORTS,
    Capability::FACILITY_COMPLIANCE,
    Capability::FACILITY_AUDIT,
    Capability::FACILITY_SOPS,
    Capability::FACILITY_TASK_VERIFICATION,
    Capability::FACILITY_MEMBERS,
    Capability::FACILITY_SETTINGS,
];

/// Capability domain, the prefix before the first `.` of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Courses,
    Tools,
    Commercial,
    Facility,
}

impl Domain {
    /// Key prefix for this domain (without the trailing dot)
    pub fn prefix(&self) -> &'static str {
        match self {
            Domain::Courses => "courses",
            Domain::Tools => "tools",
            Domain::Commercial => "commercial",
            Domain::Facility => "facility",
        }
    }
}

/// Returns true if `key` is a canonical catalog key
pub fn is_known_capability(key: &str) -> bool {
    key.parse::<Capability>().is_ok()
}

/// All catalog entries, used to grant admins everything
pub fn all_capabilities() -> &'static [Capability] {
    &ALL_CAPABILITIES
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        let keys: HashSet<&str> = ALL_CAPABILITIES.iter().map(|c| c.as_str()).collect();
        assert_eq!(keys.len(), ALL_CAPABILITIES.len());
    }

    #[test]
    fn every_catalog_entry_is_known() {
        for cap in all_capabilities() {
            assert!(is_known_capability(cap.as_str()));
        }
    }

    #[test]
    fn unknown_keys_are_not_known() {
        assert!(!is_known_capability("facility.teleport"));
        assert!(!is_known_capability(""));
        assert!(!is_known_capability("FACILITY.AUDIT"));
        assert!(!is_known_capability("canUseVpd"));
    }

    #[test]
    fn catalog_covers_all_domains() {
        let domains: HashSet<Domain> = ALL_CAPABILITIES.iter().map(|c| c.domain()).collect();
        assert_eq!(domains.len(), 4);
    }
}
