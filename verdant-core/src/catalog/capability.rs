//! Capability value type
//!
//! A capability carries its domain as the enum discriminant, so asking
//! whether a key is facility-scoped is a match on the variant rather than a
//! string prefix test.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{CatalogError, Domain};

/// Capabilities in the `courses.*` domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CourseCapability {
    Browse,
    Enroll,
    Create,
    Paid,
    Analytics,
}

/// Capabilities in the `tools.*` domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolCapability {
    Vpd,
    Dli,
    NutrientCalc,
    AiDiagnose,
    Export,
}

/// Capabilities in the `commercial.*` domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommercialCapability {
    Offers,
    Advertising,
    Leads,
    Storefront,
}

/// Capabilities in the `facility.*` domain
///
/// These are only ever exercisable inside a specific facility, by a caller
/// holding a live membership there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacilityCapability {
    Dashboard,
    Tasks,
    Inventory,
    Reports,
    Compliance,
    Audit,
    Sops,
    TaskVerification,
    Members,
    Settings,
}

/// A single entry of the capability catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Courses(CourseCapability),
    Tools(ToolCapability),
    Commercial(CommercialCapability),
    Facility(FacilityCapability),
}

impl Capability {
    pub const COURSES_BROWSE: Self = Self::Courses(CourseCapability::Browse);
    pub const COURSES_ENROLL: Self = Self::Courses(CourseCapability::Enroll);
    pub const COURSES_CREATE: Self = Self::Courses(CourseCapability::Create);
    pub const COURSES_PAID: Self = Self::Courses(CourseCapability::Paid);
    pub const COURSES_ANALYTICS: Self = Self::Courses(CourseCapability::Analytics);

    pub const TOOLS_VPD: Self = Self::Tools(ToolCapability::Vpd);
    pub const TOOLS_DLI: Self = Self::Tools(ToolCapability::Dli);
    pub const TOOLS_NUTRIENT_CALC: Self = Self::Tools(ToolCapability::NutrientCalc);
    pub const TOOLS_AI_DIAGNOSE: Self = Self::Tools(ToolCapability::AiDiagnose);
    pub const TOOLS_EXPORT: Self = Self::Tools(ToolCapability::Export);

    pub const COMMERCIAL_OFFERS: Self = Self::Commercial(CommercialCapability::Offers);
    pub const COMMERCIAL_ADVERTISING: Self = Self::Commercial(CommercialCapability::Advertising);
    pub const COMMERCIAL_LEADS: Self = Self::Commercial(CommercialCapability::Leads);
    pub const COMMERCIAL_STOREFRONT: Self = Self::Commercial(CommercialCapability::Storefront);

    pub const FACILITY_DASHBOARD: Self = Self::Facility(FacilityCapability::Dashboard);
    pub const FACILITY_TASKS: Self = Self::Facility(FacilityCapability::Tasks);
    pub const FACILITY_INVENTORY: Self = Self::Facility(FacilityCapability::Inventory);
    pub const FACILITY_REPORTS: Self = Self::Facility(FacilityCapability::Reports);
    pub const FACILITY_COMPLIANCE: Self = Self::Facility(FacilityCapability::Compliance);
    pub const FACILITY_AUDIT: Self = Self::Facility(FacilityCapability::Audit);
    pub const FACILITY_SOPS: Self = Self::Facility(FacilityCapability::Sops);
    pub const FACILITY_TASK_VERIFICATION: Self =
        Self::Facility(FacilityCapability::TaskVerification);
    pub const FACILITY_MEMBERS: Self = Self::Facility(FacilityCapability::Members);
    pub const FACILITY_SETTINGS: Self = Self::Facility(FacilityCapability::Settings);

    /// The domain this capability belongs to
    pub fn domain(&self) -> Domain {
        match self {
            Capability::Courses(_) => Domain::Courses,
            Capability::Tools(_) => Domain::Tools,
            Capability::Commercial(_) => Domain::Commercial,
            Capability::Facility(_) => Domain::Facility,
        }
    }

    /// Returns true for capabilities that require a facility context
    pub fn is_facility(&self) -> bool {
        matches!(self, Capability::Facility(_))
    }

    /// The facility-scoped part of this capability, if any
    pub fn as_facility(&self) -> Option<FacilityCapability> {
        match self {
            Capability::Facility(cap) => Some(*cap),
            _ => None,
        }
    }

    /// Canonical catalog key, e.g. `"facility.compliance"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Courses(cap) => match cap {
                CourseCapability::Browse => "courses.browse",
                CourseCapability::Enroll => "courses.enroll",
                CourseCapability::Create => "courses.create",
                CourseCapability::Paid => "courses.paid",
                CourseCapability::Analytics => "courses.analytics",
            },
            Capability::Tools(cap) => match cap {
                ToolCapability::Vpd => "tools.vpd",
                ToolCapability::Dli => "tools.dli",
                ToolCapability::NutrientCalc => "tools.nutrient_calc",
                ToolCapability::AiDiagnose => "tools.ai_diagnose",
                ToolCapability::Export => "tools.export",
            },
            Capability::Commercial(cap) => match cap {
                CommercialCapability::Offers => "commercial.offers",
                CommercialCapability::Advertising => "commercial.advertising",
                CommercialCapability::Leads => "commercial.leads",
                CommercialCapability::Storefront => "commercial.storefront",
            },
            Capability::Facility(cap) => match cap {
                FacilityCapability::Dashboard => "facility.dashboard",
                FacilityCapability::Tasks => "facility.tasks",
                FacilityCapability::Inventory => "facility.inventory",
                FacilityCapability::Reports => "facility.reports",
                FacilityCapability::Compliance => "facility.compliance",
                FacilityCapability::Audit => "facility.audit",
                FacilityCapability::Sops => "facility.sops",
                FacilityCapability::TaskVerification => "facility.task_verification",
                FacilityCapability::Members => "facility.members",
                FacilityCapability::Settings => "facility.settings",
            },
        }
    }
}

impl From<FacilityCapability> for Capability {
    fn from(cap: FacilityCapability) -> Self {
        Capability::Facility(cap)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses canonical keys only. Legacy spellings go through
/// [`normalize_key`](super::normalize_key).
impl FromStr for Capability {
    type Err = CatalogError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        super::ALL_CAPABILITIES
            .iter()
            .find(|cap| cap.as_str() == key)
            .copied()
            .ok_or_else(|| CatalogError::UnknownCapability(key.to_string()))
    }
}

impl Serialize for Capability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}
