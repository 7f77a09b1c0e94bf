//! Subscription plans, their base capability sets and numeric limits

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{ALL_CAPABILITIES, Capability, Domain};

/// Billing tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Free,
    Pro,
    CreatorPlus,
    Commercial,
    Facility,
}

impl Plan {
    /// All plans in tier order
    pub const ALL: [Plan; 5] = [
        Plan::Free,
        Plan::Pro,
        Plan::CreatorPlus,
        Plan::Commercial,
        Plan::Facility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::CreatorPlus => "creator_plus",
            Plan::Commercial => "commercial",
            Plan::Facility => "facility",
        }
    }

    /// Parse a plan name, accepting the spellings clients have used over time
    pub fn parse(raw: &str) -> Option<Plan> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Plan::Free),
            "pro" => Some(Plan::Pro),
            "creator_plus" | "creator-plus" | "creatorplus" => Some(Plan::CreatorPlus),
            "commercial" => Some(Plan::Commercial),
            "facility" => Some(Plan::Facility),
            _ => None,
        }
    }

    /// Parse a plan name, falling back to [`Plan::Free`]
    ///
    /// Never fails. An unrecognized value is logged and treated as free.
    pub fn normalize(raw: Option<&str>) -> Plan {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            None => Plan::Free,
            Some(value) => Plan::parse(value).unwrap_or_else(|| {
                tracing::warn!(plan = %value, "unrecognized plan, falling back to free");
                Plan::Free
            }),
        }
    }

    /// Returns true if this plan grants `capability`
    pub fn grants(&self, capability: Capability) -> bool {
        introduced_in(capability) <= *self
    }

    /// Base capability set for this plan
    pub fn capabilities(&self) -> BTreeSet<Capability> {
        ALL_CAPABILITIES
            .iter()
            .copied()
            .filter(|cap| self.grants(*cap))
            .collect()
    }

    /// Numeric ceilings for this plan
    pub fn limits(&self) -> Limits {
        match self {
            Plan::Free => Limits {
                max_paid_courses: Limit::Capped(0),
                max_lessons_per_course: Limit::Capped(0),
                max_active_grows: Limit::Capped(3),
            },
            Plan::Pro => Limits {
                max_paid_courses: Limit::Capped(0),
                max_lessons_per_course: Limit::Capped(0),
                max_active_grows: Limit::Capped(25),
            },
            Plan::CreatorPlus => Limits {
                max_paid_courses: Limit::Capped(10),
                max_lessons_per_course: Limit::Capped(50),
                max_active_grows: Limit::Unlimited,
            },
            Plan::Commercial => Limits {
                max_paid_courses: Limit::Capped(50),
                max_lessons_per_course: Limit::Capped(200),
                max_active_grows: Limit::Unlimited,
            },
            Plan::Facility => Limits::unlimited(),
        }
    }

    /// Resolve this plan to its base grant
    pub fn resolve(&self) -> PlanGrant {
        PlanGrant {
            capabilities: self.capabilities(),
            limits: self.limits(),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lowest plan that grants `capability`
///
/// Every plan at or above this tier grants it too, which is what keeps plan
/// capability sets monotonic.
pub fn introduced_in(capability: Capability) -> Plan {
    match capability {
        Capability::COURSES_BROWSE
        | Capability::COURSES_ENROLL
        | Capability::TOOLS_VPD
        | Capability::TOOLS_DLI => Plan::Free,
        Capability::TOOLS_NUTRIENT_CALC | Capability::TOOLS_AI_DIAGNOSE | Capability::TOOLS_EXPORT => {
            Plan::Pro
        }
        Capability::COURSES_CREATE | Capability::COURSES_PAID | Capability::COURSES_ANALYTICS => {
            Plan::CreatorPlus
        }
        cap if cap.domain() == Domain::Commercial => Plan::Commercial,
        _ => Plan::Facility,
    }
}

/// Output of plan resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanGrant {
    pub capabilities: BTreeSet<Capability>,
    pub limits: Limits,
}

/// A numeric ceiling
///
/// `Capped(0)` means no access. `Unlimited` is its own variant so the two can
/// never be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Limit {
    Unlimited,
    Capped(u32),
}

impl Limit {
    /// Interpret a nullable ceiling from a legacy payload (`null` = unlimited)
    pub fn from_nullable(value: Option<u32>) -> Limit {
        match value {
            None => Limit::Unlimited,
            Some(n) => Limit::Capped(n),
        }
    }

    /// Returns true if holding `count` items stays within this limit
    pub fn allows(&self, count: u32) -> bool {
        match self {
            Limit::Unlimited => true,
            Limit::Capped(max) => count <= *max,
        }
    }

    /// How many more items fit, `None` when unlimited
    pub fn remaining(&self, used: u32) -> Option<u32> {
        match self {
            Limit::Unlimited => None,
            Limit::Capped(max) => Some(max.saturating_sub(used)),
        }
    }

    /// Returns true if this limit is at least as generous as `other`
    pub fn covers(&self, other: &Limit) -> bool {
        match (self, other) {
            (Limit::Unlimited, _) => true,
            (Limit::Capped(_), Limit::Unlimited) => false,
            (Limit::Capped(a), Limit::Capped(b)) => a >= b,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Unlimited => f.write_str("unlimited"),
            Limit::Capped(n) => write!(f, "{}", n),
        }
    }
}

/// Numeric ceilings carried on an entitlements snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    pub max_paid_courses: Limit,
    pub max_lessons_per_course: Limit,
    pub max_active_grows: Limit,
}

impl Limits {
    pub fn unlimited() -> Self {
        Self {
            max_paid_courses: Limit::Unlimited,
            max_lessons_per_course: Limit::Unlimited,
            max_active_grows: Limit::Unlimited,
        }
    }

    /// Returns true if every ceiling here is at least as generous as in `other`
    pub fn covers(&self, other: &Limits) -> bool {
        self.max_paid_courses.covers(&other.max_paid_courses)
            && self
                .max_lessons_per_course
                .covers(&other.max_lessons_per_course)
            && self.max_active_grows.covers(&other.max_active_grows)
    }
}
