//! Operating modes and the rule that keeps them consistent with the plan

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Capability;

/// Which shell of the app the session is operating in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Personal,
    Commercial,
    Facility,
}

const COMMERCIAL_REQUIRES: &[Capability] = &[
    Capability::COMMERCIAL_OFFERS,
    Capability::COMMERCIAL_ADVERTISING,
    Capability::COMMERCIAL_LEADS,
];

const FACILITY_REQUIRES: &[Capability] =
    &[Capability::FACILITY_DASHBOARD, Capability::FACILITY_TASKS];

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Personal, Mode::Commercial, Mode::Facility];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Personal => "personal",
            Mode::Commercial => "commercial",
            Mode::Facility => "facility",
        }
    }

    pub fn parse(raw: &str) -> Option<Mode> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "personal" => Some(Mode::Personal),
            "commercial" => Some(Mode::Commercial),
            "facility" => Some(Mode::Facility),
            _ => None,
        }
    }

    /// Parse a mode, falling back to [`Mode::Personal`]
    pub fn normalize(raw: Option<&str>) -> Mode {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            None => Mode::Personal,
            Some(value) => Mode::parse(value).unwrap_or_else(|| {
                tracing::warn!(mode = %value, "unrecognized mode, falling back to personal");
                Mode::Personal
            }),
        }
    }

    /// Capabilities a plan must grant before this mode may be entered
    pub fn required_capabilities(&self) -> &'static [Capability] {
        match self {
            Mode::Personal => &[],
            Mode::Commercial => COMMERCIAL_REQUIRES,
            Mode::Facility => FACILITY_REQUIRES,
        }
    }

    /// Returns true if `capabilities` is a superset of this mode's requirements
    pub fn is_satisfied_by(&self, capabilities: &BTreeSet<Capability>) -> bool {
        self.required_capabilities()
            .iter()
            .all(|cap| capabilities.contains(cap))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking a requested mode against a capability set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeResolution {
    /// The mode the session actually runs in
    pub mode: Mode,
    /// The requested mode, when it had to be degraded
    pub downgraded_from: Option<Mode>,
}

/// Degrade `requested` to personal unless `capabilities` covers it
///
/// Capabilities are never touched. Personal has no requirements, so the
/// result is always a valid mode.
pub fn resolve_mode(requested: Mode, capabilities: &BTreeSet<Capability>) -> ModeResolution {
    if requested.is_satisfied_by(capabilities) {
        return ModeResolution {
            mode: requested,
            downgraded_from: None,
        };
    }

    tracing::debug!(requested = %requested, "mode not covered by plan, downgrading to personal");
    ModeResolution {
        mode: Mode::Personal,
        downgraded_from: Some(requested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Plan;

    #[test]
    fn personal_always_valid() {
        let empty = BTreeSet::new();
        let resolution = resolve_mode(Mode::Personal, &empty);
        assert_eq!(resolution.mode, Mode::Personal);
        assert!(resolution.downgraded_from.is_none());
    }

    #[test]
    fn commercial_downgrades_on_free() {
        let resolution = resolve_mode(Mode::Commercial, &Plan::Free.capabilities());
        assert_eq!(resolution.mode, Mode::Personal);
        assert_eq!(resolution.downgraded_from, Some(Mode::Commercial));
    }

    #[test]
    fn commercial_kept_on_commercial_plan() {
        let resolution = resolve_mode(Mode::Commercial, &Plan::Commercial.capabilities());
        assert_eq!(resolution.mode, Mode::Commercial);
    }

    #[test]
    fn facility_mode_needs_facility_plan() {
        let on_commercial = resolve_mode(Mode::Facility, &Plan::Commercial.capabilities());
        assert_eq!(on_commercial.mode, Mode::Personal);

        let on_facility = resolve_mode(Mode::Facility, &Plan::Facility.capabilities());
        assert_eq!(on_facility.mode, Mode::Facility);
    }

    #[test]
    fn partial_requirements_downgrade() {
        let caps: BTreeSet<Capability> =
            [Capability::COMMERCIAL_OFFERS, Capability::COMMERCIAL_LEADS].into();
        assert_eq!(resolve_mode(Mode::Commercial, &caps).mode, Mode::Personal);
    }

    #[test]
    fn resolution_never_changes_capabilities() {
        let caps = Plan::Free.capabilities();
        let before = caps.clone();
        let _ = resolve_mode(Mode::Facility, &caps);
        assert_eq!(caps, before);
    }

    #[test]
    fn unknown_mode_normalizes_to_personal() {
        assert_eq!(Mode::normalize(Some("warehouse")), Mode::Personal);
        assert_eq!(Mode::normalize(None), Mode::Personal);
        assert_eq!(Mode::normalize(Some("Commercial")), Mode::Commercial);
    }
}
