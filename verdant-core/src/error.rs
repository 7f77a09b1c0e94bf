//! Error types for verdant-core

use thiserror::Error;

use crate::catalog::Capability;
use crate::facility::FacilityRole;

/// Authorization failures surfaced at the request boundary
///
/// Each variant has a stable [`code`](AccessError::code) that clients
/// branch on.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("authentication required")]
    AuthRequired,

    #[error("facility id required for this route")]
    FacilityIdRequired,

    #[error("facility not found: {0}")]
    FacilityNotFound(String),

    #[error("no active membership in facility {0}")]
    FacilityAccessDenied(String),

    #[error("facility role {} not allowed to {action}", role_label(.role))]
    RoleNotAllowed {
        role: Option<FacilityRole>,
        action: String,
    },

    #[error("capability not granted: {0}")]
    CapabilityNotGranted(Capability),

    #[error("membership lookup failed: {0}")]
    Store(#[from] StoreError),
}

impl AccessError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AccessError::AuthRequired => "AUTH_REQUIRED",
            AccessError::FacilityIdRequired => "FACILITY_ID_REQUIRED",
            AccessError::FacilityNotFound(_) => "FACILITY_NOT_FOUND",
            AccessError::FacilityAccessDenied(_) => "FACILITY_ACCESS_DENIED",
            AccessError::RoleNotAllowed { .. } => "ROLE_NOT_ALLOWED",
            AccessError::CapabilityNotGranted(_) => "CAPABILITY_NOT_GRANTED",
            AccessError::Store(_) => "MEMBERSHIP_LOOKUP_FAILED",
        }
    }
}

fn role_label(role: &Option<FacilityRole>) -> &'static str {
    role.as_ref().map(FacilityRole::as_str).unwrap_or("(none)")
}

/// Errors from the capability catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown capability: {0}")]
    UnknownCapability(String),
}

/// Errors from a membership store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("membership store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed file: {0}")]
    Seed(#[from] toml::de::Error),

    #[error("invalid seed entry: {0}")]
    InvalidEntry(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_error_codes_are_stable() {
        assert_eq!(AccessError::AuthRequired.code(), "AUTH_REQUIRED");
        assert_eq!(AccessError::FacilityIdRequired.code(), "FACILITY_ID_REQUIRED");
        assert_eq!(
            AccessError::FacilityNotFound("fac1".into()).code(),
            "FACILITY_NOT_FOUND"
        );
        assert_eq!(
            AccessError::FacilityAccessDenied("fac1".into()).code(),
            "FACILITY_ACCESS_DENIED"
        );
        assert_eq!(
            AccessError::RoleNotAllowed {
                role: Some(FacilityRole::Staff),
                action: "facility.sops".into()
            }
            .code(),
            "ROLE_NOT_ALLOWED"
        );
    }

    #[test]
    fn role_not_allowed_displays_role() {
        let err = AccessError::RoleNotAllowed {
            role: Some(FacilityRole::Staff),
            action: "facility.sops".into(),
        };
        assert_eq!(err.to_string(), "facility role STAFF not allowed to facility.sops");

        let err = AccessError::RoleNotAllowed {
            role: None,
            action: "facility.audit".into(),
        };
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn capability_not_granted_displays_key() {
        let err = AccessError::CapabilityNotGranted(Capability::COMMERCIAL_OFFERS);
        assert_eq!(err.to_string(), "capability not granted: commercial.offers");
    }

    #[test]
    fn access_error_converts_from_store_error() {
        let err: AccessError = StoreError::Unavailable("db down".into()).into();
        assert!(matches!(err, AccessError::Store(_)));
        assert_eq!(err.code(), "MEMBERSHIP_LOOKUP_FAILED");
    }
}
