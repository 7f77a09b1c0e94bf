//! verdant-core: entitlements and capability gating for verdant
//!
//! Given a principal's plan, operating mode, app role and (inside a
//! facility) facility role, this crate decides what the principal may see
//! and do. UI gating and server authorization both go through the same
//! predicate, [`can`].
//!
//! - **Catalog** - [`Capability`] and the closed list of known keys
//! - **Plans** - [`Plan`] base capability sets and [`Limits`]
//! - **Modes** - [`Mode`] and the downgrade rule in [`resolve_mode`]
//! - **Facility roles** - [`FacilityRole`] and the role gate
//! - **Compiler** - [`compile`] / [`compute`] producing [`Entitlements`]
//! - **Membership** - [`MembershipStore`] and [`FacilityScope`] for
//!   server-side facility verification
//! - **Sessions** - [`SessionEntitlements`] for client-side snapshot caching
//!
//! # Quick Start
//!
//! ```
//! use verdant_core::{Capability, compute};
//!
//! let ent = compute("facility", "facility", "user", Some("STAFF"));
//! assert!(ent.can(Capability::FACILITY_DASHBOARD));
//! assert!(!ent.can(Capability::FACILITY_AUDIT));
//! ```
//!
//! # Request flow
//!
//! ```text
//! Authenticated ──► RequestContext ──► FacilityScope ──► handler
//!   (user id)      (profile → ents)   (membership → role)
//! ```

pub mod catalog;
pub mod context;
pub mod entitlements;
pub mod error;
pub mod facility;
pub mod mode;
pub mod plan;

pub use catalog::{
    ALL_CAPABILITIES, CATALOG_VERSION, Capability, Domain, LEGACY_ALIASES, all_capabilities,
    is_known_capability, normalize_key,
};
pub use context::{Authenticated, Profile, RequestContext};
pub use entitlements::{
    AppRole, Entitlements, EntitlementsCache, PrincipalInputs, SessionEntitlements, SessionView,
    can, can_key, compile, compute, require,
};
pub use error::{AccessError, CatalogError, StoreError};
pub use facility::{
    Facility, FacilityMembership, FacilityRole, FacilityScope, MembershipStore,
    MemoryMembershipStore, ScopeStage, allowed_roles, can_in_facility_role, verify_membership,
};
pub use mode::{Mode, ModeResolution, resolve_mode};
pub use plan::{Limit, Limits, Plan, PlanGrant, introduced_in};
