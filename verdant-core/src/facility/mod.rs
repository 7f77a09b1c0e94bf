//! Facility roles, memberships and facility-scoped request verification

mod membership;
mod role;
mod scope;

pub use membership::{
    DirectorySeed, Facility, FacilityMembership, FacilitySeed, MemberSeed, MembershipStore,
    MemoryMembershipStore,
};
pub use role::{FacilityRole, allowed_roles, can_in_facility_role};
pub use scope::{FacilityScope, ScopeStage, verify_membership};
