//! Request middleware, applied in this order:
//!
//! 1. [`authenticate`] attaches `Authenticated` and `Profile`
//! 2. [`resolve_context`] turns them into a `RequestContext`
//! 3. [`require_facility_scope`] verifies membership and attaches a `FacilityScope`

mod auth;
mod context;
mod facility;

pub use auth::{authenticate, bearer_token};
pub use context::resolve_context;
pub use facility::{FACILITY_ID_HEADER, FACILITY_ID_QUERY, require_facility_scope, resolve_facility_id};
