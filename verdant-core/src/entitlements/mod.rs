//! Compiling and querying entitlements snapshots

mod compile;
mod query;
mod session;

pub use compile::{AppRole, Entitlements, PrincipalInputs, compile, compute};
pub use query::{can, can_key, require};
pub use session::{EntitlementsCache, SessionEntitlements, SessionView};
