//! Client-side snapshot cache
//!
//! A session holds at most one compiled snapshot. It is replaced whole when
//! any input changes and dropped when the session is invalidated. Nothing is
//! persisted, so a cold start always begins not-ready.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::Serialize;

use super::{Entitlements, PrincipalInputs, compile, query};
use crate::catalog::{Capability, normalize_key};
use crate::context::Profile;
use crate::facility::FacilityRole;
use crate::mode::Mode;
use crate::plan::Plan;

/// Memoizes compiled snapshots by their inputs
#[derive(Debug, Default)]
pub struct EntitlementsCache {
    entries: HashMap<PrincipalInputs, Arc<Entitlements>>,
}

impl EntitlementsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compile(&mut self, inputs: PrincipalInputs) -> Arc<Entitlements> {
        Arc::clone(
            self.entries
                .entry(inputs)
                .or_insert_with(|| Arc::new(compile(inputs))),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    facility_id: Option<String>,
    entitlements: Arc<Entitlements>,
}

/// The accessor UI gating reads from
///
/// While not ready every query answers "denied".
#[derive(Debug, Default)]
pub struct SessionEntitlements {
    cache: EntitlementsCache,
    current: Option<Snapshot>,
}

impl SessionEntitlements {
    /// A session that has not fetched its profile yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with one compiled from a freshly fetched profile
    ///
    /// A facility role without a facility id is ignored.
    pub fn apply(&mut self, profile: &Profile) -> Arc<Entitlements> {
        let facility_id = profile
            .facility_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let mut inputs = profile.inputs();
        if facility_id.is_none() && inputs.facility_role.is_some() {
            tracing::debug!("facility role without facility id, ignoring role");
            inputs.facility_role = None;
        }

        let entitlements = self.cache.get_or_compile(inputs);
        self.current = Some(Snapshot {
            facility_id,
            entitlements: Arc::clone(&entitlements),
        });
        entitlements
    }

    /// Drop the snapshot, e.g. on token change, logout or facility switch
    pub fn invalidate(&mut self) {
        self.current = None;
        self.cache.clear();
    }

    pub fn ready(&self) -> bool {
        self.current.is_some()
    }

    pub fn plan(&self) -> Option<Plan> {
        self.entitlements().map(|e| e.plan())
    }

    pub fn mode(&self) -> Option<Mode> {
        self.entitlements().map(|e| e.mode())
    }

    pub fn facility_id(&self) -> Option<&str> {
        self.current.as_ref()?.facility_id.as_deref()
    }

    pub fn facility_role(&self) -> Option<FacilityRole> {
        self.entitlements()?.facility_role()
    }

    /// Capabilities granted by the snapshot; empty while not ready
    pub fn capabilities(&self) -> BTreeSet<Capability> {
        self.entitlements()
            .map(|e| e.capabilities().clone())
            .unwrap_or_default()
    }

    pub fn entitlements(&self) -> Option<&Arc<Entitlements>> {
        self.current.as_ref().map(|s| &s.entitlements)
    }

    /// Gate on a canonical key or a legacy alias
    pub fn can(&self, key: &str) -> bool {
        let Some(entitlements) = self.entitlements() else {
            return false;
        };
        match normalize_key(key) {
            Some(capability) => query::can(entitlements, capability),
            None => {
                query::report_unknown_key(key);
                false
            }
        }
    }

    /// Serializable view of the accessor state
    pub fn view(&self) -> SessionView {
        SessionView {
            ready: self.ready(),
            plan: self.plan(),
            mode: self.mode(),
            facility_id: self.facility_id().map(str::to_string),
            facility_role: self.facility_role(),
            capabilities: self
                .entitlements()
                .map(|e| e.allowed())
                .unwrap_or_default(),
        }
    }
}

/// What the UI layer sees
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub ready: bool,
    pub plan: Option<Plan>,
    pub mode: Option<Mode>,
    pub facility_id: Option<String>,
    pub facility_role: Option<FacilityRole>,
    pub capabilities: Vec<Capability>,
}
