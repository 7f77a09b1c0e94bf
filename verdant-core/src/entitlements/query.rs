//! The capability predicate every gate goes through

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex};

use super::Entitlements;
use crate::catalog::Capability;
use crate::error::AccessError;
use crate::facility::can_in_facility_role;

/// Most distinct unknown keys remembered per process
pub(crate) const MAX_REPORTED_UNKNOWN_KEYS: usize = 1024;

/// Longest key stored verbatim; longer keys are remembered by their prefix
const MAX_REPORTED_KEY_LEN: usize = 128;

/// Unknown keys already warned about. Diagnostics only, never consulted for
/// an authorization decision.
static REPORTED_UNKNOWN_KEYS: LazyLock<Mutex<UnknownKeyLog>> =
    LazyLock::new(|| Mutex::new(UnknownKeyLog::new(MAX_REPORTED_UNKNOWN_KEYS)));

/// Bounded set of reported keys
///
/// Once full it stops remembering and logs a single saturation warning, so
/// callers cannot grow it or flood the log by sending fresh keys.
#[derive(Debug)]
pub(crate) struct UnknownKeyLog {
    keys: HashSet<String>,
    capacity: usize,
    saturated: bool,
}

impl UnknownKeyLog {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            keys: HashSet::new(),
            capacity,
            saturated: false,
        }
    }

    /// Returns true if a warning was emitted for `key`
    pub(crate) fn report(&mut self, key: &str) -> bool {
        let key = truncate_key(key);
        if self.keys.contains(key) {
            return false;
        }
        if self.keys.len() >= self.capacity {
            if !self.saturated {
                self.saturated = true;
                tracing::warn!(
                    capacity = self.capacity,
                    "unknown capability key reporting saturated, further unknown keys denied silently"
                );
            }
            return false;
        }
        self.keys.insert(key.to_string());
        tracing::warn!(key = %key, "capability key not in catalog, denying");
        true
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub(crate) fn is_saturated(&self) -> bool {
        self.saturated
    }
}

fn truncate_key(key: &str) -> &str {
    if key.len() <= MAX_REPORTED_KEY_LEN {
        return key;
    }
    let mut end = MAX_REPORTED_KEY_LEN;
    while !key.is_char_boundary(end) {
        end -= 1;
    }
    &key[..end]
}

/// Is `capability` allowed for these entitlements?
pub fn can(entitlements: &Entitlements, capability: Capability) -> bool {
    if entitlements.is_admin() {
        return true;
    }
    if !entitlements.capabilities().contains(&capability) {
        return false;
    }
    match capability.as_facility() {
        None => true,
        Some(facility_cap) => can_in_facility_role(facility_cap, entitlements.facility_role()),
    }
}

/// Like [`can`], for a canonical key coming off the wire
///
/// Unknown keys are denied and warned about once per process.
pub fn can_key(entitlements: &Entitlements, key: &str) -> bool {
    match key.parse::<Capability>() {
        Ok(capability) => can(entitlements, capability),
        Err(_) => {
            report_unknown_key(key);
            false
        }
    }
}

/// Returns true the first time `key` is reported
pub(crate) fn report_unknown_key(key: &str) -> bool {
    REPORTED_UNKNOWN_KEYS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .report(key)
}

/// Like [`can`], but explains a denial
///
/// A facility capability the plan grants but the caller's facility role (or
/// lack of one) blocks is `ROLE_NOT_ALLOWED`. Anything the plan or mode does
/// not grant is `CAPABILITY_NOT_GRANTED`.
pub fn require(entitlements: &Entitlements, capability: Capability) -> Result<(), AccessError> {
    if can(entitlements, capability) {
        return Ok(());
    }
    if entitlements.capabilities().contains(&capability) && capability.is_facility() {
        tracing::debug!(
            capability = %capability,
            role = ?entitlements.facility_role(),
            "facility role gate denied capability"
        );
        return Err(AccessError::RoleNotAllowed {
            role: entitlements.facility_role(),
            action: capability.as_str().to_string(),
        });
    }
    tracing::debug!(capability = %capability, plan = %entitlements.plan(), "capability not granted");
    Err(AccessError::CapabilityNotGranted(capability))
}

impl Entitlements {
    /// Shorthand for [`can`]
    pub fn can(&self, capability: Capability) -> bool {
        can(self, capability)
    }

    /// Shorthand for [`can_key`]
    pub fn can_key(&self, key: &str) -> bool {
        can_key(self, key)
    }

    /// Shorthand for [`require`]
    pub fn require(&self, capability: Capability) -> Result<(), AccessError> {
        require(self, capability)
    }

    /// Every capability [`can`] currently allows
    pub fn allowed(&self) -> Vec<Capability> {
        self.capabilities()
            .iter()
            .copied()
            .filter(|cap| can(self, *cap))
            .collect()
    }
}
