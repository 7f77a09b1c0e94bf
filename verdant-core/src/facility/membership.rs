//! Facility membership records and where they are looked up

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::FacilityRole;
use crate::error::StoreError;

/// A user's role in one facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityMembership {
    pub facility_id: String,
    pub user_id: String,
    pub role: FacilityRole,
    /// Set when the membership was removed; removed memberships grant nothing
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FacilityMembership {
    pub fn new(
        facility_id: impl Into<String>,
        user_id: impl Into<String>,
        role: FacilityRole,
    ) -> Self {
        Self {
            facility_id: facility_id.into(),
            user_id: user_id.into(),
            role,
            deleted_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A facility known to the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Source of truth for facility membership
///
/// Implementations must read current state on every call. Callers rely on
/// this to see role changes and removals on the very next request.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Returns true if the facility exists
    async fn facility_exists(&self, facility_id: &str) -> Result<bool, StoreError>;

    /// The membership record for a (facility, user) pair, including removed ones
    async fn membership(
        &self,
        facility_id: &str,
        user_id: &str,
    ) -> Result<Option<FacilityMembership>, StoreError>;
}

/// Seed file layout for [`MemoryMembershipStore`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub facilities: Vec<FacilitySeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FacilitySeed {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberSeed {
    pub user_id: String,
    pub role: String,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// In-memory membership store
#[derive(Debug, Default)]
pub struct MemoryMembershipStore {
    facilities: RwLock<HashMap<String, Facility>>,
    memberships: RwLock<HashMap<(String, String), FacilityMembership>>,
}

impl MemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a parsed seed
    ///
    /// Rejects unknown role names rather than guessing.
    pub fn from_seed(seed: DirectorySeed) -> Result<Self, StoreError> {
        let mut facilities = HashMap::new();
        let mut memberships = HashMap::new();

        for facility in seed.facilities {
            for member in facility.members {
                let role = FacilityRole::parse(&member.role).ok_or_else(|| {
                    StoreError::InvalidEntry(format!(
                        "facility {} member {}: unknown role {}",
                        facility.id, member.user_id, member.role
                    ))
                })?;
                let membership = FacilityMembership {
                    facility_id: facility.id.clone(),
                    user_id: member.user_id.clone(),
                    role,
                    deleted_at: member.deleted_at,
                };
                memberships.insert((facility.id.clone(), member.user_id), membership);
            }
            facilities.insert(
                facility.id.clone(),
                Facility {
                    id: facility.id,
                    name: facility.name,
                },
            );
        }

        tracing::debug!(
            facilities = facilities.len(),
            memberships = memberships.len(),
            "loaded facility directory"
        );

        Ok(Self {
            facilities: RwLock::new(facilities),
            memberships: RwLock::new(memberships),
        })
    }

    /// Parse a TOML seed
    pub fn from_toml(contents: &str) -> Result<Self, StoreError> {
        let seed: DirectorySeed = toml::from_str(contents)?;
        Self::from_seed(seed)
    }

    /// Load a TOML seed file
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub async fn add_facility(&self, facility: Facility) {
        self.facilities
            .write()
            .await
            .insert(facility.id.clone(), facility);
    }

    /// Insert or replace a membership, reviving it if it was removed
    pub async fn upsert_member(&self, facility_id: &str, user_id: &str, role: FacilityRole) {
        let membership = FacilityMembership::new(facility_id, user_id, role);
        self.memberships
            .write()
            .await
            .insert((facility_id.to_string(), user_id.to_string()), membership);
    }

    /// Mark a membership removed. Returns false if there was no live membership.
    pub async fn soft_delete_member(&self, facility_id: &str, user_id: &str) -> bool {
        let mut memberships = self.memberships.write().await;
        match memberships.get_mut(&(facility_id.to_string(), user_id.to_string())) {
            Some(membership) if membership.is_active() => {
                membership.deleted_at = Some(Utc::now());
                true
            }
            _ => false,
        }
    }

    pub async fn facility_count(&self) -> usize {
        self.facilities.read().await.len()
    }
}

#[async_trait]
impl MembershipStore for MemoryMembershipStore {
    async fn facility_exists(&self, facility_id: &str) -> Result<bool, StoreError> {
        Ok(self.facilities.read().await.contains_key(facility_id))
    }

    async fn membership(
        &self,
        facility_id: &str,
        user_id: &str,
    ) -> Result<Option<FacilityMembership>, StoreError> {
        Ok(self
            .memberships
            .read()
            .await
            .get(&(facility_id.to_string(), user_id.to_string()))
            .cloned())
    }
}
