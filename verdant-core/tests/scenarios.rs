//! End-to-end authorization scenarios

use verdant_core::{
    Authenticated, Capability, Facility, FacilityRole, FacilityScope, MemoryMembershipStore,
    Mode, Profile, RequestContext, can, compute,
};

#[test]
fn free_user_requesting_commercial_mode() {
    let ent = compute("free", "commercial", "user", None);
    assert_eq!(ent.mode(), Mode::Personal);
    assert!(!can(&ent, Capability::COMMERCIAL_OFFERS));
}

#[test]
fn facility_owner_and_staff_audit_access() {
    let owner = compute("facility", "facility", "user", Some("OWNER"));
    assert!(can(&owner, Capability::FACILITY_AUDIT));

    let staff = compute("facility", "facility", "user", Some("STAFF"));
    assert!(!can(&staff, Capability::FACILITY_AUDIT));
    assert!(can(&staff, Capability::FACILITY_DASHBOARD));
}

#[tokio::test]
async fn removed_membership_is_denied() {
    let store = MemoryMembershipStore::new();
    store
        .add_facility(Facility {
            id: "fac1".into(),
            name: None,
        })
        .await;
    store.upsert_member("fac1", "u1", FacilityRole::Owner).await;
    store.soft_delete_member("fac1", "u1").await;

    let ctx = RequestContext::resolve(
        Authenticated::new("u1"),
        &Profile::new("facility", "facility").with_facility("fac1", "OWNER"),
    );
    let err = FacilityScope::require(&ctx, Some("fac1"), &store)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FACILITY_ACCESS_DENIED");
}

#[tokio::test]
async fn seeded_directory_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("directory.toml");
    std::fs::write(
        &path,
        r#"
[[facilities]]
id = "fac1"

[[facilities.members]]
user_id = "auditor"
role = "AUDITOR"
"#,
    )
    .unwrap();

    let store = MemoryMembershipStore::load(&path).unwrap();
    let ctx = RequestContext::resolve(
        Authenticated::new("auditor"),
        &Profile::new("facility", "facility"),
    );
    let scope = FacilityScope::require(&ctx, Some("fac1"), &store)
        .await
        .unwrap();

    assert_eq!(scope.facility_role(), FacilityRole::Auditor);
    assert!(scope.can(Capability::FACILITY_COMPLIANCE));
    assert!(!scope.can(Capability::FACILITY_SOPS));
}
