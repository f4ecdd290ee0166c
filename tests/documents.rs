//! Inline document format for actor records and preset tables

use scopegate::preset::RESTRICTED;
use scopegate::{
    AccessEngine, Actor, DataScope, Permission, PresetRegistry, Role, UserPermissionOverrides,
};
use serde_json::json;

#[test]
fn test_actor_document_camel_case_fields() {
    let doc = json!({
        "id": "u-42",
        "role": "coach",
        "tenantId": "tenant-a",
        "assignedCoach": "coach-7",
        "permissions": {
            "access_resources": true,
            "action_export_data": false,
            "scope": "all_pirs_tenant"
        }
    });
    let actor: Actor = serde_json::from_value(doc).unwrap();

    assert_eq!(actor.id, "u-42");
    assert_eq!(actor.role, Role::Coach);
    assert_eq!(actor.tenant_id, "tenant-a");
    assert_eq!(actor.assigned_coach.as_deref(), Some("coach-7"));

    let overrides = actor.permissions.unwrap();
    assert!(overrides.grants.contains(Permission::AccessResources));
    // A key stored as false is not granted
    assert!(!overrides.grants.contains(Permission::ActionExportData));
    assert_eq!(overrides.scope, Some(DataScope::AllPirsTenant));
}

#[test]
fn test_actor_document_minimal_fields() {
    let doc = json!({"id": "u-1", "role": "pir", "tenantId": "tenant-a"});
    let actor: Actor = serde_json::from_value(doc).unwrap();

    assert!(actor.permissions.is_none());
    assert!(actor.assigned_coach.is_none());
}

#[test]
fn test_parsed_document_drives_the_resolver() {
    let engine = AccessEngine::new();
    let actor: Actor = serde_json::from_value(json!({
        "id": "u-42",
        "role": "coach",
        "tenantId": "tenant-a",
        "permissions": {"access_resources": true}
    }))
    .unwrap();

    // The override object replaces the coach preset wholesale
    assert!(engine.has_permission(Some(&actor), Permission::AccessResources));
    assert!(!engine.has_permission(Some(&actor), Permission::AccessGoals));
    // No scope in the object: preset scope still applies
    assert_eq!(engine.data_scope(Some(&actor)), DataScope::AssignedPirs);
}

#[test]
fn test_stale_override_keys_are_skipped() {
    let overrides: UserPermissionOverrides = serde_json::from_value(json!({
        "access_legacy_reports": true,
        "access_users": true,
        "scope": null
    }))
    .unwrap();

    assert!(overrides.grants.contains(Permission::AccessUsers));
    assert_eq!(overrides.grants.len(), 1);
    assert_eq!(overrides.scope, None);
}

#[test]
fn test_false_and_missing_keys_are_equivalent() {
    let explicit: UserPermissionOverrides =
        serde_json::from_value(json!({"access_users": false})).unwrap();
    let absent: UserPermissionOverrides = serde_json::from_value(json!({})).unwrap();

    assert_eq!(explicit, absent);
    assert!(explicit.grants.is_empty());
}

#[test]
fn test_null_flag_values_are_not_grants() {
    let overrides: UserPermissionOverrides =
        serde_json::from_value(json!({"access_users": null})).unwrap();

    assert!(overrides.grants.is_empty());
}

#[test]
fn test_actor_round_trip() {
    let actor: Actor = serde_json::from_value(json!({
        "id": "u-42",
        "role": "admin",
        "tenantId": "tenant-a",
        "permissions": {"access_settings": true, "scope": "own_data"}
    }))
    .unwrap();

    let encoded = serde_json::to_value(&actor).unwrap();
    assert_eq!(encoded["tenantId"], "tenant-a");
    assert_eq!(encoded["permissions"]["access_settings"], true);
    assert_eq!(encoded["permissions"]["scope"], "own_data");

    let decoded: Actor = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, actor);
}

#[test]
fn test_registry_from_document() {
    let registry: PresetRegistry = serde_json::from_value(json!({
        "coach": {"grants": ["access_dashboard", "access_my_pirs"], "scope": "assigned_pirs"}
    }))
    .unwrap();

    let coach = registry.preset(Role::Coach);
    assert!(coach.grants.contains(Permission::AccessDashboard));
    assert!(coach.grants.contains(Permission::AccessMyPirs));
    assert!(!coach.grants.contains(Permission::AccessGoals));
    assert_eq!(coach.scope, DataScope::AssignedPirs);

    // Roles the document does not list get the restrictive bundle
    assert_eq!(*registry.preset(Role::Admin), RESTRICTED);
    assert_eq!(*registry.preset(Role::Pir), RESTRICTED);
}

#[test]
fn test_registry_rejects_unknown_grant_names() {
    let result: Result<PresetRegistry, _> = serde_json::from_value(json!({
        "coach": {"grants": ["access_nonexistent"], "scope": "assigned_pirs"}
    }));

    assert!(result.is_err());
}

#[test]
fn test_wire_names() {
    assert_eq!(serde_json::to_value(Role::Superadmin1).unwrap(), "superadmin1");
    assert_eq!(serde_json::to_value(DataScope::AllPirsTenant).unwrap(), "all_pirs_tenant");
    assert_eq!(
        serde_json::to_value(Permission::ActionViewAuditLogs).unwrap(),
        "action_view_audit_logs"
    );

    let role: Role = serde_json::from_value(json!("superadmin")).unwrap();
    assert_eq!(role, Role::Superadmin);
}
