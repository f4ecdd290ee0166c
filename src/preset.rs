//! Per-role default permission bundles

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::perm::{Permission, PermissionSet};
use crate::role::Role;
use crate::scope::DataScope;

// Named bundles, each built on the one below it

const COACH_GRANTS: u64 = Permission::AccessDashboard as u64
    | Permission::AccessMyPirs as u64
    | Permission::AccessGoals as u64
    | Permission::AccessCommunity as u64
    | Permission::AccessCommunication as u64
    | Permission::AccessMeetings as u64
    | Permission::AccessTemplates as u64
    | Permission::AccessCheckins as u64
    | Permission::AccessAlerts as u64
    | Permission::AccessReports as u64
    | Permission::AccessLogs as u64
    | Permission::ActionSendMessage as u64
    | Permission::ActionSendBroadcast as u64
    | Permission::ActionCreateGoal as u64
    | Permission::ActionEditGoal as u64
    | Permission::ActionDeleteGoal as u64
    | Permission::ActionAssignPir as u64
    | Permission::ActionUnassignPir as u64
    | Permission::ActionScheduleMeeting as u64
    | Permission::ActionCancelMeeting as u64
    | Permission::ActionCreateTemplate as u64
    | Permission::ActionEditTemplate as u64
    | Permission::ActionDeleteTemplate as u64
    | Permission::ActionResolveAlert as u64;

const ADMIN_GRANTS: u64 = COACH_GRANTS
    | Permission::AccessUsers as u64
    | Permission::AccessResources as u64
    | Permission::AccessFeedback as u64
    | Permission::ActionCreateResource as u64
    | Permission::ActionDeleteResource as u64
    | Permission::ActionCreatePir as u64
    | Permission::ActionDeletePir as u64
    | Permission::ActionCreateCoach as u64
    | Permission::ActionExportData as u64
    | Permission::ActionImpersonate as u64;

const SUPERADMIN1_GRANTS: u64 = ADMIN_GRANTS
    | Permission::AccessSettings as u64
    | Permission::AccessAuditLogs as u64
    | Permission::ActionModifySettings as u64
    | Permission::ActionViewAuditLogs as u64
    | Permission::ActionCreateAdmin as u64
    | Permission::ActionCreateSuperadmin1 as u64;

/// Fully-populated default bundle for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPreset {
    pub grants: PermissionSet,
    pub scope: DataScope,
}

/// Coach bundle: PIR-facing pages plus the communication, goal,
/// assignment, scheduling and template actions. No user admin, no
/// resources, no settings or audit surface.
pub const COACH: PermissionPreset = PermissionPreset {
    grants: PermissionSet::from_bits(COACH_GRANTS),
    scope: DataScope::AssignedPirs,
};

/// Admin bundle: everything a coach has plus user/resource/feedback
/// pages, PIR and resource lifecycle, coach creation, export and
/// impersonation. Settings and audit stay withheld.
pub const ADMIN: PermissionPreset = PermissionPreset {
    grants: PermissionSet::from_bits(ADMIN_GRANTS),
    scope: DataScope::AllPirsTenant,
};

/// Superadmin1 bundle: the full permission set
pub const SUPERADMIN1: PermissionPreset = PermissionPreset {
    grants: PermissionSet::from_bits(SUPERADMIN1_GRANTS),
    scope: DataScope::AllPirsTenant,
};

/// Minimal restrictive bundle for `pir` and any role without a named
/// bundle: nothing granted, own data only
pub const RESTRICTED: PermissionPreset = PermissionPreset {
    grants: PermissionSet::EMPTY,
    scope: DataScope::OwnData,
};

/// Immutable per-role preset table.
///
/// Construct once and pass by reference; both resolvers read it, nothing
/// mutates it. Tests substitute alternate tables via [`with_preset`]
/// instead of patching globals.
///
/// [`with_preset`]: PresetRegistry::with_preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRegistry {
    presets: [PermissionPreset; 5],
}

impl PresetRegistry {
    /// The production table: named bundles for `coach`, `admin` and
    /// `superadmin1`, the restrictive bundle for everything else.
    pub const fn builtin() -> Self {
        let mut presets = [RESTRICTED; 5];
        presets[Role::Coach.rank() as usize] = COACH;
        presets[Role::Admin.rank() as usize] = ADMIN;
        presets[Role::Superadmin1.rank() as usize] = SUPERADMIN1;
        PresetRegistry { presets }
    }

    /// Copy with the bundle for one role replaced
    pub const fn with_preset(mut self, role: Role, preset: PermissionPreset) -> Self {
        self.presets[role.rank() as usize] = preset;
        self
    }

    /// Default bundle for a role; pure lookup, same value every call
    #[inline]
    pub const fn preset(&self, role: Role) -> &PermissionPreset {
        &self.presets[role.rank() as usize]
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        PresetRegistry::builtin()
    }
}

impl Serialize for PresetRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Role::ALL.len()))?;
        for role in Role::ALL {
            map.serialize_entry(&role, self.preset(role))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PresetRegistry {
    /// A role → preset map; roles not listed get the restrictive bundle
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<Role, PermissionPreset>::deserialize(deserializer)?;
        let mut registry = PresetRegistry {
            presets: [RESTRICTED; 5],
        };
        for (role, preset) in entries {
            registry.presets[role.rank() as usize] = preset;
        }
        Ok(registry)
    }
}
