//! Permission vocabulary and bitmask sets
//!
//! The permission set is closed at build time: every page and action flag
//! is one bit in a `u64`, so a bundle is a single mask and "missing key"
//! is not a representable state.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Page-access and action permissions, one bit each.
///
/// Wire names partition into two namespaces: `access_*` (page visibility)
/// and `action_*` (operation allowance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum Permission {
    // Pages
    AccessDashboard = 1,
    AccessMyPirs = 1 << 1,
    AccessUsers = 1 << 2,
    AccessGoals = 1 << 3,
    AccessCommunity = 1 << 4,
    AccessCommunication = 1 << 5,
    AccessMeetings = 1 << 6,
    AccessTemplates = 1 << 7,
    AccessCheckins = 1 << 8,
    AccessAlerts = 1 << 9,
    AccessReports = 1 << 10,
    AccessLogs = 1 << 11,
    AccessResources = 1 << 12,
    AccessFeedback = 1 << 13,
    AccessSettings = 1 << 14,
    AccessAuditLogs = 1 << 15,

    // Actions
    ActionSendMessage = 1 << 16,
    ActionSendBroadcast = 1 << 17,
    ActionCreateGoal = 1 << 18,
    ActionEditGoal = 1 << 19,
    ActionDeleteGoal = 1 << 20,
    ActionAssignPir = 1 << 21,
    ActionUnassignPir = 1 << 22,
    ActionScheduleMeeting = 1 << 23,
    ActionCancelMeeting = 1 << 24,
    ActionCreateTemplate = 1 << 25,
    ActionEditTemplate = 1 << 26,
    ActionDeleteTemplate = 1 << 27,
    ActionResolveAlert = 1 << 28,
    ActionCreateResource = 1 << 29,
    ActionDeleteResource = 1 << 30,
    ActionCreatePir = 1 << 31,
    ActionDeletePir = 1 << 32,
    ActionCreateCoach = 1 << 33,
    ActionCreateAdmin = 1 << 34,
    ActionCreateSuperadmin1 = 1 << 35,
    ActionExportData = 1 << 36,
    ActionImpersonate = 1 << 37,
    ActionModifySettings = 1 << 38,
    ActionViewAuditLogs = 1 << 39,
}

/// Wire names, parallel to `Permission::ALL` (both follow bit order)
const NAMES: [&str; Permission::COUNT] = [
    "access_dashboard",
    "access_my_pirs",
    "access_users",
    "access_goals",
    "access_community",
    "access_communication",
    "access_meetings",
    "access_templates",
    "access_checkins",
    "access_alerts",
    "access_reports",
    "access_logs",
    "access_resources",
    "access_feedback",
    "access_settings",
    "access_audit_logs",
    "action_send_message",
    "action_send_broadcast",
    "action_create_goal",
    "action_edit_goal",
    "action_delete_goal",
    "action_assign_pir",
    "action_unassign_pir",
    "action_schedule_meeting",
    "action_cancel_meeting",
    "action_create_template",
    "action_edit_template",
    "action_delete_template",
    "action_resolve_alert",
    "action_create_resource",
    "action_delete_resource",
    "action_create_pir",
    "action_delete_pir",
    "action_create_coach",
    "action_create_admin",
    "action_create_superadmin1",
    "action_export_data",
    "action_impersonate",
    "action_modify_settings",
    "action_view_audit_logs",
];

impl Permission {
    /// Number of permissions in the closed set
    pub const COUNT: usize = 40;

    /// All permissions in bit order
    pub const ALL: [Permission; Permission::COUNT] = [
        Permission::AccessDashboard,
        Permission::AccessMyPirs,
        Permission::AccessUsers,
        Permission::AccessGoals,
        Permission::AccessCommunity,
        Permission::AccessCommunication,
        Permission::AccessMeetings,
        Permission::AccessTemplates,
        Permission::AccessCheckins,
        Permission::AccessAlerts,
        Permission::AccessReports,
        Permission::AccessLogs,
        Permission::AccessResources,
        Permission::AccessFeedback,
        Permission::AccessSettings,
        Permission::AccessAuditLogs,
        Permission::ActionSendMessage,
        Permission::ActionSendBroadcast,
        Permission::ActionCreateGoal,
        Permission::ActionEditGoal,
        Permission::ActionDeleteGoal,
        Permission::ActionAssignPir,
        Permission::ActionUnassignPir,
        Permission::ActionScheduleMeeting,
        Permission::ActionCancelMeeting,
        Permission::ActionCreateTemplate,
        Permission::ActionEditTemplate,
        Permission::ActionDeleteTemplate,
        Permission::ActionResolveAlert,
        Permission::ActionCreateResource,
        Permission::ActionDeleteResource,
        Permission::ActionCreatePir,
        Permission::ActionDeletePir,
        Permission::ActionCreateCoach,
        Permission::ActionCreateAdmin,
        Permission::ActionCreateSuperadmin1,
        Permission::ActionExportData,
        Permission::ActionImpersonate,
        Permission::ActionModifySettings,
        Permission::ActionViewAuditLogs,
    ];

    /// The permission's bit in a mask
    #[inline]
    pub const fn bit(self) -> u64 {
        self as u64
    }

    /// Page-visibility namespace (`access_*`)
    #[inline]
    pub const fn is_page(self) -> bool {
        (self as u64) < (1 << 16)
    }

    /// Operation namespace (`action_*`)
    #[inline]
    pub const fn is_action(self) -> bool {
        !self.is_page()
    }

    /// Canonical wire name, e.g. `access_users`
    #[inline]
    pub fn name(self) -> &'static str {
        NAMES[(self as u64).trailing_zeros() as usize]
    }

    /// Look up a permission by wire name
    pub fn from_name(name: &str) -> Option<Permission> {
        NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Permission::ALL[i])
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Permission {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::from_name(s).ok_or_else(|| ParseError::UnknownPermission(s.to_string()))
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NameVisitor;

        impl Visitor<'_> for NameVisitor {
            type Value = Permission;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a permission wire name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Permission, E> {
                Permission::from_name(v)
                    .ok_or_else(|| E::custom(ParseError::UnknownPermission(v.to_string())))
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}

/// A set of permissions as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet(u64);

impl PermissionSet {
    /// No permissions
    pub const EMPTY: PermissionSet = PermissionSet(0);

    /// Every permission bit
    pub const ALL: PermissionSet = PermissionSet((1 << Permission::COUNT) - 1);

    /// Create from a raw bitmask
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        PermissionSet(bits)
    }

    /// Raw bitmask value
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Check if a permission is in the set
    #[inline]
    pub const fn contains(self, perm: Permission) -> bool {
        self.0 & perm.bit() != 0
    }

    /// Check if every member of `other` is in the set
    #[inline]
    pub const fn contains_all(self, other: PermissionSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Copy with a permission added
    #[inline]
    pub const fn with(self, perm: Permission) -> Self {
        PermissionSet(self.0 | perm.bit())
    }

    /// Copy with a permission removed
    #[inline]
    pub const fn without(self, perm: Permission) -> Self {
        PermissionSet(self.0 & !perm.bit())
    }

    /// Union of two sets
    #[inline]
    pub const fn union(self, other: PermissionSet) -> Self {
        PermissionSet(self.0 | other.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of permissions in the set
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn insert(&mut self, perm: Permission) {
        self.0 |= perm.bit();
    }

    pub fn remove(&mut self, perm: Permission) {
        self.0 &= !perm.bit();
    }

    /// Iterate set members in bit order
    pub fn iter(self) -> impl Iterator<Item = Permission> {
        Permission::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl BitOr for PermissionSet {
    type Output = PermissionSet;

    fn bitor(self, rhs: PermissionSet) -> PermissionSet {
        self.union(rhs)
    }
}

impl BitOrAssign for PermissionSet {
    fn bitor_assign(&mut self, rhs: PermissionSet) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = PermissionSet::EMPTY;
        for p in iter {
            set.insert(p);
        }
        set
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for perm in self.iter() {
            seq.serialize_element(&perm)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = PermissionSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of permission wire names")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PermissionSet, A::Error> {
                let mut set = PermissionSet::EMPTY;
                while let Some(perm) = seq.next_element::<Permission>()? {
                    set.insert(perm);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_table_parallels_bit_order() {
        for perm in Permission::ALL {
            assert_eq!(Permission::from_name(perm.name()), Some(perm));
        }
    }

    #[test]
    fn bits_are_distinct_and_dense() {
        let all: PermissionSet = Permission::ALL.into_iter().collect();
        assert_eq!(all.len(), Permission::COUNT);
        assert_eq!(all, PermissionSet::ALL);
    }

    #[test]
    fn namespaces_partition() {
        for perm in Permission::ALL {
            let name = perm.name();
            if perm.is_page() {
                assert!(name.starts_with("access_"), "{name}");
            } else {
                assert!(perm.is_action());
                assert!(name.starts_with("action_"), "{name}");
            }
        }
    }

    #[test]
    fn unknown_name_is_a_parse_error() {
        assert_eq!(Permission::from_name("access_nonexistent"), None);
        assert!("access_nonexistent".parse::<Permission>().is_err());
    }

    #[test]
    fn set_ops() {
        let mut set = PermissionSet::EMPTY.with(Permission::AccessUsers);
        assert!(set.contains(Permission::AccessUsers));
        assert!(!set.contains(Permission::AccessGoals));

        set.insert(Permission::AccessGoals);
        assert_eq!(set.len(), 2);

        set.remove(Permission::AccessUsers);
        assert!(!set.contains(Permission::AccessUsers));

        let union = set | PermissionSet::EMPTY.with(Permission::ActionExportData);
        assert!(union.contains_all(set));
        assert!(union.contains(Permission::ActionExportData));
    }
}
