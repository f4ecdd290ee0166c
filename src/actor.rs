//! Actor records and per-user permission overrides
//!
//! Actors are created by the identity/session layer and consumed here,
//! never owned or mutated. Overrides are stored inline on the actor's own
//! document in the user/staff collection as a map of permission wire names
//! to booleans plus an optional `scope` key.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::perm::{Permission, PermissionSet};
use crate::role::Role;
use crate::scope::DataScope;

/// Authenticated staff/operator identity, one snapshot per call.
///
/// The engine decides only for the snapshot it is given; freshness after
/// a permission change elsewhere is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub role: Role,
    pub tenant_id: String,
    /// Per-actor deviations from the role preset, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<UserPermissionOverrides>,
    /// Coach this actor reports to, for PIR records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_coach: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role, tenant_id: impl Into<String>) -> Self {
        Actor {
            id: id.into(),
            role,
            tenant_id: tenant_id.into(),
            permissions: None,
            assigned_coach: None,
        }
    }

    /// Copy with explicit overrides attached
    pub fn with_overrides(mut self, overrides: UserPermissionOverrides) -> Self {
        self.permissions = Some(overrides);
        self
    }
}

/// Sparse per-actor deviation from the role preset.
///
/// When present, the grant set fully replaces preset lookup for
/// permission checks; keys stored as `false` and absent keys are
/// equivalent. The scope field, when set, overrides the preset scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserPermissionOverrides {
    pub grants: PermissionSet,
    pub scope: Option<DataScope>,
}

impl UserPermissionOverrides {
    pub const fn new(grants: PermissionSet) -> Self {
        UserPermissionOverrides {
            grants,
            scope: None,
        }
    }

    pub const fn with_scope(mut self, scope: DataScope) -> Self {
        self.scope = Some(scope);
        self
    }
}

impl Serialize for UserPermissionOverrides {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.grants.len() + usize::from(self.scope.is_some());
        let mut map = serializer.serialize_map(Some(entries))?;
        for perm in self.grants.iter() {
            map.serialize_entry(perm.name(), &true)?;
        }
        if let Some(scope) = self.scope {
            map.serialize_entry("scope", &scope)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UserPermissionOverrides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OverridesVisitor;

        impl<'de> Visitor<'de> for OverridesVisitor {
            type Value = UserPermissionOverrides;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of permission flags with an optional scope")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<UserPermissionOverrides, A::Error> {
                let mut grants = PermissionSet::EMPTY;
                let mut scope = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "scope" {
                        scope = map.next_value::<Option<DataScope>>()?;
                        continue;
                    }
                    match Permission::from_name(&key) {
                        Some(perm) => {
                            // false and missing are equivalent
                            if map.next_value::<Option<bool>>()? == Some(true) {
                                grants.insert(perm);
                            }
                        }
                        // Stale keys in stored documents are skipped; the
                        // closed enum cannot represent them
                        None => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(UserPermissionOverrides { grants, scope })
            }
        }

        deserializer.deserialize_map(OverridesVisitor)
    }
}
