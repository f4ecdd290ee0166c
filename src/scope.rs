//! Data scopes and their query-filter boundary

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::error::ParseError;

/// Breadth of data an actor's queries may span.
///
/// Declared narrowest to widest so the derived ordering matches the
/// breadth convention. The ordering is informational only; the resolvers
/// never consult it. The query layer honors it when translating a scope
/// into filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataScope {
    /// Records the actor owns
    OwnData,
    /// PIRs assigned to the actor
    AssignedPirs,
    /// Every PIR in the actor's tenant
    AllPirsTenant,
    /// No tenant boundary
    AllTenants,
}

impl DataScope {
    /// Canonical wire name
    pub const fn name(self) -> &'static str {
        match self {
            DataScope::OwnData => "own_data",
            DataScope::AssignedPirs => "assigned_pirs",
            DataScope::AllPirsTenant => "all_pirs_tenant",
            DataScope::AllTenants => "all_tenants",
        }
    }

    /// Describe the document filter this scope implies for an actor.
    ///
    /// Query construction stays with the caller; this type is the
    /// interface boundary only.
    pub fn filter(self, actor: &Actor) -> ScopeFilter<'_> {
        match self {
            DataScope::AllTenants => ScopeFilter::Unrestricted,
            DataScope::AllPirsTenant => ScopeFilter::Tenant {
                tenant_id: &actor.tenant_id,
            },
            DataScope::AssignedPirs => ScopeFilter::AssignedTo {
                coach_id: &actor.id,
            },
            DataScope::OwnData => ScopeFilter::Owner {
                actor_id: &actor.id,
            },
        }
    }
}

impl fmt::Display for DataScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataScope {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "own_data" => Ok(DataScope::OwnData),
            "assigned_pirs" => Ok(DataScope::AssignedPirs),
            "all_pirs_tenant" => Ok(DataScope::AllPirsTenant),
            "all_tenants" => Ok(DataScope::AllTenants),
            _ => Err(ParseError::UnknownScope(s.to_string())),
        }
    }
}

/// Document filter implied by a resolved scope.
///
/// Borrowed from the actor snapshot the scope was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter<'a> {
    /// No tenant filter
    Unrestricted,
    /// Filter by tenant id only
    Tenant { tenant_id: &'a str },
    /// Filter by assigned coach == actor id
    AssignedTo { coach_id: &'a str },
    /// Filter by record owner == actor id
    Owner { actor_id: &'a str },
}
