//! Staff role hierarchy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Staff/operator roles, declared least to most privileged.
///
/// Rank is informational (reporting, comparisons). Permission and scope
/// decisions are driven by bypass + presets, never by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Person in recovery, the coached end user
    Pir,
    Coach,
    Admin,
    Superadmin1,
    Superadmin,
}

impl Role {
    /// All roles in ascending rank order
    pub const ALL: [Role; 5] = [
        Role::Pir,
        Role::Coach,
        Role::Admin,
        Role::Superadmin1,
        Role::Superadmin,
    ];

    /// Position in the hierarchy, strictly increasing with privilege
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            Role::Pir => 0,
            Role::Coach => 1,
            Role::Admin => 2,
            Role::Superadmin1 => 3,
            Role::Superadmin => 4,
        }
    }

    #[inline]
    pub const fn is_at_least(self, other: Role) -> bool {
        self.rank() >= other.rank()
    }

    /// Canonical wire name
    pub const fn name(self) -> &'static str {
        match self {
            Role::Pir => "pir",
            Role::Coach => "coach",
            Role::Admin => "admin",
            Role::Superadmin1 => "superadmin1",
            Role::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pir" => Ok(Role::Pir),
            "coach" => Ok(Role::Coach),
            "admin" => Ok(Role::Admin),
            "superadmin1" => Ok(Role::Superadmin1),
            "superadmin" => Ok(Role::Superadmin),
            _ => Err(ParseError::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_total_and_strictly_increasing() {
        for pair in Role::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn is_at_least_matches_rank() {
        assert!(Role::Superadmin.is_at_least(Role::Pir));
        assert!(Role::Coach.is_at_least(Role::Coach));
        assert!(!Role::Coach.is_at_least(Role::Admin));
    }

    #[test]
    fn names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.name().parse::<Role>(), Ok(role));
        }
        assert!("root".parse::<Role>().is_err());
    }
}
