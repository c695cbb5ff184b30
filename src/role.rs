use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The three account roles of the platform.
///
/// Every protected page is owned by exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A household or business requesting pickups
    Customer,
    /// A waste-collection company fulfilling pickups
    Company,
    /// Platform operator
    Admin,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 3] = [Role::Customer, Role::Company, Role::Admin];

    /// Wire name of the role, as stored in the user descriptor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Company => "company",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "customer" => Ok(Role::Customer),
            "company" => Ok(Role::Company),
            "admin" => Ok(Role::Admin),
            other => Err(ConfigError::UnknownRole(other.to_string())),
        }
    }
}
