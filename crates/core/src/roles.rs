//! Caller roles and the role-set gate applied to every endpoint.
//!
//! Role names are the lowercase strings carried in bearer tokens and in the
//! configured user list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_OPERATOR: &str = "operator";
pub const ROLE_VIEWER: &str = "viewer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
    Viewer,
}

/// Roles allowed on read-only endpoints.
pub const READ_ROLES: &[Role] = &[Role::Admin, Role::Operator, Role::Viewer];

/// Roles allowed to create or update assets and assignments.
pub const WRITE_ROLES: &[Role] = &[Role::Admin, Role::Operator];

/// Roles allowed to hard-delete records.
pub const DELETE_ROLES: &[Role] = &[Role::Admin];

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Operator => ROLE_OPERATOR,
            Role::Viewer => ROLE_VIEWER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_OPERATOR => Ok(Role::Operator),
            ROLE_VIEWER => Ok(Role::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Reject `role` with [`CoreError::Forbidden`] unless it is in `allowed`.
pub fn check_role(role: Role, allowed: &[Role]) -> Result<(), CoreError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role '{role}' is not permitted for this operation"
        )))
    }
}
