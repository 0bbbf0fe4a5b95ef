// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types.
//!
//! Authorization is permission-based: an operation names the permission it
//! needs and asks a [`PermissionGate`] whether the caller holds it.

use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// Named permissions checked by the reference-data workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Manage countries and their states/provinces.
    ManageCountries,
}

impl Permission {
    /// Returns the stable system name of this permission.
    #[must_use]
    pub const fn system_name(self) -> &'static str {
        match self {
            Self::ManageCountries => "ManageCountries",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.system_name())
    }
}

/// Boolean authorization check keyed by a named permission.
pub trait PermissionGate {
    /// Returns whether the caller holds `permission`.
    fn authorize(&self, permission: Permission) -> bool;
}

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Administrators hold every permission.
    Admin,
    /// Guests hold no permissions. They may still use ungated lookups.
    Guest,
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "guest" => Ok(Self::Guest),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}'"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

impl PermissionGate for AuthenticatedActor {
    fn authorize(&self, _permission: Permission) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Guest => false,
        }
    }
}

/// Checks `permission` against `gate`, naming `action` in the error.
///
/// # Errors
///
/// Returns [`AuthError::Unauthorized`] if the gate denies the permission.
pub fn require_permission(
    gate: &impl PermissionGate,
    permission: Permission,
    action: &str,
) -> Result<(), AuthError> {
    if gate.authorize(permission) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            permission: permission.system_name().to_string(),
        })
    }
}

/// Stub authentication: accepts any non-empty actor ID.
///
/// Real authentication is provided by the hosting application.
///
/// # Errors
///
/// Returns an error if the actor ID is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
