//! Principal model: who is making the request.
//!
//! Authentication happens upstream; this layer receives an already-verified
//! `(PrincipalId, Role)` pair and treats it as immutable for the request
//! lifetime.

use serde::{Deserialize, Serialize};

use crate::id::PrincipalId;

/// Role of an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator (unrestricted visibility).
    Admin,
    /// Property owner.
    Landlord,
    /// Property-management company acting on behalf of landlords.
    Pmc,
    /// Person renting a unit.
    Tenant,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Landlord => "landlord",
            Role::Pmc => "pmc",
            Role::Tenant => "tenant",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated actor.
///
/// Construction is intentionally decoupled from transport: the API layer
/// derives this from verified session claims before touching any scoped data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    pub role: Role,
}

impl Principal {
    pub fn new(id: PrincipalId, role: Role) -> Self {
        Self { id, role }
    }
}
