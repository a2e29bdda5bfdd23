//! Strongly-typed identifiers used across the platform.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identity of an authenticated principal (landlord, PMC, tenant or admin).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(Uuid);

/// Identifier of a portfolio (a landlord's or PMC's grouping of properties).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioId(Uuid);

/// Identifier of a property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(Uuid);

/// Identifier of a rentable unit within a property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(Uuid);

/// Identifier of a property-management company.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PmcId(Uuid);

/// Identifier of a landlord.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandlordId(Uuid);

/// Identifier of a tenant (the person renting, not the SaaS org).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(Uuid);

/// Identifier of a lease.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaseId(Uuid);

/// Identifier of a maintenance request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaintenanceId(Uuid);

/// Identifier of an uploaded document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

/// Identifier of a property expense.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

/// Identifier of a rent payment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(PrincipalId, "PrincipalId");
impl_uuid_newtype!(PortfolioId, "PortfolioId");
impl_uuid_newtype!(PropertyId, "PropertyId");
impl_uuid_newtype!(UnitId, "UnitId");
impl_uuid_newtype!(PmcId, "PmcId");
impl_uuid_newtype!(LandlordId, "LandlordId");
impl_uuid_newtype!(TenantId, "TenantId");
impl_uuid_newtype!(LeaseId, "LeaseId");
impl_uuid_newtype!(MaintenanceId, "MaintenanceId");
impl_uuid_newtype!(DocumentId, "DocumentId");
impl_uuid_newtype!(ExpenseId, "ExpenseId");
impl_uuid_newtype!(PaymentId, "PaymentId");

// A tenant's identity doubles as their principal identity: a principal with
// role `tenant` authenticates with the same underlying UUID as their tenant
// record. These conversions keep that link explicit instead of comparing
// raw UUIDs at call sites.
impl From<PrincipalId> for TenantId {
    fn from(value: PrincipalId) -> Self {
        Self(value.0)
    }
}

impl From<PrincipalId> for LandlordId {
    fn from(value: PrincipalId) -> Self {
        Self(value.0)
    }
}

impl From<PrincipalId> for PmcId {
    fn from(value: PrincipalId) -> Self {
        Self(value.0)
    }
}
