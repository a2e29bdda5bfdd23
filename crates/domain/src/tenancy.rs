//! Tenant and lease read models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentfold_core::{LandlordId, LeaseId, PropertyId, TenantId, UnitId};

/// A tenant identity record.
///
/// A tenant's record id equals their principal id (see
/// `rentfold_core::id` conversions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    pub id: TenantId,
    pub display_name: String,
    pub email: Option<String>,
}

/// Lease status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    Active,
    Ended,
}

/// A lease binding one or more tenants to a unit.
///
/// `property_id` and `landlord_id` are denormalized from the unit's parent
/// property; co-tenant and containment rules read them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseRecord {
    pub id: LeaseId,
    pub unit_id: UnitId,
    pub property_id: PropertyId,
    pub landlord_id: LandlordId,
    pub tenant_ids: Vec<TenantId>,
    pub status: LeaseStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl LeaseRecord {
    pub fn is_active(&self) -> bool {
        self.status == LeaseStatus::Active
    }

    pub fn has_tenant(&self, tenant: TenantId) -> bool {
        self.tenant_ids.contains(&tenant)
    }
}
