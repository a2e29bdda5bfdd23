//! Maintenance-request read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentfold_core::{LandlordId, MaintenanceId, PropertyId, TenantId, UnitId};

/// Maintenance request status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Open,
    InProgress,
    Resolved,
}

/// A maintenance request raised against a property (optionally a unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: MaintenanceId,
    pub property_id: PropertyId,
    pub unit_id: Option<UnitId>,
    pub landlord_id: LandlordId,
    /// Tenant who reported the issue, when reported through the portal.
    pub reported_by: Option<TenantId>,
    pub summary: String,
    pub status: MaintenanceStatus,
    pub opened_at: DateTime<Utc>,
}
