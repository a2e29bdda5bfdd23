//! Document read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentfold_core::{DocumentId, LandlordId, PropertyId, TenantId};

/// An uploaded document (lease agreement, ID verification, inspection
/// report, ...).
///
/// Documents attach to a property, to an owning tenant, or both: a tenant's
/// identity document has no property; an inspection report has no owner
/// tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub property_id: Option<PropertyId>,
    pub landlord_id: Option<LandlordId>,
    /// Tenant who owns the document (uploader for tenant-submitted docs).
    pub owner_tenant_id: Option<TenantId>,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}
