//! Per-resource predicate leaves.
//!
//! One leaf enum per resource kind, matched against that kind's read model.
//! Isolation filters are built from exactly these leaves, so every condition
//! a scoped query can express is enumerated here — there is no stringly
//! typed field path to get wrong.

use serde::{Deserialize, Serialize};

use rentfold_core::{
    DocumentId, ExpenseId, LandlordId, LeaseId, MaintenanceId, PaymentId, PortfolioId, PropertyId,
    TenantId, UnitId,
};
use rentfold_domain::{
    DocumentRecord, ExpenseRecord, LeaseRecord, LeaseStatus, MaintenanceRecord, PropertyRecord,
    RentPaymentRecord, TenantRecord, UnitRecord,
};

use crate::predicate::LeafMatch;

/// Conditions on properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyLeaf {
    IdIn(Vec<PropertyId>),
    PortfolioIn(Vec<PortfolioId>),
    LandlordIn(Vec<LandlordId>),
}

impl LeafMatch<PropertyRecord> for PropertyLeaf {
    fn matches(&self, record: &PropertyRecord) -> bool {
        match self {
            PropertyLeaf::IdIn(ids) => ids.contains(&record.id),
            PropertyLeaf::PortfolioIn(ids) => {
                record.portfolio_id.is_some_and(|p| ids.contains(&p))
            }
            PropertyLeaf::LandlordIn(ids) => ids.contains(&record.landlord_id),
        }
    }
}

/// Conditions on units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitLeaf {
    IdIn(Vec<UnitId>),
    PropertyIn(Vec<PropertyId>),
    LandlordIn(Vec<LandlordId>),
}

impl LeafMatch<UnitRecord> for UnitLeaf {
    fn matches(&self, record: &UnitRecord) -> bool {
        match self {
            UnitLeaf::IdIn(ids) => ids.contains(&record.id),
            UnitLeaf::PropertyIn(ids) => ids.contains(&record.property_id),
            UnitLeaf::LandlordIn(ids) => ids.contains(&record.landlord_id),
        }
    }
}

/// Conditions on tenant identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantLeaf {
    IdIn(Vec<TenantId>),
}

impl LeafMatch<TenantRecord> for TenantLeaf {
    fn matches(&self, record: &TenantRecord) -> bool {
        match self {
            TenantLeaf::IdIn(ids) => ids.contains(&record.id),
        }
    }
}

/// Conditions on maintenance requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceLeaf {
    IdIn(Vec<MaintenanceId>),
    PropertyIn(Vec<PropertyId>),
    LandlordIn(Vec<LandlordId>),
    ReportedBy(TenantId),
}

impl LeafMatch<MaintenanceRecord> for MaintenanceLeaf {
    fn matches(&self, record: &MaintenanceRecord) -> bool {
        match self {
            MaintenanceLeaf::IdIn(ids) => ids.contains(&record.id),
            MaintenanceLeaf::PropertyIn(ids) => ids.contains(&record.property_id),
            MaintenanceLeaf::LandlordIn(ids) => ids.contains(&record.landlord_id),
            MaintenanceLeaf::ReportedBy(tenant) => record.reported_by == Some(*tenant),
        }
    }
}

/// Conditions on documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentLeaf {
    IdIn(Vec<DocumentId>),
    PropertyIn(Vec<PropertyId>),
    LandlordIn(Vec<LandlordId>),
    OwnerIs(TenantId),
}

impl LeafMatch<DocumentRecord> for DocumentLeaf {
    fn matches(&self, record: &DocumentRecord) -> bool {
        match self {
            DocumentLeaf::IdIn(ids) => ids.contains(&record.id),
            DocumentLeaf::PropertyIn(ids) => {
                record.property_id.is_some_and(|p| ids.contains(&p))
            }
            DocumentLeaf::LandlordIn(ids) => {
                record.landlord_id.is_some_and(|l| ids.contains(&l))
            }
            DocumentLeaf::OwnerIs(tenant) => record.owner_tenant_id == Some(*tenant),
        }
    }
}

/// Conditions on expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseLeaf {
    IdIn(Vec<ExpenseId>),
    PropertyIn(Vec<PropertyId>),
    LandlordIn(Vec<LandlordId>),
}

impl LeafMatch<ExpenseRecord> for ExpenseLeaf {
    fn matches(&self, record: &ExpenseRecord) -> bool {
        match self {
            ExpenseLeaf::IdIn(ids) => ids.contains(&record.id),
            ExpenseLeaf::PropertyIn(ids) => ids.contains(&record.property_id),
            ExpenseLeaf::LandlordIn(ids) => ids.contains(&record.landlord_id),
        }
    }
}

/// Conditions on leases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseLeaf {
    IdIn(Vec<LeaseId>),
    PropertyIn(Vec<PropertyId>),
    LandlordIn(Vec<LandlordId>),
    TenantIs(TenantId),
    StatusIs(LeaseStatus),
}

impl LeafMatch<LeaseRecord> for LeaseLeaf {
    fn matches(&self, record: &LeaseRecord) -> bool {
        match self {
            LeaseLeaf::IdIn(ids) => ids.contains(&record.id),
            LeaseLeaf::PropertyIn(ids) => ids.contains(&record.property_id),
            LeaseLeaf::LandlordIn(ids) => ids.contains(&record.landlord_id),
            LeaseLeaf::TenantIs(tenant) => record.has_tenant(*tenant),
            LeaseLeaf::StatusIs(status) => record.status == *status,
        }
    }
}

/// Conditions on rent payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentLeaf {
    IdIn(Vec<PaymentId>),
    LeaseIn(Vec<LeaseId>),
    TenantIs(TenantId),
}

impl LeafMatch<RentPaymentRecord> for PaymentLeaf {
    fn matches(&self, record: &RentPaymentRecord) -> bool {
        match self {
            PaymentLeaf::IdIn(ids) => ids.contains(&record.id),
            PaymentLeaf::LeaseIn(ids) => ids.contains(&record.lease_id),
            PaymentLeaf::TenantIs(tenant) => record.tenant_id == *tenant,
        }
    }
}
