//! Async repository traits and the injected repository bundle.
//!
//! Every storage read the isolation layer performs goes through one of these
//! traits. Implementations are injected explicitly (no module-level
//! singleton client), which keeps test doubles trivial.

use std::sync::Arc;

use async_trait::async_trait;

use rentfold_core::{
    DocumentId, ExpenseId, LandlordId, LeaseId, MaintenanceId, PaymentId, PmcId, PortfolioId,
    PrincipalId, PropertyId, TenantId, UnitId,
};
use rentfold_domain::{
    DocumentRecord, ExpenseRecord, LeaseRecord, MaintenanceRecord, PropertyRecord,
    RentPaymentRecord, Scope, TenantRecord, UnitRecord,
};

use crate::error::StoreError;
use crate::filters::{
    DocumentLeaf, ExpenseLeaf, LeaseLeaf, MaintenanceLeaf, PaymentLeaf, PropertyLeaf, TenantLeaf,
    UnitLeaf,
};
use crate::predicate::{Pagination, Predicate};

/// Read access to role-assignment scope grants.
#[async_trait]
pub trait ScopeStore: Send + Sync {
    /// All scopes currently granted to a principal.
    ///
    /// Returns an empty list (never an error) when the principal holds no
    /// assignments; callers must treat empty as "no access".
    async fn scopes_for(&self, principal: PrincipalId) -> Result<Vec<Scope>, StoreError>;
}

/// Read access to PMC–landlord management relationships.
#[async_trait]
pub trait PmcDirectory: Send + Sync {
    /// Landlords with an active management link to any of the given PMCs.
    ///
    /// One batched lookup per distinct id set; the result carries no
    /// duplicates even when several PMCs manage the same landlord.
    async fn active_landlords(&self, pmcs: &[PmcId]) -> Result<Vec<LandlordId>, StoreError>;
}

#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn list(
        &self,
        filter: &Predicate<PropertyLeaf>,
        page: Pagination,
    ) -> Result<Vec<PropertyRecord>, StoreError>;

    async fn find(&self, id: PropertyId) -> Result<Option<PropertyRecord>, StoreError>;

    /// Property ids belonging to any of the given portfolios.
    ///
    /// One batched call per distinct portfolio set, never per-property.
    async fn ids_in_portfolios(
        &self,
        portfolios: &[PortfolioId],
    ) -> Result<Vec<PropertyId>, StoreError>;
}

#[async_trait]
pub trait UnitStore: Send + Sync {
    async fn list(
        &self,
        filter: &Predicate<UnitLeaf>,
        page: Pagination,
    ) -> Result<Vec<UnitRecord>, StoreError>;

    async fn find(&self, id: UnitId) -> Result<Option<UnitRecord>, StoreError>;

    /// Distinct parent property ids for the given units (batched).
    async fn parent_properties(&self, units: &[UnitId]) -> Result<Vec<PropertyId>, StoreError>;
}

#[async_trait]
pub trait TenantStore: Send + Sync {
    async fn list(
        &self,
        filter: &Predicate<TenantLeaf>,
        page: Pagination,
    ) -> Result<Vec<TenantRecord>, StoreError>;

    async fn find(&self, id: TenantId) -> Result<Option<TenantRecord>, StoreError>;
}

#[async_trait]
pub trait LeaseStore: Send + Sync {
    async fn list(
        &self,
        filter: &Predicate<LeaseLeaf>,
        page: Pagination,
    ) -> Result<Vec<LeaseRecord>, StoreError>;

    async fn find(&self, id: LeaseId) -> Result<Option<LeaseRecord>, StoreError>;

    /// Active leases the tenant holds (co-tenant visibility).
    async fn active_for_tenant(&self, tenant: TenantId) -> Result<Vec<LeaseRecord>, StoreError>;

    /// Tenant ids holding an active lease on any of the given properties
    /// (batched).
    async fn tenants_on_properties(
        &self,
        properties: &[PropertyId],
    ) -> Result<Vec<TenantId>, StoreError>;
}

#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn list(
        &self,
        filter: &Predicate<MaintenanceLeaf>,
        page: Pagination,
    ) -> Result<Vec<MaintenanceRecord>, StoreError>;

    async fn find(&self, id: MaintenanceId) -> Result<Option<MaintenanceRecord>, StoreError>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(
        &self,
        filter: &Predicate<DocumentLeaf>,
        page: Pagination,
    ) -> Result<Vec<DocumentRecord>, StoreError>;

    async fn find(&self, id: DocumentId) -> Result<Option<DocumentRecord>, StoreError>;
}

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn list(
        &self,
        filter: &Predicate<ExpenseLeaf>,
        page: Pagination,
    ) -> Result<Vec<ExpenseRecord>, StoreError>;

    async fn find(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>, StoreError>;
}

#[async_trait]
pub trait RentPaymentStore: Send + Sync {
    async fn list(
        &self,
        filter: &Predicate<PaymentLeaf>,
        page: Pagination,
    ) -> Result<Vec<RentPaymentRecord>, StoreError>;

    async fn find(&self, id: PaymentId) -> Result<Option<RentPaymentRecord>, StoreError>;
}

/// The full repository set scoped reads run against.
///
/// Constructed once at composition root and handed to each façade; every
/// field is a trait object so tests can substitute any store individually.
#[derive(Clone)]
pub struct Repositories {
    pub scopes: Arc<dyn ScopeStore>,
    pub pmc_links: Arc<dyn PmcDirectory>,
    pub properties: Arc<dyn PropertyStore>,
    pub units: Arc<dyn UnitStore>,
    pub tenants: Arc<dyn TenantStore>,
    pub leases: Arc<dyn LeaseStore>,
    pub maintenance: Arc<dyn MaintenanceStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub expenses: Arc<dyn ExpenseStore>,
    pub payments: Arc<dyn RentPaymentStore>,
}
