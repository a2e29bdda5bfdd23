//! In-memory repository backend.
//!
//! Intended for tests/dev. Records live in insertion order behind `RwLock`s,
//! so repeated identical queries return identical result sets. Not optimized
//! for performance.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use rentfold_core::{
    DocumentId, ExpenseId, LandlordId, LeaseId, MaintenanceId, PaymentId, PmcId, PortfolioId,
    PrincipalId, PropertyId, TenantId, UnitId,
};
use rentfold_domain::{
    DocumentRecord, ExpenseRecord, LeaseRecord, MaintenanceRecord, PmcLandlordLink,
    PropertyRecord, RentPaymentRecord, Scope, TenantRecord, UnitRecord,
};

use crate::error::StoreError;
use crate::filters::{
    DocumentLeaf, ExpenseLeaf, LeaseLeaf, MaintenanceLeaf, PaymentLeaf, PropertyLeaf, TenantLeaf,
    UnitLeaf,
};
use crate::predicate::{LeafMatch, Pagination, Predicate};
use crate::repository::{
    DocumentStore, ExpenseStore, LeaseStore, MaintenanceStore, PmcDirectory, PropertyStore,
    RentPaymentStore, Repositories, ScopeStore, TenantStore, UnitStore,
};

/// In-memory backing store implementing every repository trait.
///
/// One instance stands in for the platform database; clone the `Arc` into a
/// [`Repositories`] bundle via [`InMemoryStore::repositories`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    scopes: RwLock<HashMap<PrincipalId, Vec<Scope>>>,
    pmc_links: RwLock<Vec<PmcLandlordLink>>,
    properties: RwLock<Vec<PropertyRecord>>,
    units: RwLock<Vec<UnitRecord>>,
    tenants: RwLock<Vec<TenantRecord>>,
    leases: RwLock<Vec<LeaseRecord>>,
    maintenance: RwLock<Vec<MaintenanceRecord>>,
    documents: RwLock<Vec<DocumentRecord>>,
    expenses: RwLock<Vec<ExpenseRecord>>,
    payments: RwLock<Vec<RentPaymentRecord>>,
}

fn poisoned() -> StoreError {
    StoreError::backend("lock poisoned")
}

fn apply_page<T>(records: Vec<T>, page: Pagination) -> Vec<T> {
    records
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

impl InMemoryStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Bundle this store into a [`Repositories`] set.
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            scopes: self.clone(),
            pmc_links: self.clone(),
            properties: self.clone(),
            units: self.clone(),
            tenants: self.clone(),
            leases: self.clone(),
            maintenance: self.clone(),
            documents: self.clone(),
            expenses: self.clone(),
            payments: self.clone(),
        }
    }

    fn list_matching<R, L>(
        lock: &RwLock<Vec<R>>,
        filter: &Predicate<L>,
        page: Pagination,
    ) -> Result<Vec<R>, StoreError>
    where
        R: Clone,
        L: LeafMatch<R>,
    {
        let records = lock.read().map_err(|_| poisoned())?;
        let matched = records
            .iter()
            .filter(|r| filter.evaluate(r))
            .cloned()
            .collect();
        Ok(apply_page(matched, page))
    }

    fn find_by<R, F>(lock: &RwLock<Vec<R>>, pred: F) -> Result<Option<R>, StoreError>
    where
        R: Clone,
        F: Fn(&R) -> bool,
    {
        let records = lock.read().map_err(|_| poisoned())?;
        Ok(records.iter().find(|r| pred(r)).cloned())
    }

    fn upsert_by<R, F>(lock: &RwLock<Vec<R>>, record: R, same: F)
    where
        F: Fn(&R, &R) -> bool,
    {
        if let Ok(mut records) = lock.write() {
            if let Some(existing) = records.iter_mut().find(|r| same(r, &record)) {
                *existing = record;
            } else {
                records.push(record);
            }
        }
    }

    // Seed helpers (tests/dev).

    pub fn grant_scope(&self, principal: PrincipalId, scope: Scope) {
        if let Ok(mut map) = self.scopes.write() {
            map.entry(principal).or_default().push(scope);
        }
    }

    pub fn link_pmc(&self, link: PmcLandlordLink) {
        if let Ok(mut links) = self.pmc_links.write() {
            links.push(link);
        }
    }

    pub fn insert_property(&self, record: PropertyRecord) {
        Self::upsert_by(&self.properties, record, |a, b| a.id == b.id);
    }

    pub fn insert_unit(&self, record: UnitRecord) {
        Self::upsert_by(&self.units, record, |a, b| a.id == b.id);
    }

    pub fn insert_tenant(&self, record: TenantRecord) {
        Self::upsert_by(&self.tenants, record, |a, b| a.id == b.id);
    }

    pub fn insert_lease(&self, record: LeaseRecord) {
        Self::upsert_by(&self.leases, record, |a, b| a.id == b.id);
    }

    pub fn insert_maintenance(&self, record: MaintenanceRecord) {
        Self::upsert_by(&self.maintenance, record, |a, b| a.id == b.id);
    }

    pub fn insert_document(&self, record: DocumentRecord) {
        Self::upsert_by(&self.documents, record, |a, b| a.id == b.id);
    }

    pub fn insert_expense(&self, record: ExpenseRecord) {
        Self::upsert_by(&self.expenses, record, |a, b| a.id == b.id);
    }

    pub fn insert_payment(&self, record: RentPaymentRecord) {
        Self::upsert_by(&self.payments, record, |a, b| a.id == b.id);
    }
}

#[async_trait]
impl ScopeStore for InMemoryStore {
    async fn scopes_for(&self, principal: PrincipalId) -> Result<Vec<Scope>, StoreError> {
        let map = self.scopes.read().map_err(|_| poisoned())?;
        Ok(map.get(&principal).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl PmcDirectory for InMemoryStore {
    async fn active_landlords(&self, pmcs: &[PmcId]) -> Result<Vec<LandlordId>, StoreError> {
        let links = self.pmc_links.read().map_err(|_| poisoned())?;
        let mut landlords = Vec::new();
        for link in links
            .iter()
            .filter(|l| l.active && pmcs.contains(&l.pmc_id))
        {
            if !landlords.contains(&link.landlord_id) {
                landlords.push(link.landlord_id);
            }
        }
        Ok(landlords)
    }
}

#[async_trait]
impl PropertyStore for InMemoryStore {
    async fn list(
        &self,
        filter: &Predicate<PropertyLeaf>,
        page: Pagination,
    ) -> Result<Vec<PropertyRecord>, StoreError> {
        Self::list_matching(&self.properties, filter, page)
    }

    async fn find(&self, id: PropertyId) -> Result<Option<PropertyRecord>, StoreError> {
        Self::find_by(&self.properties, |r| r.id == id)
    }

    async fn ids_in_portfolios(
        &self,
        portfolios: &[PortfolioId],
    ) -> Result<Vec<PropertyId>, StoreError> {
        let records = self.properties.read().map_err(|_| poisoned())?;
        Ok(records
            .iter()
            .filter(|r| r.portfolio_id.is_some_and(|p| portfolios.contains(&p)))
            .map(|r| r.id)
            .collect())
    }
}

#[async_trait]
impl UnitStore for InMemoryStore {
    async fn list(
        &self,
        filter: &Predicate<UnitLeaf>,
        page: Pagination,
    ) -> Result<Vec<UnitRecord>, StoreError> {
        Self::list_matching(&self.units, filter, page)
    }

    async fn find(&self, id: UnitId) -> Result<Option<UnitRecord>, StoreError> {
        Self::find_by(&self.units, |r| r.id == id)
    }

    async fn parent_properties(&self, units: &[UnitId]) -> Result<Vec<PropertyId>, StoreError> {
        let records = self.units.read().map_err(|_| poisoned())?;
        let mut parents = Vec::new();
        for unit in records.iter().filter(|r| units.contains(&r.id)) {
            if !parents.contains(&unit.property_id) {
                parents.push(unit.property_id);
            }
        }
        Ok(parents)
    }
}

#[async_trait]
impl TenantStore for InMemoryStore {
    async fn list(
        &self,
        filter: &Predicate<TenantLeaf>,
        page: Pagination,
    ) -> Result<Vec<TenantRecord>, StoreError> {
        Self::list_matching(&self.tenants, filter, page)
    }

    async fn find(&self, id: TenantId) -> Result<Option<TenantRecord>, StoreError> {
        Self::find_by(&self.tenants, |r| r.id == id)
    }
}

#[async_trait]
impl LeaseStore for InMemoryStore {
    async fn list(
        &self,
        filter: &Predicate<LeaseLeaf>,
        page: Pagination,
    ) -> Result<Vec<LeaseRecord>, StoreError> {
        Self::list_matching(&self.leases, filter, page)
    }

    async fn find(&self, id: LeaseId) -> Result<Option<LeaseRecord>, StoreError> {
        Self::find_by(&self.leases, |r| r.id == id)
    }

    async fn active_for_tenant(&self, tenant: TenantId) -> Result<Vec<LeaseRecord>, StoreError> {
        let records = self.leases.read().map_err(|_| poisoned())?;
        Ok(records
            .iter()
            .filter(|r| r.is_active() && r.has_tenant(tenant))
            .cloned()
            .collect())
    }

    async fn tenants_on_properties(
        &self,
        properties: &[PropertyId],
    ) -> Result<Vec<TenantId>, StoreError> {
        let records = self.leases.read().map_err(|_| poisoned())?;
        let mut tenants = Vec::new();
        for lease in records
            .iter()
            .filter(|r| r.is_active() && properties.contains(&r.property_id))
        {
            for tenant in &lease.tenant_ids {
                if !tenants.contains(tenant) {
                    tenants.push(*tenant);
                }
            }
        }
        Ok(tenants)
    }
}

#[async_trait]
impl MaintenanceStore for InMemoryStore {
    async fn list(
        &self,
        filter: &Predicate<MaintenanceLeaf>,
        page: Pagination,
    ) -> Result<Vec<MaintenanceRecord>, StoreError> {
        Self::list_matching(&self.maintenance, filter, page)
    }

    async fn find(&self, id: MaintenanceId) -> Result<Option<MaintenanceRecord>, StoreError> {
        Self::find_by(&self.maintenance, |r| r.id == id)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list(
        &self,
        filter: &Predicate<DocumentLeaf>,
        page: Pagination,
    ) -> Result<Vec<DocumentRecord>, StoreError> {
        Self::list_matching(&self.documents, filter, page)
    }

    async fn find(&self, id: DocumentId) -> Result<Option<DocumentRecord>, StoreError> {
        Self::find_by(&self.documents, |r| r.id == id)
    }
}

#[async_trait]
impl ExpenseStore for InMemoryStore {
    async fn list(
        &self,
        filter: &Predicate<ExpenseLeaf>,
        page: Pagination,
    ) -> Result<Vec<ExpenseRecord>, StoreError> {
        Self::list_matching(&self.expenses, filter, page)
    }

    async fn find(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>, StoreError> {
        Self::find_by(&self.expenses, |r| r.id == id)
    }
}

#[async_trait]
impl RentPaymentStore for InMemoryStore {
    async fn list(
        &self,
        filter: &Predicate<PaymentLeaf>,
        page: Pagination,
    ) -> Result<Vec<RentPaymentRecord>, StoreError> {
        Self::list_matching(&self.payments, filter, page)
    }

    async fn find(&self, id: PaymentId) -> Result<Option<RentPaymentRecord>, StoreError> {
        Self::find_by(&self.payments, |r| r.id == id)
    }
}
