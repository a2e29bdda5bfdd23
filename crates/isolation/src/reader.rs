//! Per-principal query façade.
//!
//! API route handlers construct one [`ScopedReader`] per authenticated
//! principal and go through it for every scoped read; nothing else is
//! expected to touch the repositories for these resource kinds.

use tracing::warn;

use rentfold_core::{
    DocumentId, ExpenseId, LeaseId, MaintenanceId, PaymentId, Principal, PrincipalId, PropertyId,
    Role, TenantId, UnitId,
};
use rentfold_domain::{
    DocumentRecord, ExpenseRecord, LeaseRecord, MaintenanceRecord, PropertyRecord,
    RentPaymentRecord, TenantRecord, UnitRecord,
};
use rentfold_store::{
    DocumentLeaf, DocumentStore, ExpenseLeaf, ExpenseStore, LeaseLeaf, LeaseStore,
    MaintenanceLeaf, MaintenanceStore, Pagination, PaymentLeaf, Predicate, PropertyLeaf,
    PropertyStore, RentPaymentStore, Repositories, TenantLeaf, TenantStore, UnitLeaf, UnitStore,
};

use crate::access::{AccessChecker, ResourceRef};
use crate::context::{ContextBuilder, ScopeResolver};
use crate::error::QueryError;
use crate::filters::FilterStrategies;

/// Scoped read handle for one principal.
///
/// List methods AND-merge the isolation predicate into the caller's own
/// predicate and return rows (possibly empty, never null). Point methods
/// check access first and surface [`QueryError::AccessDenied`] /
/// [`QueryError::NotFound`]. Read-only throughout: the reader never mutates
/// scopes or resources.
#[derive(Clone)]
pub struct ScopedReader {
    principal: Principal,
    repos: Repositories,
    contexts: ContextBuilder,
    strategies: FilterStrategies,
    checker: AccessChecker,
}

impl ScopedReader {
    /// Build a façade for an authenticated principal.
    ///
    /// The repository set is injected explicitly; constructing a reader
    /// performs no IO.
    pub fn new(principal: Principal, repos: Repositories) -> Self {
        let contexts = ContextBuilder::new(ScopeResolver::new(repos.scopes.clone()));
        let strategies = FilterStrategies::new(repos.clone());
        let checker = AccessChecker::new(repos.clone());
        Self {
            principal,
            repos,
            contexts,
            strategies,
            checker,
        }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal.id
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }

    /// Deny-on-uncertainty access check: a storage failure during the check
    /// is logged and treated as a deny, never surfaced to the caller.
    async fn check(&self, resource: ResourceRef) -> bool {
        match self.checker.can_access(self.principal, resource).await {
            Ok(allowed) => allowed,
            Err(err) => {
                warn!(
                    principal = %self.principal.id,
                    kind = %resource.kind(),
                    error = %err,
                    "access check could not be completed; denying"
                );
                false
            }
        }
    }

    // Properties

    pub async fn list_properties(
        &self,
        raw: Predicate<PropertyLeaf>,
        page: Pagination,
    ) -> Result<Vec<PropertyRecord>, QueryError> {
        let ctx = self.contexts.build(self.principal).await?;
        let iso = self.strategies.property_filter(&ctx).await?;
        Ok(self.repos.properties.list(&iso.and_with(raw), page).await?)
    }

    pub async fn get_property(&self, id: PropertyId) -> Result<PropertyRecord, QueryError> {
        let Some(record) = self.repos.properties.find(id).await? else {
            return Err(QueryError::NotFound);
        };
        if self.check(ResourceRef::Property(id)).await {
            Ok(record)
        } else {
            Err(QueryError::AccessDenied)
        }
    }

    // Units

    pub async fn list_units(
        &self,
        raw: Predicate<UnitLeaf>,
        page: Pagination,
    ) -> Result<Vec<UnitRecord>, QueryError> {
        let ctx = self.contexts.build(self.principal).await?;
        let iso = self.strategies.unit_filter(&ctx).await?;
        Ok(self.repos.units.list(&iso.and_with(raw), page).await?)
    }

    pub async fn get_unit(&self, id: UnitId) -> Result<UnitRecord, QueryError> {
        let Some(record) = self.repos.units.find(id).await? else {
            return Err(QueryError::NotFound);
        };
        if self.check(ResourceRef::Unit(id)).await {
            Ok(record)
        } else {
            Err(QueryError::AccessDenied)
        }
    }

    // Tenants

    pub async fn list_tenants(
        &self,
        raw: Predicate<TenantLeaf>,
        page: Pagination,
    ) -> Result<Vec<TenantRecord>, QueryError> {
        let ctx = self.contexts.build(self.principal).await?;
        let iso = self.strategies.tenant_filter(&ctx).await?;
        Ok(self.repos.tenants.list(&iso.and_with(raw), page).await?)
    }

    /// Tenant identities are existence-sensitive: an inaccessible id and a
    /// nonexistent id are intentionally indistinguishable here, so a denied
    /// principal cannot probe which tenants exist.
    pub async fn get_tenant(&self, id: TenantId) -> Result<TenantRecord, QueryError> {
        if !self.check(ResourceRef::Tenant(id)).await {
            return Err(QueryError::AccessDenied);
        }
        self.repos
            .tenants
            .find(id)
            .await?
            .ok_or(QueryError::AccessDenied)
    }

    // Maintenance requests

    pub async fn list_maintenance(
        &self,
        raw: Predicate<MaintenanceLeaf>,
        page: Pagination,
    ) -> Result<Vec<MaintenanceRecord>, QueryError> {
        let ctx = self.contexts.build(self.principal).await?;
        let iso = self.strategies.maintenance_filter(&ctx).await?;
        Ok(self.repos.maintenance.list(&iso.and_with(raw), page).await?)
    }

    pub async fn get_maintenance(&self, id: MaintenanceId) -> Result<MaintenanceRecord, QueryError> {
        let Some(record) = self.repos.maintenance.find(id).await? else {
            return Err(QueryError::NotFound);
        };
        if self.check(ResourceRef::Maintenance(id)).await {
            Ok(record)
        } else {
            Err(QueryError::AccessDenied)
        }
    }

    // Documents

    pub async fn list_documents(
        &self,
        raw: Predicate<DocumentLeaf>,
        page: Pagination,
    ) -> Result<Vec<DocumentRecord>, QueryError> {
        let ctx = self.contexts.build(self.principal).await?;
        let iso = self.strategies.document_filter(&ctx).await?;
        Ok(self.repos.documents.list(&iso.and_with(raw), page).await?)
    }

    pub async fn get_document(&self, id: DocumentId) -> Result<DocumentRecord, QueryError> {
        let Some(record) = self.repos.documents.find(id).await? else {
            return Err(QueryError::NotFound);
        };
        if self.check(ResourceRef::Document(id)).await {
            Ok(record)
        } else {
            Err(QueryError::AccessDenied)
        }
    }

    // Expenses

    pub async fn list_expenses(
        &self,
        raw: Predicate<ExpenseLeaf>,
        page: Pagination,
    ) -> Result<Vec<ExpenseRecord>, QueryError> {
        let ctx = self.contexts.build(self.principal).await?;
        let iso = self.strategies.expense_filter(&ctx).await?;
        Ok(self.repos.expenses.list(&iso.and_with(raw), page).await?)
    }

    pub async fn get_expense(&self, id: ExpenseId) -> Result<ExpenseRecord, QueryError> {
        let Some(record) = self.repos.expenses.find(id).await? else {
            return Err(QueryError::NotFound);
        };
        if self.check(ResourceRef::Expense(id)).await {
            Ok(record)
        } else {
            Err(QueryError::AccessDenied)
        }
    }

    // Leases and rent payments (payment scoping chains off lease scoping)

    pub async fn list_leases(
        &self,
        raw: Predicate<LeaseLeaf>,
        page: Pagination,
    ) -> Result<Vec<LeaseRecord>, QueryError> {
        let ctx = self.contexts.build(self.principal).await?;
        let iso = self.strategies.lease_filter(&ctx).await?;
        Ok(self.repos.leases.list(&iso.and_with(raw), page).await?)
    }

    pub async fn get_lease(&self, id: LeaseId) -> Result<LeaseRecord, QueryError> {
        let Some(record) = self.repos.leases.find(id).await? else {
            return Err(QueryError::NotFound);
        };
        if self.check(ResourceRef::Lease(id)).await {
            Ok(record)
        } else {
            Err(QueryError::AccessDenied)
        }
    }

    pub async fn list_rent_payments(
        &self,
        raw: Predicate<PaymentLeaf>,
        page: Pagination,
    ) -> Result<Vec<RentPaymentRecord>, QueryError> {
        let ctx = self.contexts.build(self.principal).await?;
        let iso = self.strategies.payment_filter(&ctx).await?;
        Ok(self.repos.payments.list(&iso.and_with(raw), page).await?)
    }

    pub async fn get_rent_payment(&self, id: PaymentId) -> Result<RentPaymentRecord, QueryError> {
        let Some(record) = self.repos.payments.find(id).await? else {
            return Err(QueryError::NotFound);
        };
        if self.check(ResourceRef::RentPayment(id)).await {
            Ok(record)
        } else {
            Err(QueryError::AccessDenied)
        }
    }
}
