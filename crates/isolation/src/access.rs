//! Point-query access checks.

use rentfold_core::{
    DocumentId, ExpenseId, LeaseId, MaintenanceId, PaymentId, Principal, PropertyId, ResourceKind,
    TenantId, UnitId,
};
use rentfold_store::{
    DocumentStore, ExpenseStore, LeaseStore, MaintenanceStore, PropertyStore, RentPaymentStore,
    Repositories, StoreError, TenantStore, UnitStore,
};

use crate::context::{ContextBuilder, IsolationContext, ScopeResolver};
use crate::filters::FilterStrategies;

/// A typed reference to one resource.
///
/// Pairing the kind with its id type makes kind/id mismatches
/// unrepresentable, and forces every access path to handle every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef {
    Property(PropertyId),
    Unit(UnitId),
    Tenant(TenantId),
    Maintenance(MaintenanceId),
    Document(DocumentId),
    Expense(ExpenseId),
    Lease(LeaseId),
    RentPayment(PaymentId),
}

impl ResourceRef {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceRef::Property(_) => ResourceKind::Property,
            ResourceRef::Unit(_) => ResourceKind::Unit,
            ResourceRef::Tenant(_) => ResourceKind::Tenant,
            ResourceRef::Maintenance(_) => ResourceKind::Maintenance,
            ResourceRef::Document(_) => ResourceKind::Document,
            ResourceRef::Expense(_) => ResourceKind::Expense,
            ResourceRef::Lease(_) => ResourceKind::Lease,
            ResourceRef::RentPayment(_) => ResourceKind::RentPayment,
        }
    }
}

/// Boolean access checks: "can this principal see this record?"
///
/// The checker evaluates the same filter strategies the list path uses, but
/// against a single fetched record, so point and list visibility can never
/// drift apart.
#[derive(Clone)]
pub struct AccessChecker {
    repos: Repositories,
    contexts: ContextBuilder,
    strategies: FilterStrategies,
}

impl AccessChecker {
    pub fn new(repos: Repositories) -> Self {
        let contexts = ContextBuilder::new(ScopeResolver::new(repos.scopes.clone()));
        let strategies = FilterStrategies::new(repos.clone());
        Self {
            repos,
            contexts,
            strategies,
        }
    }

    /// Whether the principal may access the referenced resource.
    ///
    /// A missing resource is `Ok(false)`, never an error. A storage failure
    /// is returned as `Err` so callers can tell "denied" from "could not
    /// determine"; policy at the façade maps `Err` to deny.
    pub async fn can_access(
        &self,
        principal: Principal,
        resource: ResourceRef,
    ) -> Result<bool, StoreError> {
        let ctx = self.contexts.build(principal).await?;
        self.decide(&ctx, resource).await
    }

    /// Evaluate a reference against an already-built context.
    pub(crate) async fn decide(
        &self,
        ctx: &IsolationContext,
        resource: ResourceRef,
    ) -> Result<bool, StoreError> {
        match resource {
            ResourceRef::Property(id) => match self.repos.properties.find(id).await? {
                None => Ok(false),
                Some(record) => Ok(self.strategies.property_filter(ctx).await?.evaluate(&record)),
            },
            ResourceRef::Unit(id) => match self.repos.units.find(id).await? {
                None => Ok(false),
                Some(record) => Ok(self.strategies.unit_filter(ctx).await?.evaluate(&record)),
            },
            ResourceRef::Tenant(id) => match self.repos.tenants.find(id).await? {
                None => Ok(false),
                Some(record) => Ok(self.strategies.tenant_filter(ctx).await?.evaluate(&record)),
            },
            ResourceRef::Maintenance(id) => match self.repos.maintenance.find(id).await? {
                None => Ok(false),
                Some(record) => Ok(self
                    .strategies
                    .maintenance_filter(ctx)
                    .await?
                    .evaluate(&record)),
            },
            ResourceRef::Document(id) => match self.repos.documents.find(id).await? {
                None => Ok(false),
                Some(record) => Ok(self.strategies.document_filter(ctx).await?.evaluate(&record)),
            },
            ResourceRef::Expense(id) => match self.repos.expenses.find(id).await? {
                None => Ok(false),
                Some(record) => Ok(self.strategies.expense_filter(ctx).await?.evaluate(&record)),
            },
            ResourceRef::Lease(id) => match self.repos.leases.find(id).await? {
                None => Ok(false),
                Some(record) => Ok(self.strategies.lease_filter(ctx).await?.evaluate(&record)),
            },
            ResourceRef::RentPayment(id) => match self.repos.payments.find(id).await? {
                None => Ok(false),
                Some(record) => Ok(self.strategies.payment_filter(ctx).await?.evaluate(&record)),
            },
        }
    }
}
