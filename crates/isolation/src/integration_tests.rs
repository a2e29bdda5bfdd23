//! End-to-end isolation behavior across resolver, strategies, checker and
//! façade, driven through the in-memory backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use rentfold_core::{
    DocumentId, ExpenseId, LandlordId, LeaseId, MaintenanceId, PaymentId, PmcId, PortfolioId,
    Principal, PrincipalId, PropertyId, Role, TenantId, UnitId,
};
use rentfold_domain::{
    DocumentRecord, ExpenseRecord, LeaseRecord, LeaseStatus, MaintenanceRecord, MaintenanceStatus,
    PmcLandlordLink, PropertyRecord, RentPaymentRecord, Scope, TenantRecord, UnitRecord,
};
use rentfold_store::{
    InMemoryStore, MaintenanceLeaf, Pagination, Predicate, Repositories, ScopeStore, StoreError,
};

use crate::access::{AccessChecker, ResourceRef};
use crate::error::QueryError;
use crate::reader::ScopedReader;

/// Two landlords, a PMC managing the first, a portfolio, three properties,
/// two leases, three tenants and assorted dependent records.
struct World {
    store: Arc<InMemoryStore>,
    repos: Repositories,

    admin: Principal,
    landlord1: Principal,
    landlord2: Principal,
    pmc: Principal,
    tenant5: Principal,
    tenant6: Principal,
    tenant7: Principal,

    ll1: LandlordId,
    ll2: LandlordId,
    t5: TenantId,
    t6: TenantId,
    t7: TenantId,

    portfolio: PortfolioId,
    prop9: PropertyId,
    prop10: PropertyId,
    prop_pf: PropertyId,
    unit9: UnitId,

    lease9: LeaseId,
    maint9: Vec<MaintenanceId>,
    maint10: Vec<MaintenanceId>,
    doc_prop9: DocumentId,
    doc_t5: DocumentId,
    exp9: ExpenseId,
    pay_t5: PaymentId,
    pay_t6: PaymentId,
    pay_t7: PaymentId,
}

impl World {
    fn new() -> Self {
        let store = InMemoryStore::shared();
        let repos = store.repositories();

        let admin = Principal::new(PrincipalId::new(), Role::Admin);
        let landlord1 = Principal::new(PrincipalId::new(), Role::Landlord);
        let landlord2 = Principal::new(PrincipalId::new(), Role::Landlord);
        let pmc = Principal::new(PrincipalId::new(), Role::Pmc);
        let tenant5 = Principal::new(PrincipalId::new(), Role::Tenant);
        let tenant6 = Principal::new(PrincipalId::new(), Role::Tenant);
        let tenant7 = Principal::new(PrincipalId::new(), Role::Tenant);

        let ll1 = LandlordId::from(landlord1.id);
        let ll2 = LandlordId::from(landlord2.id);
        let t5 = TenantId::from(tenant5.id);
        let t6 = TenantId::from(tenant6.id);
        let t7 = TenantId::from(tenant7.id);

        // The PMC actively manages landlord 1 only.
        store.link_pmc(PmcLandlordLink::new(PmcId::from(pmc.id), ll1));

        let portfolio = PortfolioId::new();
        let prop9 = PropertyId::new();
        let prop10 = PropertyId::new();
        let prop_pf = PropertyId::new();

        let property = |id, portfolio_id, landlord_id, name: &str| PropertyRecord {
            id,
            portfolio_id,
            landlord_id,
            name: name.to_string(),
            address: format!("{name} Street"),
            created_at: Utc::now(),
        };
        store.insert_property(property(prop9, None, ll1, "Nine"));
        store.insert_property(property(prop10, None, ll2, "Ten"));
        store.insert_property(property(prop_pf, Some(portfolio), ll1, "Portfolio"));

        let unit9 = UnitId::new();
        let unit10 = UnitId::new();
        store.insert_unit(UnitRecord {
            id: unit9,
            property_id: prop9,
            landlord_id: ll1,
            label: "9A".to_string(),
        });
        store.insert_unit(UnitRecord {
            id: unit10,
            property_id: prop10,
            landlord_id: ll2,
            label: "10A".to_string(),
        });

        for (id, name) in [(t5, "Tenant Five"), (t6, "Tenant Six"), (t7, "Tenant Seven")] {
            store.insert_tenant(TenantRecord {
                id,
                display_name: name.to_string(),
                email: None,
            });
        }

        let lease9 = LeaseId::new();
        let lease10 = LeaseId::new();
        store.insert_lease(LeaseRecord {
            id: lease9,
            unit_id: unit9,
            property_id: prop9,
            landlord_id: ll1,
            tenant_ids: vec![t5, t6],
            status: LeaseStatus::Active,
            started_at: Utc::now(),
            ended_at: None,
        });
        store.insert_lease(LeaseRecord {
            id: lease10,
            unit_id: unit10,
            property_id: prop10,
            landlord_id: ll2,
            tenant_ids: vec![t7],
            status: LeaseStatus::Active,
            started_at: Utc::now(),
            ended_at: None,
        });

        let maintenance = |property_id, landlord_id, summary: &str| MaintenanceRecord {
            id: MaintenanceId::new(),
            property_id,
            unit_id: None,
            landlord_id,
            reported_by: None,
            summary: summary.to_string(),
            status: MaintenanceStatus::Open,
            opened_at: Utc::now(),
        };
        let mut maint9 = Vec::new();
        for n in 0..3 {
            let record = maintenance(prop9, ll1, &format!("leak {n}"));
            maint9.push(record.id);
            store.insert_maintenance(record);
        }
        let mut maint10 = Vec::new();
        for n in 0..2 {
            let record = maintenance(prop10, ll2, &format!("noise {n}"));
            maint10.push(record.id);
            store.insert_maintenance(record);
        }

        let doc_prop9 = DocumentId::new();
        store.insert_document(DocumentRecord {
            id: doc_prop9,
            property_id: Some(prop9),
            landlord_id: Some(ll1),
            owner_tenant_id: None,
            file_name: "inspection.pdf".to_string(),
            uploaded_at: Utc::now(),
        });
        let doc_t5 = DocumentId::new();
        store.insert_document(DocumentRecord {
            id: doc_t5,
            property_id: None,
            landlord_id: None,
            owner_tenant_id: Some(t5),
            file_name: "passport.pdf".to_string(),
            uploaded_at: Utc::now(),
        });

        let exp9 = ExpenseId::new();
        store.insert_expense(ExpenseRecord {
            id: exp9,
            property_id: prop9,
            landlord_id: ll1,
            amount_cents: 12_500,
            description: "boiler service".to_string(),
            incurred_at: Utc::now(),
        });

        let payment = |lease_id, tenant_id| RentPaymentRecord {
            id: PaymentId::new(),
            lease_id,
            tenant_id,
            amount_cents: 95_000,
            paid_at: Utc::now(),
        };
        let pay_t5 = payment(lease9, t5);
        let pay_t6 = payment(lease9, t6);
        let pay_t7 = payment(lease10, t7);
        let (pay_t5_id, pay_t6_id, pay_t7_id) = (pay_t5.id, pay_t6.id, pay_t7.id);
        store.insert_payment(pay_t5);
        store.insert_payment(pay_t6);
        store.insert_payment(pay_t7);

        Self {
            store,
            repos,
            admin,
            landlord1,
            landlord2,
            pmc,
            tenant5,
            tenant6,
            tenant7,
            ll1,
            ll2,
            t5,
            t6,
            t7,
            portfolio,
            prop9,
            prop10,
            prop_pf,
            unit9,
            lease9,
            maint9,
            maint10,
            doc_prop9,
            doc_t5,
            exp9,
            pay_t5: pay_t5_id,
            pay_t6: pay_t6_id,
            pay_t7: pay_t7_id,
        }
    }

    fn reader(&self, principal: Principal) -> ScopedReader {
        ScopedReader::new(principal, self.repos.clone())
    }

    fn checker(&self) -> AccessChecker {
        AccessChecker::new(self.repos.clone())
    }
}

// P1: empty scope list fails closed on every kind.
#[tokio::test]
async fn unscoped_pmc_sees_nothing_anywhere() {
    let w = World::new();
    let stranger = Principal::new(PrincipalId::new(), Role::Pmc);
    let reader = w.reader(stranger);
    let all = Pagination::all();

    assert!(reader
        .list_properties(Predicate::MatchAll, all)
        .await
        .unwrap()
        .is_empty());
    assert!(reader.list_units(Predicate::MatchAll, all).await.unwrap().is_empty());
    assert!(reader.list_tenants(Predicate::MatchAll, all).await.unwrap().is_empty());
    assert!(reader
        .list_maintenance(Predicate::MatchAll, all)
        .await
        .unwrap()
        .is_empty());
    assert!(reader
        .list_documents(Predicate::MatchAll, all)
        .await
        .unwrap()
        .is_empty());
    assert!(reader.list_expenses(Predicate::MatchAll, all).await.unwrap().is_empty());
    assert!(reader.list_leases(Predicate::MatchAll, all).await.unwrap().is_empty());
    assert!(reader
        .list_rent_payments(Predicate::MatchAll, all)
        .await
        .unwrap()
        .is_empty());

    let checker = w.checker();
    for resource in [
        ResourceRef::Property(w.prop9),
        ResourceRef::Unit(w.unit9),
        ResourceRef::Tenant(w.t5),
        ResourceRef::Maintenance(w.maint9[0]),
        ResourceRef::Document(w.doc_prop9),
        ResourceRef::Expense(w.exp9),
        ResourceRef::Lease(w.lease9),
        ResourceRef::RentPayment(w.pay_t5),
    ] {
        assert!(
            !checker.can_access(stranger, resource).await.unwrap(),
            "expected deny for {:?}",
            resource
        );
    }
}

#[tokio::test]
async fn admin_is_unrestricted() {
    let w = World::new();
    let reader = w.reader(w.admin);
    let props = reader
        .list_properties(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap();
    assert_eq!(props.len(), 3);

    let checker = w.checker();
    assert!(checker
        .can_access(w.admin, ResourceRef::RentPayment(w.pay_t7))
        .await
        .unwrap());
}

// P2: tenants see themselves and only themselves absent a shared lease.
#[tokio::test]
async fn tenant_self_visibility() {
    let w = World::new();
    let checker = w.checker();

    assert!(checker
        .can_access(w.tenant5, ResourceRef::Tenant(w.t5))
        .await
        .unwrap());
    // t7 shares no lease with t5.
    assert!(!checker
        .can_access(w.tenant5, ResourceRef::Tenant(w.t7))
        .await
        .unwrap());
    assert!(!checker
        .can_access(w.tenant7, ResourceRef::Tenant(w.t5))
        .await
        .unwrap());
}

// P3: co-tenants on a shared active lease see each other's identity.
#[tokio::test]
async fn co_tenant_visibility() {
    let w = World::new();
    let checker = w.checker();

    assert!(checker
        .can_access(w.tenant5, ResourceRef::Tenant(w.t6))
        .await
        .unwrap());
    assert!(checker
        .can_access(w.tenant6, ResourceRef::Tenant(w.t5))
        .await
        .unwrap());

    let ids: Vec<TenantId> = w
        .reader(w.tenant5)
        .list_tenants(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert!(ids.contains(&w.t5) && ids.contains(&w.t6));
    assert!(!ids.contains(&w.t7));
}

// P4 / scenario C: a scope row cannot widen a landlord past their own
// records.
#[tokio::test]
async fn landlord_containment_is_not_bypassed_by_scope_rows() {
    let w = World::new();
    // Erroneous grant: landlord 2 scoped onto landlord 1's property.
    w.store.grant_scope(w.landlord2.id, Scope::property(w.prop9));

    let checker = w.checker();
    assert!(!checker
        .can_access(w.landlord2, ResourceRef::Property(w.prop9))
        .await
        .unwrap());

    let reader = w.reader(w.landlord2);
    let props = reader
        .list_properties(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap();
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].id, w.prop10);
    assert_eq!(props[0].landlord_id, w.ll2);

    let err = reader.get_property(w.prop9).await.unwrap_err();
    assert!(err.is_access_denied());
}

// P5: granting a scope never removes previously visible rows.
#[tokio::test]
async fn adding_scopes_only_broadens() {
    let w = World::new();
    w.store.grant_scope(w.pmc.id, Scope::property(w.prop9));

    let reader = w.reader(w.pmc);
    let before: Vec<PropertyId> = reader
        .list_properties(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(before, vec![w.prop9]);

    w.store.grant_scope(w.pmc.id, Scope::portfolio(w.portfolio));
    let after: Vec<PropertyId> = reader
        .list_properties(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    for id in &before {
        assert!(after.contains(id));
    }
    assert!(after.contains(&w.prop_pf));
}

// P6: the same context yields the same result set.
#[tokio::test]
async fn repeated_lists_are_identical() {
    let w = World::new();
    w.store.grant_scope(w.pmc.id, Scope::property(w.prop9));

    let reader = w.reader(w.pmc);
    let first = reader
        .list_maintenance(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap();
    let second = reader
        .list_maintenance(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap();
    assert_eq!(first, second);
}

// Scenario A: property-scoped PMC sees exactly that property's requests.
#[tokio::test]
async fn property_scoped_pmc_lists_only_that_propertys_maintenance() {
    let w = World::new();
    w.store.grant_scope(w.pmc.id, Scope::property(w.prop9));

    let records = w
        .reader(w.pmc)
        .list_maintenance(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap();
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.property_id, w.prop9);
        assert!(w.maint9.contains(&record.id));
    }
    for id in &w.maint10 {
        assert!(!records.iter().any(|r| r.id == *id));
    }
}

// Scenario B: the self carve-out works with zero scopes.
#[tokio::test]
async fn tenant_reads_own_record_without_scopes() {
    let w = World::new();
    let record = w.reader(w.tenant5).get_tenant(w.t5).await.unwrap();
    assert_eq!(record.id, w.t5);
}

// Unit scope expands to the parent property's dependent records.
#[tokio::test]
async fn unit_scope_reaches_parent_property_maintenance() {
    let w = World::new();
    w.store.grant_scope(w.pmc.id, Scope::unit(w.unit9));

    let reader = w.reader(w.pmc);
    let records = reader
        .list_maintenance(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.property_id == w.prop9));

    // But the unit scope alone does not expose the property record itself.
    let err = reader.get_property(w.prop9).await.unwrap_err();
    assert!(err.is_access_denied());
    let unit = reader.get_unit(w.unit9).await.unwrap();
    assert_eq!(unit.id, w.unit9);
}

// The caller's predicate narrows within scope; it can never broaden.
#[tokio::test]
async fn raw_predicates_cannot_escape_the_isolation_filter() {
    let w = World::new();
    w.store.grant_scope(w.pmc.id, Scope::property(w.prop9));

    let smuggled = Predicate::Leaf(MaintenanceLeaf::PropertyIn(vec![w.prop10]));
    let records = w
        .reader(w.pmc)
        .list_maintenance(smuggled, Pagination::all())
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn landlord_sees_own_records_without_any_scopes() {
    let w = World::new();
    let reader = w.reader(w.landlord1);
    let all = Pagination::all();

    let props: Vec<PropertyId> = reader
        .list_properties(Predicate::MatchAll, all)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert!(props.contains(&w.prop9) && props.contains(&w.prop_pf));
    assert!(!props.contains(&w.prop10));

    let expenses = reader.list_expenses(Predicate::MatchAll, all).await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, w.exp9);

    let payments: Vec<PaymentId> = reader
        .list_rent_payments(Predicate::MatchAll, all)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert!(payments.contains(&w.pay_t5) && payments.contains(&w.pay_t6));
    assert!(!payments.contains(&w.pay_t7));
}

#[tokio::test]
async fn tenant_payments_are_own_only_even_on_shared_leases() {
    let w = World::new();
    let reader = w.reader(w.tenant5);

    let payments = reader
        .list_rent_payments(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, w.pay_t5);

    let own = reader.get_rent_payment(w.pay_t5).await.unwrap();
    assert_eq!(own.tenant_id, w.t5);
    let err = reader.get_rent_payment(w.pay_t6).await.unwrap_err();
    assert!(err.is_access_denied());
}

#[tokio::test]
async fn document_owner_carve_out_and_property_scope_both_apply() {
    let w = World::new();

    // The owning tenant reads their identity document.
    let doc = w.reader(w.tenant5).get_document(w.doc_t5).await.unwrap();
    assert_eq!(doc.id, w.doc_t5);
    // A co-tenant does not.
    let err = w.reader(w.tenant6).get_document(w.doc_t5).await.unwrap_err();
    assert!(err.is_access_denied());

    // A property-scoped PMC reads the property-attached document only.
    w.store.grant_scope(w.pmc.id, Scope::property(w.prop9));
    let reader = w.reader(w.pmc);
    let docs = reader
        .list_documents(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, w.doc_prop9);
}

#[tokio::test]
async fn pmc_landlord_scope_is_limited_to_active_links() {
    let w = World::new();
    // Scope rows name both landlords, but only landlord 1 is actively
    // managed by this PMC.
    w.store.grant_scope(w.pmc.id, Scope::landlord(w.ll1));
    w.store.grant_scope(w.pmc.id, Scope::landlord(w.ll2));

    let props: Vec<PropertyId> = w
        .reader(w.pmc)
        .list_properties(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert!(props.contains(&w.prop9) && props.contains(&w.prop_pf));
    assert!(!props.contains(&w.prop10));
}

// Membership in several PMCs unions their managed portfolios; no grant
// after the first is dropped.
#[tokio::test]
async fn multi_pmc_membership_sees_every_managed_portfolio() {
    let w = World::new();
    let operator = Principal::new(PrincipalId::new(), Role::Pmc);
    let (org_a, org_b) = (PmcId::new(), PmcId::new());
    w.store.link_pmc(PmcLandlordLink::new(org_a, w.ll1));
    w.store.link_pmc(PmcLandlordLink::new(org_b, w.ll2));
    w.store.grant_scope(operator.id, Scope::pmc(org_a));
    w.store.grant_scope(operator.id, Scope::pmc(org_b));

    let props: Vec<PropertyId> = w
        .reader(operator)
        .list_properties(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert!(props.contains(&w.prop9) && props.contains(&w.prop_pf));
    assert!(props.contains(&w.prop10), "second membership lost");

    let checker = w.checker();
    assert!(checker
        .can_access(operator, ResourceRef::Property(w.prop10))
        .await
        .unwrap());
}

#[tokio::test]
async fn missing_records_are_not_found_except_tenant_identities() {
    let w = World::new();
    let reader = w.reader(w.admin);

    let err = reader.get_property(PropertyId::new()).await.unwrap_err();
    assert!(err.is_not_found());

    // Tenant identities never distinguish missing from denied.
    let err = w
        .reader(w.tenant5)
        .get_tenant(TenantId::new())
        .await
        .unwrap_err();
    assert!(err.is_access_denied());
}

/// Scope store that always fails, for deny-on-uncertainty coverage.
struct DownScopeStore;

#[async_trait]
impl ScopeStore for DownScopeStore {
    async fn scopes_for(&self, _principal: PrincipalId) -> Result<Vec<Scope>, StoreError> {
        Err(StoreError::unavailable("scope store down"))
    }
}

#[tokio::test]
async fn storage_failure_denies_point_reads_and_fails_list_reads_loudly() {
    let w = World::new();
    let repos = Repositories {
        scopes: Arc::new(DownScopeStore),
        ..w.repos.clone()
    };

    let checker = AccessChecker::new(repos.clone());
    let result = checker
        .can_access(w.landlord1, ResourceRef::Property(w.prop9))
        .await;
    assert!(matches!(result, Err(StoreError::Unavailable(_))));

    let reader = ScopedReader::new(w.landlord1, repos);
    // Point read: deny, not a 500.
    let err = reader.get_property(w.prop9).await.unwrap_err();
    assert!(err.is_access_denied());
    // List read: fail loudly so the caller can retry/backoff.
    let err = reader
        .list_properties(Predicate::MatchAll, Pagination::all())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::Storage(_)));
}
