//! Per-resource filter strategies.
//!
//! Each strategy turns an [`IsolationContext`] into a typed predicate for
//! one resource kind. The shape is always the same:
//!
//! - a disjunction (`OR`) over every matching scope in the context, with
//!   role carve-outs (tenant-sees-self, landlord-sees-own, document-owner)
//!   unioned in — carve-outs broaden, never narrow;
//! - an outer conjunction (`AND`) applying the non-bypassable cross-role
//!   containment (landlord-own-records, PMC active-landlord set,
//!   tenant-identity-linked);
//! - `MatchNone` when nothing applies — an empty scope list fails closed,
//!   never unfiltered.
//!
//! Indirect scope (unit-scope implying the parent property, portfolio-scope
//! implying its properties) is resolved with one batched store lookup per
//! distinct id set, not per row. Strategies hold no state across calls.

use rentfold_core::{LandlordId, PropertyId, Role, TenantId};
use rentfold_store::{
    DocumentLeaf, ExpenseLeaf, LeaseLeaf, LeaseStore, MaintenanceLeaf, Pagination, PaymentLeaf,
    PmcDirectory, Predicate, PropertyLeaf, PropertyStore, Repositories, StoreError, TenantLeaf,
    UnitLeaf, UnitStore,
};

use crate::context::IsolationContext;

/// Cross-role containment applied around every scope disjunction.
enum Containment {
    Unrestricted,
    Landlord(LandlordId),
    PmcLandlords(Vec<LandlordId>),
    TenantIdentity(TenantId),
}

/// Builds isolation predicates per resource kind.
///
/// Each kind has its own method and leaf type, so an unhandled kind is a
/// compile error, not a silently unfiltered query.
#[derive(Clone)]
pub struct FilterStrategies {
    repos: Repositories,
}

fn push_unique<T: PartialEq>(dst: &mut Vec<T>, src: impl IntoIterator<Item = T>) {
    for item in src {
        if !dst.contains(&item) {
            dst.push(item);
        }
    }
}

impl FilterStrategies {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Property ids the context's scopes reach, directly or indirectly.
    ///
    /// Portfolio scopes expand through one batched portfolio→property
    /// lookup; when `via_units` is set, unit scopes expand through one
    /// batched unit→parent-property lookup.
    async fn scoped_property_ids(
        &self,
        ctx: &IsolationContext,
        via_units: bool,
    ) -> Result<Vec<PropertyId>, StoreError> {
        let mut ids = ctx.property_ids();

        let portfolios = ctx.portfolio_ids();
        if !portfolios.is_empty() {
            let expanded = self.repos.properties.ids_in_portfolios(&portfolios).await?;
            push_unique(&mut ids, expanded);
        }

        if via_units {
            let units = ctx.unit_ids();
            if !units.is_empty() {
                let parents = self.repos.units.parent_properties(&units).await?;
                push_unique(&mut ids, parents);
            }
        }

        Ok(ids)
    }

    /// Landlords reachable through landlord scopes and PMC scopes.
    async fn scoped_landlords(&self, ctx: &IsolationContext) -> Result<Vec<LandlordId>, StoreError> {
        let mut ids = ctx.scoped_landlord_ids();
        let mut pmcs = Vec::new();
        push_unique(&mut pmcs, ctx.scoped_pmc_ids());
        if !pmcs.is_empty() {
            let managed = self.repos.pmc_links.active_landlords(&pmcs).await?;
            push_unique(&mut ids, managed);
        }
        Ok(ids)
    }

    async fn containment(&self, ctx: &IsolationContext) -> Result<Containment, StoreError> {
        Ok(match ctx.role() {
            Role::Admin => Containment::Unrestricted,
            Role::Landlord => {
                // Identity is the constraint; scope rows cannot widen past it.
                let own = LandlordId::from(ctx.principal_id());
                Containment::Landlord(own)
            }
            Role::Pmc => {
                // Every membership counts: a principal under two PMCs is
                // contained to the union of both active-landlord sets.
                let pmcs = ctx.effective_pmc_ids();
                let landlords = self.repos.pmc_links.active_landlords(&pmcs).await?;
                Containment::PmcLandlords(landlords)
            }
            Role::Tenant => Containment::TenantIdentity(
                ctx.tenant_identity().unwrap_or_else(|| TenantId::from(ctx.principal_id())),
            ),
        })
    }

    pub async fn property_filter(
        &self,
        ctx: &IsolationContext,
    ) -> Result<Predicate<PropertyLeaf>, StoreError> {
        let containment = self.containment(ctx).await?;
        let guard = match containment {
            Containment::Unrestricted => return Ok(Predicate::MatchAll),
            // Properties are not identity-linked to tenants.
            Containment::TenantIdentity(_) => return Ok(Predicate::MatchNone),
            Containment::Landlord(own) => Predicate::Leaf(PropertyLeaf::LandlordIn(vec![own])),
            Containment::PmcLandlords(ids) => Predicate::Leaf(PropertyLeaf::LandlordIn(ids)),
        };

        let mut parts = Vec::new();
        let direct = ctx.property_ids();
        if !direct.is_empty() {
            parts.push(Predicate::Leaf(PropertyLeaf::IdIn(direct)));
        }
        let portfolios = ctx.portfolio_ids();
        if !portfolios.is_empty() {
            parts.push(Predicate::Leaf(PropertyLeaf::PortfolioIn(portfolios)));
        }
        let landlords = self.scoped_landlords(ctx).await?;
        if !landlords.is_empty() {
            parts.push(Predicate::Leaf(PropertyLeaf::LandlordIn(landlords)));
        }
        if let Some(own) = ctx.own_landlord_id() {
            // Landlords always see their own properties, scopes or not.
            parts.push(Predicate::Leaf(PropertyLeaf::LandlordIn(vec![own])));
        }

        Ok(guard.and_with(Predicate::or(parts)))
    }

    pub async fn unit_filter(
        &self,
        ctx: &IsolationContext,
    ) -> Result<Predicate<UnitLeaf>, StoreError> {
        let containment = self.containment(ctx).await?;
        let guard = match containment {
            Containment::Unrestricted => return Ok(Predicate::MatchAll),
            Containment::TenantIdentity(_) => return Ok(Predicate::MatchNone),
            Containment::Landlord(own) => Predicate::Leaf(UnitLeaf::LandlordIn(vec![own])),
            Containment::PmcLandlords(ids) => Predicate::Leaf(UnitLeaf::LandlordIn(ids)),
        };

        let mut parts = Vec::new();
        let units = ctx.unit_ids();
        if !units.is_empty() {
            parts.push(Predicate::Leaf(UnitLeaf::IdIn(units)));
        }
        let properties = self.scoped_property_ids(ctx, false).await?;
        if !properties.is_empty() {
            parts.push(Predicate::Leaf(UnitLeaf::PropertyIn(properties)));
        }
        let landlords = self.scoped_landlords(ctx).await?;
        if !landlords.is_empty() {
            parts.push(Predicate::Leaf(UnitLeaf::LandlordIn(landlords)));
        }
        if let Some(own) = ctx.own_landlord_id() {
            parts.push(Predicate::Leaf(UnitLeaf::LandlordIn(vec![own])));
        }

        Ok(guard.and_with(Predicate::or(parts)))
    }

    pub async fn tenant_filter(
        &self,
        ctx: &IsolationContext,
    ) -> Result<Predicate<TenantLeaf>, StoreError> {
        if ctx.role() == Role::Admin {
            return Ok(Predicate::MatchAll);
        }

        if let Some(me) = ctx.tenant_identity() {
            // Self plus co-tenants sharing an active lease; nothing else.
            let mut visible = vec![me];
            for lease in self.repos.leases.active_for_tenant(me).await? {
                push_unique(&mut visible, lease.tenant_ids);
            }
            return Ok(Predicate::Leaf(TenantLeaf::IdIn(visible)));
        }

        // Landlord/PMC: tenants holding an active lease on a visible
        // property. Reusing the property strategy keeps the containment
        // rules identical on both paths.
        let property_filter = self.property_filter(ctx).await?;
        if property_filter == Predicate::MatchNone {
            return Ok(Predicate::MatchNone);
        }
        let visible_properties = self
            .repos
            .properties
            .list(&property_filter, Pagination::all())
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect::<Vec<_>>();
        if visible_properties.is_empty() {
            return Ok(Predicate::MatchNone);
        }

        let tenants = self
            .repos
            .leases
            .tenants_on_properties(&visible_properties)
            .await?;
        if tenants.is_empty() {
            return Ok(Predicate::MatchNone);
        }
        Ok(Predicate::Leaf(TenantLeaf::IdIn(tenants)))
    }

    pub async fn maintenance_filter(
        &self,
        ctx: &IsolationContext,
    ) -> Result<Predicate<MaintenanceLeaf>, StoreError> {
        let containment = self.containment(ctx).await?;
        let guard = match containment {
            Containment::Unrestricted => return Ok(Predicate::MatchAll),
            Containment::TenantIdentity(me) => {
                return Ok(Predicate::Leaf(MaintenanceLeaf::ReportedBy(me)));
            }
            Containment::Landlord(own) => Predicate::Leaf(MaintenanceLeaf::LandlordIn(vec![own])),
            Containment::PmcLandlords(ids) => Predicate::Leaf(MaintenanceLeaf::LandlordIn(ids)),
        };

        let mut parts = Vec::new();
        let properties = self.scoped_property_ids(ctx, true).await?;
        if !properties.is_empty() {
            parts.push(Predicate::Leaf(MaintenanceLeaf::PropertyIn(properties)));
        }
        let landlords = self.scoped_landlords(ctx).await?;
        if !landlords.is_empty() {
            parts.push(Predicate::Leaf(MaintenanceLeaf::LandlordIn(landlords)));
        }
        if let Some(own) = ctx.own_landlord_id() {
            parts.push(Predicate::Leaf(MaintenanceLeaf::LandlordIn(vec![own])));
        }

        Ok(guard.and_with(Predicate::or(parts)))
    }

    pub async fn document_filter(
        &self,
        ctx: &IsolationContext,
    ) -> Result<Predicate<DocumentLeaf>, StoreError> {
        let containment = self.containment(ctx).await?;
        let guard = match containment {
            Containment::Unrestricted => return Ok(Predicate::MatchAll),
            Containment::TenantIdentity(me) => {
                return Ok(Predicate::Leaf(DocumentLeaf::OwnerIs(me)));
            }
            Containment::Landlord(own) => Predicate::Leaf(DocumentLeaf::LandlordIn(vec![own])),
            Containment::PmcLandlords(ids) => Predicate::Leaf(DocumentLeaf::LandlordIn(ids)),
        };

        let mut parts = Vec::new();
        let properties = self.scoped_property_ids(ctx, true).await?;
        if !properties.is_empty() {
            parts.push(Predicate::Leaf(DocumentLeaf::PropertyIn(properties)));
        }
        let landlords = self.scoped_landlords(ctx).await?;
        if !landlords.is_empty() {
            parts.push(Predicate::Leaf(DocumentLeaf::LandlordIn(landlords)));
        }
        if let Some(own) = ctx.own_landlord_id() {
            parts.push(Predicate::Leaf(DocumentLeaf::LandlordIn(vec![own])));
        }

        Ok(guard.and_with(Predicate::or(parts)))
    }

    pub async fn expense_filter(
        &self,
        ctx: &IsolationContext,
    ) -> Result<Predicate<ExpenseLeaf>, StoreError> {
        let containment = self.containment(ctx).await?;
        let guard = match containment {
            Containment::Unrestricted => return Ok(Predicate::MatchAll),
            // Tenants never see property expenses.
            Containment::TenantIdentity(_) => return Ok(Predicate::MatchNone),
            Containment::Landlord(own) => Predicate::Leaf(ExpenseLeaf::LandlordIn(vec![own])),
            Containment::PmcLandlords(ids) => Predicate::Leaf(ExpenseLeaf::LandlordIn(ids)),
        };

        let mut parts = Vec::new();
        let properties = self.scoped_property_ids(ctx, true).await?;
        if !properties.is_empty() {
            parts.push(Predicate::Leaf(ExpenseLeaf::PropertyIn(properties)));
        }
        let landlords = self.scoped_landlords(ctx).await?;
        if !landlords.is_empty() {
            parts.push(Predicate::Leaf(ExpenseLeaf::LandlordIn(landlords)));
        }
        if let Some(own) = ctx.own_landlord_id() {
            parts.push(Predicate::Leaf(ExpenseLeaf::LandlordIn(vec![own])));
        }

        Ok(guard.and_with(Predicate::or(parts)))
    }

    pub async fn lease_filter(
        &self,
        ctx: &IsolationContext,
    ) -> Result<Predicate<LeaseLeaf>, StoreError> {
        let containment = self.containment(ctx).await?;
        let guard = match containment {
            Containment::Unrestricted => return Ok(Predicate::MatchAll),
            Containment::TenantIdentity(me) => {
                return Ok(Predicate::Leaf(LeaseLeaf::TenantIs(me)));
            }
            Containment::Landlord(own) => Predicate::Leaf(LeaseLeaf::LandlordIn(vec![own])),
            Containment::PmcLandlords(ids) => Predicate::Leaf(LeaseLeaf::LandlordIn(ids)),
        };

        let mut parts = Vec::new();
        let properties = self.scoped_property_ids(ctx, true).await?;
        if !properties.is_empty() {
            parts.push(Predicate::Leaf(LeaseLeaf::PropertyIn(properties)));
        }
        let landlords = self.scoped_landlords(ctx).await?;
        if !landlords.is_empty() {
            parts.push(Predicate::Leaf(LeaseLeaf::LandlordIn(landlords)));
        }
        if let Some(own) = ctx.own_landlord_id() {
            parts.push(Predicate::Leaf(LeaseLeaf::LandlordIn(vec![own])));
        }

        Ok(guard.and_with(Predicate::or(parts)))
    }

    /// Payments are reachable only through an already-visible lease: the
    /// lease strategy runs first and its result set feeds the payment
    /// predicate. This is the one place two strategies compose sequentially.
    pub async fn payment_filter(
        &self,
        ctx: &IsolationContext,
    ) -> Result<Predicate<PaymentLeaf>, StoreError> {
        if ctx.role() == Role::Admin {
            return Ok(Predicate::MatchAll);
        }

        let lease_filter = self.lease_filter(ctx).await?;
        if lease_filter == Predicate::MatchNone {
            // Even with no leases, a tenant's own payments stay visible.
            return Ok(match ctx.tenant_identity() {
                Some(me) => Predicate::Leaf(PaymentLeaf::TenantIs(me)),
                None => Predicate::MatchNone,
            });
        }

        let lease_ids = self
            .repos
            .leases
            .list(&lease_filter, Pagination::all())
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect::<Vec<_>>();

        let mut parts = Vec::new();
        if !lease_ids.is_empty() {
            parts.push(Predicate::Leaf(PaymentLeaf::LeaseIn(lease_ids)));
        }
        if let Some(me) = ctx.tenant_identity() {
            parts.push(Predicate::Leaf(PaymentLeaf::TenantIs(me)));
        }

        let disjunction = Predicate::or(parts);
        Ok(match ctx.tenant_identity() {
            // Tenants see their own payments only, never a co-tenant's.
            Some(me) => Predicate::Leaf(PaymentLeaf::TenantIs(me)).and_with(disjunction),
            None => disjunction,
        })
    }
}
