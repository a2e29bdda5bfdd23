//! Scope resolution and the per-request isolation context.

use std::sync::Arc;

use tracing::debug;

use rentfold_core::{
    LandlordId, PmcId, PortfolioId, Principal, PrincipalId, PropertyId, Role, TenantId, UnitId,
};
use rentfold_domain::Scope;
use rentfold_store::{ScopeStore, StoreError};

/// Resolves the scopes a principal holds.
///
/// Pure read from the role-assignment store. Storage errors propagate
/// unchanged — isolation must fail closed, so there is no retry here.
#[derive(Clone)]
pub struct ScopeResolver {
    scopes: Arc<dyn ScopeStore>,
}

impl ScopeResolver {
    pub fn new(scopes: Arc<dyn ScopeStore>) -> Self {
        Self { scopes }
    }

    /// All non-empty scopes granted to the principal.
    ///
    /// An empty result means "no access", never "unrestricted". Grants with
    /// no identifiers set confer nothing and are dropped here.
    pub async fn resolve(&self, principal: PrincipalId) -> Result<Vec<Scope>, StoreError> {
        let scopes = self.scopes.scopes_for(principal).await?;
        Ok(scopes.into_iter().filter(|s| !s.is_empty()).collect())
    }
}

/// Per-request snapshot of a principal's identity, role and resolved scopes.
///
/// Built once at the start of request handling and never mutated or cached
/// beyond the request; a scope revoked mid-request may or may not be
/// reflected, which is acceptable by construction.
#[derive(Debug, Clone)]
pub struct IsolationContext {
    principal: Principal,
    scopes: Vec<Scope>,
    pmc_id: Option<PmcId>,
    landlord_id: Option<LandlordId>,
}

impl IsolationContext {
    pub fn principal(&self) -> Principal {
        self.principal
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal.id
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// First PMC membership found in the scope list, if any.
    pub fn pmc_id(&self) -> Option<PmcId> {
        self.pmc_id
    }

    /// First landlord membership found in the scope list, if any.
    pub fn landlord_id(&self) -> Option<LandlordId> {
        self.landlord_id
    }

    /// Every PMC this principal acts for: for `pmc`-role principals their
    /// own identity, plus each membership scope. Deduplicated, never
    /// narrowed to the first grant.
    pub fn effective_pmc_ids(&self) -> Vec<PmcId> {
        let mut ids = Vec::new();
        if self.role() == Role::Pmc {
            ids.push(PmcId::from(self.principal.id));
        }
        for pmc in self.scopes.iter().filter_map(|s| s.pmc_id) {
            if !ids.contains(&pmc) {
                ids.push(pmc);
            }
        }
        ids
    }

    /// The landlord identity of a `landlord`-role principal.
    pub fn own_landlord_id(&self) -> Option<LandlordId> {
        (self.role() == Role::Landlord).then(|| LandlordId::from(self.principal.id))
    }

    /// The tenant identity of a `tenant`-role principal.
    pub fn tenant_identity(&self) -> Option<TenantId> {
        (self.role() == Role::Tenant).then(|| TenantId::from(self.principal.id))
    }

    pub fn portfolio_ids(&self) -> Vec<PortfolioId> {
        self.scopes.iter().filter_map(|s| s.portfolio_id).collect()
    }

    pub fn property_ids(&self) -> Vec<PropertyId> {
        self.scopes.iter().filter_map(|s| s.property_id).collect()
    }

    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.scopes.iter().filter_map(|s| s.unit_id).collect()
    }

    /// All PMCs granted through scopes (not just the first).
    pub fn scoped_pmc_ids(&self) -> Vec<PmcId> {
        self.scopes.iter().filter_map(|s| s.pmc_id).collect()
    }

    /// All landlords granted through scopes (not just the first).
    pub fn scoped_landlord_ids(&self) -> Vec<LandlordId> {
        self.scopes.iter().filter_map(|s| s.landlord_id).collect()
    }
}

/// Builds an [`IsolationContext`] for one request.
#[derive(Clone)]
pub struct ContextBuilder {
    resolver: ScopeResolver,
}

impl ContextBuilder {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self { resolver }
    }

    /// Resolve scopes and snapshot them into a context.
    ///
    /// The derived `pmc_id`/`landlord_id` convenience fields take the first
    /// matching scope in store order. Filter strategies union over *all*
    /// scopes, so a principal legitimately under two PMCs loses nothing;
    /// the multi-membership case is logged for visibility.
    pub async fn build(&self, principal: Principal) -> Result<IsolationContext, StoreError> {
        let scopes = self.resolver.resolve(principal.id).await?;

        let pmc_id = scopes.iter().find_map(|s| s.pmc_id);
        let landlord_id = scopes.iter().find_map(|s| s.landlord_id);

        let distinct_pmcs = scopes
            .iter()
            .filter_map(|s| s.pmc_id)
            .collect::<std::collections::HashSet<_>>()
            .len();
        if distinct_pmcs > 1 {
            debug!(
                principal = %principal.id,
                memberships = distinct_pmcs,
                "principal holds multiple PMC memberships; filters union over all of them"
            );
        }

        Ok(IsolationContext {
            principal,
            scopes,
            pmc_id,
            landlord_id,
        })
    }
}
