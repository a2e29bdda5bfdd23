//! Scope grants: the raw material of access isolation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentfold_core::{LandlordId, PmcId, PortfolioId, PropertyId, UnitId};

/// A single grant of visibility attached to a principal.
///
/// Each scope carries at most one non-null identifier per kind; a principal
/// may hold many scopes simultaneously (role-assignment driven). Scopes are
/// created and revoked by the RBAC admin workflow — this layer only reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub portfolio_id: Option<PortfolioId>,
    pub property_id: Option<PropertyId>,
    pub unit_id: Option<UnitId>,
    pub pmc_id: Option<PmcId>,
    pub landlord_id: Option<LandlordId>,
    pub granted_at: DateTime<Utc>,
}

impl Scope {
    fn blank() -> Self {
        Self {
            portfolio_id: None,
            property_id: None,
            unit_id: None,
            pmc_id: None,
            landlord_id: None,
            granted_at: Utc::now(),
        }
    }

    pub fn portfolio(id: PortfolioId) -> Self {
        Self {
            portfolio_id: Some(id),
            ..Self::blank()
        }
    }

    pub fn property(id: PropertyId) -> Self {
        Self {
            property_id: Some(id),
            ..Self::blank()
        }
    }

    pub fn unit(id: UnitId) -> Self {
        Self {
            unit_id: Some(id),
            ..Self::blank()
        }
    }

    pub fn pmc(id: PmcId) -> Self {
        Self {
            pmc_id: Some(id),
            ..Self::blank()
        }
    }

    pub fn landlord(id: LandlordId) -> Self {
        Self {
            landlord_id: Some(id),
            ..Self::blank()
        }
    }

    /// A scope with no identifiers set confers no access.
    pub fn is_empty(&self) -> bool {
        self.portfolio_id.is_none()
            && self.property_id.is_none()
            && self.unit_id.is_none()
            && self.pmc_id.is_none()
            && self.landlord_id.is_none()
    }
}
