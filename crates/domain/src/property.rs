//! Property read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentfold_core::{LandlordId, PortfolioId, PropertyId};

/// A property, the central unit of management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    /// Portfolio the property is grouped under, if any.
    pub portfolio_id: Option<PortfolioId>,
    pub landlord_id: LandlordId,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}
