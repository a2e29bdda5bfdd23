//! PMC–landlord management relationships.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentfold_core::{LandlordId, PmcId};

/// A management relationship between a PMC and a landlord.
///
/// A PMC principal is constrained to landlords with an **active** link;
/// deactivated links confer nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PmcLandlordLink {
    pub pmc_id: PmcId,
    pub landlord_id: LandlordId,
    pub active: bool,
    pub since: DateTime<Utc>,
}

impl PmcLandlordLink {
    pub fn new(pmc_id: PmcId, landlord_id: LandlordId) -> Self {
        Self {
            pmc_id,
            landlord_id,
            active: true,
            since: Utc::now(),
        }
    }
}
