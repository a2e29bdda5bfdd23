//! Unit read model.

use serde::{Deserialize, Serialize};

use rentfold_core::{LandlordId, PropertyId, UnitId};

/// A rentable unit within a property.
///
/// `landlord_id` is denormalized from the parent property so the landlord
/// containment rule can be evaluated without a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub id: UnitId,
    pub property_id: PropertyId,
    pub landlord_id: LandlordId,
    pub label: String,
}
