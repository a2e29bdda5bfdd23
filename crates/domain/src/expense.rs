//! Expense read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentfold_core::{ExpenseId, LandlordId, PropertyId};

/// A cost incurred against a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub property_id: PropertyId,
    pub landlord_id: LandlordId,
    /// Minor currency units (cents).
    pub amount_cents: i64,
    pub description: String,
    pub incurred_at: DateTime<Utc>,
}
