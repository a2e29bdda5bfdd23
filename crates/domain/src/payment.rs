//! Rent-payment read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentfold_core::{LeaseId, PaymentId, TenantId};

/// A rent payment made against a lease.
///
/// Payments carry no property/landlord fields of their own: they are
/// reachable only through their lease, and scoped reads chain lease
/// visibility into payment visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentPaymentRecord {
    pub id: PaymentId,
    pub lease_id: LeaseId,
    pub tenant_id: TenantId,
    /// Minor currency units (cents).
    pub amount_cents: i64,
    pub paid_at: DateTime<Utc>,
}
