//! Resource-kind taxonomy for scoped reads.

use serde::{Deserialize, Serialize};

/// Every resource kind the isolation layer can constrain.
///
/// The set is closed on purpose: scoped-read code matches on this enum
/// exhaustively, so adding a kind forces every filter/access path to handle
/// it. There is no "unknown kind ⇒ unfiltered query" escape hatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Property,
    Unit,
    Tenant,
    Maintenance,
    Document,
    Expense,
    Lease,
    RentPayment,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Property => "property",
            ResourceKind::Unit => "unit",
            ResourceKind::Tenant => "tenant",
            ResourceKind::Maintenance => "maintenance",
            ResourceKind::Document => "document",
            ResourceKind::Expense => "expense",
            ResourceKind::Lease => "lease",
            ResourceKind::RentPayment => "rent_payment",
        }
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
