//! Rentfold read-model records.
//!
//! The entities in this crate are **externally owned**: they are created,
//! updated and deleted by other subsystems. The isolation layer only reads
//! them, so everything here is a plain projection with the relationship
//! fields the visibility rules need (no commands, no lifecycle logic).

pub mod document;
pub mod expense;
pub mod maintenance;
pub mod payment;
pub mod pmc;
pub mod property;
pub mod scope;
pub mod tenancy;
pub mod unit;

pub use document::DocumentRecord;
pub use expense::ExpenseRecord;
pub use maintenance::{MaintenanceRecord, MaintenanceStatus};
pub use payment::RentPaymentRecord;
pub use pmc::PmcLandlordLink;
pub use property::PropertyRecord;
pub use scope::Scope;
pub use tenancy::{LeaseRecord, LeaseStatus, TenantRecord};
pub use unit::UnitRecord;
