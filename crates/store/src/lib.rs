//! `rentfold-store` — storage boundary for scoped reads.
//!
//! This crate defines the typed, composable predicate language that scoped
//! queries are expressed in, the async repository traits the isolation layer
//! reads through, and in-memory implementations for tests/dev. Production
//! deployments implement the same traits over the platform database.

pub mod error;
pub mod filters;
pub mod memory;
pub mod predicate;
pub mod repository;

pub use error::StoreError;
pub use filters::{
    DocumentLeaf, ExpenseLeaf, LeaseLeaf, MaintenanceLeaf, PaymentLeaf, PropertyLeaf, TenantLeaf,
    UnitLeaf,
};
pub use memory::InMemoryStore;
pub use predicate::{LeafMatch, Pagination, Predicate};
pub use repository::{
    DocumentStore, ExpenseStore, LeaseStore, MaintenanceStore, PmcDirectory, PropertyStore,
    RentPaymentStore, Repositories, ScopeStore, TenantStore, UnitStore,
};
