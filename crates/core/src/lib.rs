//! `rentfold-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the principal/role model, the resource-kind
//! taxonomy, and the domain error model.

pub mod error;
pub mod id;
pub mod principal;
pub mod resource;

pub use error::{DomainError, DomainResult};
pub use id::{
    DocumentId, ExpenseId, LandlordId, LeaseId, MaintenanceId, PaymentId, PmcId, PortfolioId,
    PrincipalId, PropertyId, TenantId, UnitId,
};
pub use principal::{Principal, Role};
pub use resource::ResourceKind;
