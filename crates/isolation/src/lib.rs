//! `rentfold-isolation` — scope-based access isolation for reads.
//!
//! This crate sits between API handlers and the storage boundary and
//! guarantees that a principal (landlord, PMC, tenant, admin) only reads
//! records within their assigned organizational scope. It is a pure
//! read-side layer: it builds predicates and answers access checks, and
//! never mutates scopes or resources.
//!
//! Flow per request: authenticate upstream → [`ScopedReader::new`] for the
//! principal → call a `list_*`/`get_*` method → scopes are resolved into an
//! [`IsolationContext`] snapshot → the per-resource filter strategy builds a
//! typed predicate → the constrained query runs against storage.
//!
//! Everything fails closed: an empty scope list yields a match-nothing
//! predicate, a missing resource yields a deny, and a storage error during
//! an access check yields a deny (logged), never an open door.

pub mod access;
pub mod context;
pub mod error;
pub mod filters;
pub mod reader;

#[cfg(test)]
mod integration_tests;

pub use access::{AccessChecker, ResourceRef};
pub use context::{ContextBuilder, IsolationContext, ScopeResolver};
pub use error::QueryError;
pub use filters::FilterStrategies;
pub use reader::ScopedReader;
