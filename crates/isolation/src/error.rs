//! Scoped-read error taxonomy.

use thiserror::Error;

use rentfold_store::StoreError;

/// Outcome of a scoped read that did not produce a record.
///
/// `AccessDenied` deliberately carries no detail: error messages must not
/// leak which scopes exist or why access was refused.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The principal is authenticated but lacks scope for the resource
    /// (403-equivalent).
    #[error("access denied")]
    AccessDenied,

    /// The resource does not exist (404-equivalent). Point reads keep this
    /// distinct from `AccessDenied` except where distinguishing them would
    /// itself leak existence (tenant identities).
    #[error("not found")]
    NotFound,

    /// The storage boundary failed. Propagated unchanged on list paths;
    /// access checks map this to a deny instead.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl QueryError {
    pub fn is_access_denied(&self) -> bool {
        matches!(self, QueryError::AccessDenied)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::NotFound)
    }
}
