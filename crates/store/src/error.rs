//! Storage boundary errors.

use thiserror::Error;

/// Storage operation error.
///
/// These are **infrastructure errors** (transport, backend, pool) as opposed
/// to domain errors. Isolation code treats any of them as "could not
/// determine" and fails closed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The backend could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
