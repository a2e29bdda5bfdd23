//! Tracing/logging setup shared by rentfold services.
//!
//! Isolation code logs denials and filter construction through `tracing`;
//! this crate owns the process-wide subscriber so every service configures
//! logs the same way.

pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
