//! # Error Classifier
//!
//! Maps remote API failures onto reconciliation outcomes.
//!
//! The classifier decides whether a failure means "the object is absent",
//! "try again later", or "stop and report". Access-denied classifies with
//! not-found: a caller without visibility into a project cannot distinguish
//! "it does not exist" from "it exists but I cannot see it", and both must
//! drive the same reconciliation path.

use crate::api::ApiError;

/// Reconciliation-level failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The project is genuinely absent.
    NotFound,
    /// The project may exist, but the caller has no visibility into it.
    AccessDenied,
    /// Retryable condition: throttling, deadline pressure.
    Transient,
    /// Protocol violation or unexpected service failure.
    Fatal,
}

impl ErrorClass {
    /// Whether this class drives the "object absent" reconciliation path.
    #[must_use]
    pub fn is_not_found_equivalent(self) -> bool {
        matches!(self, Self::NotFound | Self::AccessDenied)
    }
}

/// Classify a remote API failure.
#[must_use]
pub fn classify(err: &ApiError) -> ErrorClass {
    match err {
        ApiError::ResourceNotFound(_) => ErrorClass::NotFound,
        ApiError::AccessDenied(_) => ErrorClass::AccessDenied,
        ApiError::Throttled(_) => ErrorClass::Transient,
        ApiError::Service(_) | ApiError::Other(_) => ErrorClass::Fatal,
    }
}
