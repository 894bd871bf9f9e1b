//! # Operation Context
//!
//! Caller-supplied deadline carrier for lifecycle operations.
//!
//! Every remote call a verb issues runs under the context's deadline; when
//! it elapses, the in-flight call is abandoned and the verb surfaces a
//! transient diagnostic instead of hanging.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

/// Default create timeout, matching the service's typical provisioning time.
pub const DEFAULT_CREATE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Default update timeout.
pub const DEFAULT_UPDATE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Default delete timeout.
pub const DEFAULT_DELETE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// The context's deadline elapsed before the wrapped work finished.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("operation deadline elapsed")]
pub struct DeadlineElapsed;

/// Deadline scope for a single lifecycle operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpContext {
    deadline: Option<Instant>,
}

impl OpContext {
    /// Context with no deadline; remote calls run to completion.
    #[must_use]
    pub fn unbounded() -> Self {
        Self { deadline: None }
    }

    /// Context expiring `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Context expiring at the given instant.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before expiry; `None` when unbounded, zero once expired.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining() == Some(Duration::ZERO)
    }

    /// Run a future under this context's deadline.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, DeadlineElapsed> {
        match self.deadline {
            None => Ok(fut.await),
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| DeadlineElapsed),
        }
    }
}
