//! # Status Poller
//!
//! Repeatable visibility probes and the bounded-retry waiter that drives
//! them.
//!
//! A probe reports one of four typed outcomes instead of a stringly status:
//! pending, present (with a status token), absent, or failed. The waiter
//! polls a probe under a caller-supplied deadline, sleeping a Fibonacci
//! interval between attempts, until a terminal outcome or expiry.
//!
//! Absent is a sentinel outcome, not an error: a deletion wait treats it as
//! terminal while a visibility wait keeps polling through it.

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::time::sleep;

use crate::api::ProjectApi;
use crate::backoff::FibonacciBackoff;
use crate::context::OpContext;
use crate::diag::{Action, Diagnostic};
use crate::finder::{find_project_by_name, FindError};
use crate::reconciler::RESOURCE_PROJECT;

/// Outcome of a single status probe.
#[derive(Debug)]
pub enum Probe<T> {
    /// Not yet in a recognized state; poll again.
    Pending,
    /// Visible, carrying its current status token.
    Present(T),
    /// Confirmed absent (or invisible to the caller).
    Absent,
    /// Non-retryable probe failure; polling must abort.
    Failed(FindError),
}

/// Boxed repeatable probe, callable once per poll cycle.
pub type ProbeFn<'a, T> = Box<dyn FnMut() -> BoxFuture<'a, Probe<T>> + Send + 'a>;

/// Failures terminating a wait.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The deadline elapsed before a terminal outcome. A transient
    /// condition: the caller may wait again with a fresh deadline.
    #[error("deadline elapsed while waiting")]
    DeadlineElapsed,

    /// The probe failed hard; its cause is not retryable.
    #[error(transparent)]
    Probe(FindError),
}

impl WaitError {
    /// Structured failure record for this wait, for orchestrators that
    /// report waits alongside verb diagnostics.
    #[must_use]
    pub fn into_diagnostic(self, subject: impl Into<String>) -> Diagnostic {
        match self {
            Self::DeadlineElapsed => {
                Diagnostic::transient(Action::Waiting, RESOURCE_PROJECT, subject, self)
            }
            Self::Probe(_) => Diagnostic::fatal(Action::Waiting, RESOURCE_PROJECT, subject, self),
        }
    }
}

/// Probe reporting whether the project is visible under its identifier.
///
/// Delegates to the finder. A not-found lookup maps to `Absent` rather than
/// an error; any other finder failure is a hard stop. On success the status
/// token is the project's current identifier.
pub fn status_project<'a>(
    client: &'a dyn ProjectApi,
    name: &'a str,
    space_name: &'a str,
) -> ProbeFn<'a, String> {
    Box::new(move || {
        Box::pin(async move {
            match find_project_by_name(client, name, space_name).await {
                Ok(out) => Probe::Present(out.name.unwrap_or_default()),
                Err(err) if err.is_not_found() => Probe::Absent,
                Err(err) => Probe::Failed(err),
            }
        })
    })
}

/// Bounded-retry combinator generic over the probe's outcome type.
#[derive(Debug)]
pub struct Waiter {
    backoff: FibonacciBackoff,
}

impl Default for Waiter {
    fn default() -> Self {
        Self::new()
    }
}

impl Waiter {
    /// Waiter with the default 1s..15s poll backoff.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backoff: FibonacciBackoff::new(1, 15),
        }
    }

    /// Waiter with a caller-supplied poll backoff.
    #[must_use]
    pub fn with_backoff(backoff: FibonacciBackoff) -> Self {
        Self { backoff }
    }

    /// Poll `probe` until `terminal` accepts an outcome, the probe fails,
    /// or the context deadline elapses.
    ///
    /// `terminal` maps a terminal outcome to the wait's result and returns
    /// `None` for outcomes to poll through. `Failed` probes short-circuit
    /// before `terminal` sees them.
    pub async fn run<T, R>(
        mut self,
        cx: &OpContext,
        mut probe: ProbeFn<'_, T>,
        mut terminal: impl FnMut(Probe<T>) -> Option<R>,
    ) -> Result<R, WaitError> {
        loop {
            if cx.is_expired() {
                return Err(WaitError::DeadlineElapsed);
            }

            let outcome = cx
                .run(probe())
                .await
                .map_err(|_| WaitError::DeadlineElapsed)?;

            match outcome {
                Probe::Failed(err) => return Err(WaitError::Probe(err)),
                outcome => {
                    if let Some(result) = terminal(outcome) {
                        return Ok(result);
                    }
                }
            }

            let pause = self.backoff.next_backoff();
            if cx.run(sleep(pause)).await.is_err() {
                return Err(WaitError::DeadlineElapsed);
            }
        }
    }
}

/// Wait until the project is visible; returns the identifier it reported.
pub async fn wait_project_visible(
    cx: &OpContext,
    client: &dyn ProjectApi,
    name: &str,
    space_name: &str,
) -> Result<String, WaitError> {
    let probe = status_project(client, name, space_name);
    Waiter::new()
        .run(cx, probe, |outcome| match outcome {
            Probe::Present(token) => Some(token),
            _ => None,
        })
        .await
}

/// Wait until the project is confirmed absent.
pub async fn wait_project_removed(
    cx: &OpContext,
    client: &dyn ProjectApi,
    name: &str,
    space_name: &str,
) -> Result<(), WaitError> {
    let probe = status_project(client, name, space_name);
    Waiter::new()
        .run(cx, probe, |outcome| match outcome {
            Probe::Absent => Some(()),
            _ => None,
        })
        .await
}
