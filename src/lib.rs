//! Project Reconciler Library
//!
//! Core reconciliation protocol for projects owned by spaces in a remote
//! collaboration service: the create/read/update/delete state machine, its
//! idempotence and drift-detection rules, and the error-classification
//! policy separating "object absent" from "operation failed".
//!
//! The crate owns no transport and no driver. Callers hand each lifecycle
//! verb a deadline-bearing [`OpContext`], a [`ProjectRecord`] holding
//! desired state, and a [`ProjectApi`] client handle; the verb returns
//! [`Diagnostics`], empty on success. Tests are included in the module
//! files (e.g. `reconciler.rs`) and in `tests/`.

pub mod api;
pub mod backoff;
pub mod classify;
pub mod context;
pub mod diag;
pub mod finder;
pub mod record;
pub mod reconciler;
pub mod wait;

pub use api::{
    ApiError, CreateProjectInput, CreateProjectOutput, DeleteProjectInput, GetProjectInput,
    GetProjectOutput, ProjectApi, UpdateProjectInput,
};
pub use backoff::FibonacciBackoff;
pub use classify::{classify, ErrorClass};
pub use context::{
    DeadlineElapsed, OpContext, DEFAULT_CREATE_TIMEOUT, DEFAULT_DELETE_TIMEOUT,
    DEFAULT_UPDATE_TIMEOUT,
};
pub use diag::{Action, Diagnostic, Diagnostics, FailureKind};
pub use finder::{find_project_by_name, FindError};
pub use record::{Field, ProjectRecord};
pub use reconciler::{create, delete, read, update, RESOURCE_PROJECT};
pub use wait::{
    status_project, wait_project_removed, wait_project_visible, Probe, ProbeFn, WaitError, Waiter,
};
