//! # Reconciler
//!
//! Lifecycle verbs driving a remote project toward its local record's
//! desired state.
//!
//! ## Reconciliation Flow
//!
//! 1. The orchestrator issues one verb with a deadline-bearing context, the
//!    record, and a client handle
//! 2. The verb builds the request from the record's desired fields
//! 3. On success the observed state flows back into the record; create and
//!    update chain into a follow-on read
//! 4. On failure the classifier decides between "object absent" (record
//!    soft-deleted, no diagnostic) and a structured diagnostic
//!
//! Every verb returns a `Diagnostics` collection; empty means success. The
//! only errors swallowed by design are the read path's drift-clear and the
//! delete path's already-absent outcome.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::api::{
    ApiError, CreateProjectInput, DeleteProjectInput, ProjectApi, UpdateProjectInput,
};
use crate::context::{DeadlineElapsed, OpContext};
use crate::diag::{Action, Diagnostic, Diagnostics};
use crate::finder::find_project_by_name;
use crate::record::{Field, ProjectRecord};

/// Resource kind tag carried by every diagnostic this module raises.
pub const RESOURCE_PROJECT: &str = "Project";

/// Remote call failure, with the deadline case split out.
enum CallFailure {
    Deadline,
    Api(ApiError),
}

impl CallFailure {
    fn into_diagnostic(self, action: Action, subject: &str) -> Diagnostic {
        match self {
            Self::Deadline => {
                Diagnostic::transient(action, RESOURCE_PROJECT, subject, DeadlineElapsed)
            }
            Self::Api(err) => Diagnostic::fatal(action, RESOURCE_PROJECT, subject, err),
        }
    }
}

/// Run one remote call under the context deadline.
async fn bounded_call<T>(
    cx: &OpContext,
    fut: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, CallFailure> {
    match cx.run(fut).await {
        Ok(result) => result.map_err(CallFailure::Api),
        Err(DeadlineElapsed) => Err(CallFailure::Deadline),
    }
}

/// Create the project described by the record's desired fields.
///
/// Only the identifier is trusted from the create response; the follow-on
/// read populates every observed field. The record is flagged newly created
/// so that read treats a not-found as a protocol violation rather than
/// drift.
pub async fn create(
    cx: &OpContext,
    record: &mut ProjectRecord,
    client: &dyn ProjectApi,
) -> Diagnostics {
    let input = CreateProjectInput {
        space_name: record.space_name().to_string(),
        display_name: record.display_name().to_string(),
        // Defaulted, never omitted: the service rejects absent descriptions.
        description: record.description_or_default().to_string(),
    };

    info!(
        space_name = record.space_name(),
        display_name = record.display_name(),
        "creating project"
    );

    let out = match bounded_call(cx, client.create_project(input)).await {
        Ok(out) => out,
        Err(failure) => {
            return failure
                .into_diagnostic(Action::Creating, record.display_name())
                .into();
        }
    };

    let Some(name) = out.name.filter(|name| !name.is_empty()) else {
        return Diagnostic::fatal(
            Action::Creating,
            RESOURCE_PROJECT,
            record.display_name(),
            "empty output",
        )
        .into();
    };

    record.set_name(name);
    record.set_newly_created(true);

    read(cx, record, client).await
}

/// Refresh the record's observed fields from remote truth.
///
/// A not-found result on a record that is not newly created is drift, not
/// failure: the identifier is cleared and no diagnostic raised. The same
/// result immediately after a successful create is a protocol violation and
/// surfaces as fatal.
pub async fn read(
    cx: &OpContext,
    record: &mut ProjectRecord,
    client: &dyn ProjectApi,
) -> Diagnostics {
    let mut diags = Diagnostics::new();

    let result = match cx
        .run(find_project_by_name(client, record.name(), record.space_name()))
        .await
    {
        Ok(result) => result,
        Err(DeadlineElapsed) => {
            diags.push(Diagnostic::transient(
                Action::Reading,
                RESOURCE_PROJECT,
                record.name(),
                DeadlineElapsed,
            ));
            return diags;
        }
    };

    match result {
        Err(err) if err.is_not_found() && !record.is_newly_created() => {
            warn!(
                name = record.name(),
                space_name = record.space_name(),
                "project not found, clearing local record"
            );
            record.clear_name();
        }
        Err(err) => {
            diags.push(Diagnostic::fatal(
                Action::Reading,
                RESOURCE_PROJECT,
                record.name(),
                err,
            ));
        }
        Ok(out) => {
            let name = out.name.unwrap_or_default();
            record.record_observation(
                &name,
                out.space_name.as_deref(),
                out.description.as_deref(),
            );
        }
    }

    diags
}

/// Push changed mutable fields to the service, then refresh observed state.
///
/// A true no-op when nothing tracked has changed: no remote call is issued.
/// The update request carries the full object; the service does not accept
/// partial patches.
pub async fn update(
    cx: &OpContext,
    record: &mut ProjectRecord,
    client: &dyn ProjectApi,
) -> Diagnostics {
    let mut diags = Diagnostics::new();

    if !record.has_changed(Field::Description) {
        debug!(name = record.name(), "project unchanged, skipping update");
        return diags;
    }

    let input = UpdateProjectInput {
        name: record.name().to_string(),
        space_name: record.space_name().to_string(),
        display_name: record.display_name().to_string(),
        description: record.description_or_default().to_string(),
    };

    debug!(name = record.name(), input = ?input, "updating project");

    if let Err(failure) = bounded_call(cx, client.update_project(input)).await {
        diags.push(failure.into_diagnostic(Action::Updating, record.name()));
        return diags;
    }

    diags.append(read(cx, record, client).await);
    diags
}

/// Remove the project from its space.
///
/// Idempotent under at-least-once invocation: a not-found answer counts as
/// success. Access-denied does not; a caller that cannot see the project
/// has no evidence the delete took effect.
pub async fn delete(
    cx: &OpContext,
    record: &mut ProjectRecord,
    client: &dyn ProjectApi,
) -> Diagnostics {
    let input = DeleteProjectInput {
        name: record.name().to_string(),
        space_name: record.space_name().to_string(),
    };

    info!(
        name = record.name(),
        space_name = record.space_name(),
        "deleting project"
    );

    match bounded_call(cx, client.delete_project(input)).await {
        Ok(()) => {}
        Err(CallFailure::Api(ApiError::ResourceNotFound(_))) => {
            debug!(name = record.name(), "project already absent");
        }
        Err(failure) => {
            return failure.into_diagnostic(Action::Deleting, record.name()).into();
        }
    }

    record.clear_name();
    Diagnostics::new()
}
