//! # Finder
//!
//! Fetches current remote project state by identifier, deciding between
//! "object genuinely absent" and "operation failed".
//!
//! Callers never see the raw not-found error from the service: it is
//! wrapped together with the request context so diagnostics can say which
//! lookup was in flight, and so access-denied and not-found collapse into
//! the same absent outcome.

use thiserror::Error;
use tracing::debug;

use crate::api::{ApiError, GetProjectInput, GetProjectOutput, ProjectApi};
use crate::classify::classify;

/// Failures produced by a project lookup.
#[derive(Debug, Error)]
pub enum FindError {
    /// The project is absent (or invisible to the caller). Carries the
    /// original cause and the request that produced it.
    #[error("project {name} not found in space {space_name}")]
    NotFound {
        name: String,
        space_name: String,
        #[source]
        source: ApiError,
    },

    /// The service answered without the mandatory identifying field. The
    /// API contract requires it; its absence is a client/server protocol
    /// mismatch, not a success.
    #[error("empty result for project {name} in space {space_name}")]
    EmptyResult { name: String, space_name: String },

    /// Any other service failure, passed through unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FindError {
    /// Whether this lookup concluded the project is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Fetch the project identified by `name` within `space_name`.
///
/// Returns the observed object unchanged on success.
pub async fn find_project_by_name(
    client: &dyn ProjectApi,
    name: &str,
    space_name: &str,
) -> Result<GetProjectOutput, FindError> {
    let input = GetProjectInput {
        name: name.to_string(),
        space_name: space_name.to_string(),
    };

    debug!(name, space_name, "fetching project state");

    let out = match client.get_project(input).await {
        Ok(out) => out,
        Err(err) if classify(&err).is_not_found_equivalent() => {
            return Err(FindError::NotFound {
                name: name.to_string(),
                space_name: space_name.to_string(),
                source: err,
            });
        }
        Err(err) => return Err(FindError::Api(err)),
    };

    if out.name.as_deref().map_or(true, str::is_empty) {
        return Err(FindError::EmptyResult {
            name: name.to_string(),
            space_name: space_name.to_string(),
        });
    }

    Ok(out)
}
