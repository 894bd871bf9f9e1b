//! # Remote Project API
//!
//! Abstract interface for the remote collaboration service.
//!
//! This trait allows the reconciler to work with any transport (production
//! HTTP client, in-memory fake for tests) through a unified interface. All
//! operations are scoped by the owning space; the service has no global
//! project namespace.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure kinds surfaced by the remote project API.
///
/// Implementations must map transport and service failures onto these
/// variants; the reconciler's classifier only ever sees this enum. The
/// message carried by each variant is the service's own description of the
/// failure.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested project does not exist in the given space.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// The caller has no visibility into the requested project.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The service asked the caller to slow down.
    #[error("request throttled: {0}")]
    Throttled(String),

    /// The service rejected or failed the request for any other reason.
    #[error("service error: {0}")]
    Service(String),

    /// Transport-level failure with an arbitrary upstream cause.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Input for creating a project in a space.
///
/// `description` is always sent, defaulting to the empty string when the
/// caller has none; the service treats an omitted description as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    pub space_name: String,
    pub display_name: String,
    pub description: String,
}

/// Response to a create request.
///
/// Only `name` is trusted from this response; the reconciler re-reads the
/// project for the full observed field set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectOutput {
    /// Service-assigned stable identifier. Mandatory in a well-formed
    /// response; `None` signals a protocol violation.
    pub name: Option<String>,
    #[serde(default)]
    pub space_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for fetching a project by identifier within a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectInput {
    pub name: String,
    pub space_name: String,
}

/// Observed project state as reported by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectOutput {
    /// Mandatory identifying field; `None` signals a protocol violation.
    pub name: Option<String>,
    #[serde(default)]
    pub space_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for updating a project.
///
/// The service requires the full object, not a partial patch, so every
/// mutable field rides along even when unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    pub name: String,
    pub space_name: String,
    pub display_name: String,
    pub description: String,
}

/// Input for deleting a project from a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectInput {
    pub name: String,
    pub space_name: String,
}

/// Client trait for the remote project service.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Create a project; the service assigns the stable identifier.
    async fn create_project(&self, input: CreateProjectInput)
        -> Result<CreateProjectOutput, ApiError>;

    /// Fetch current project state by identifier.
    async fn get_project(&self, input: GetProjectInput) -> Result<GetProjectOutput, ApiError>;

    /// Replace the project's mutable fields with the given full object.
    async fn update_project(&self, input: UpdateProjectInput) -> Result<(), ApiError>;

    /// Remove a project from its space.
    async fn delete_project(&self, input: DeleteProjectInput) -> Result<(), ApiError>;
}
