//! Shared in-memory fake of the remote project service.
//!
//! The fake stores projects keyed by `(space_name, name)`, assigns
//! identifiers independently of display names (slugged, the way the real
//! service does), counts calls per operation, and lets tests inject
//! failures or latency between reconciliation steps.

#![allow(dead_code, reason = "shared across test binaries; each uses a subset")]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;

use project_reconciler::{
    ApiError, CreateProjectInput, CreateProjectOutput, DeleteProjectInput, GetProjectInput,
    GetProjectOutput, ProjectApi, UpdateProjectInput,
};

static TRACING_INIT: Once = Once::new();

/// Initialize test logging, once across all tests.
///
/// Honors `RUST_LOG`; silent by default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A project as the fake service stores it.
#[derive(Debug, Clone)]
pub struct StoredProject {
    pub name: String,
    pub space_name: String,
    pub display_name: String,
    pub description: String,
}

/// Failure kinds a test can inject per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    NotFound,
    AccessDenied,
    Service,
}

impl Failure {
    fn to_error(self, op: &str) -> ApiError {
        match self {
            Self::NotFound => ApiError::ResourceNotFound(format!("injected not-found during {op}")),
            Self::AccessDenied => ApiError::AccessDenied(format!("injected denial during {op}")),
            Self::Service => ApiError::Service(format!("injected failure during {op}")),
        }
    }
}

#[derive(Debug, Default)]
struct Overrides {
    create: Option<Failure>,
    get: Option<Failure>,
    update: Option<Failure>,
    delete: Option<Failure>,
    /// Acknowledge creates without storing the project.
    drop_created: bool,
    latency: Option<Duration>,
}

/// In-memory `ProjectApi` implementation for integration tests.
#[derive(Debug, Default)]
pub struct FakeProjectApi {
    projects: Mutex<HashMap<(String, String), StoredProject>>,
    overrides: Mutex<Overrides>,
    /// Server-side normalization: substituted for an empty description at
    /// create time.
    default_description: Option<String>,
    create_calls: AtomicUsize,
    get_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl FakeProjectApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake that normalizes empty descriptions to the given value.
    pub fn normalizing_descriptions_to(description: &str) -> Self {
        Self {
            default_description: Some(description.to_string()),
            ..Self::default()
        }
    }

    pub fn fail_create(&self, failure: Failure) {
        self.overrides.lock().expect("overrides lock").create = Some(failure);
    }

    pub fn fail_get(&self, failure: Failure) {
        self.overrides.lock().expect("overrides lock").get = Some(failure);
    }

    pub fn fail_update(&self, failure: Failure) {
        self.overrides.lock().expect("overrides lock").update = Some(failure);
    }

    pub fn fail_delete(&self, failure: Failure) {
        self.overrides.lock().expect("overrides lock").delete = Some(failure);
    }

    pub fn clear_failures(&self) {
        let mut overrides = self.overrides.lock().expect("overrides lock");
        overrides.create = None;
        overrides.get = None;
        overrides.update = None;
        overrides.delete = None;
    }

    /// Make subsequent creates acknowledge without storing anything.
    pub fn drop_created(&self) {
        self.overrides.lock().expect("overrides lock").drop_created = true;
    }

    /// Delay every operation by the given duration.
    pub fn set_latency(&self, latency: Duration) {
        self.overrides.lock().expect("overrides lock").latency = Some(latency);
    }

    /// Place a project directly into the store.
    pub fn seed(&self, project: StoredProject) {
        let key = (project.space_name.clone(), project.name.clone());
        self.projects
            .lock()
            .expect("projects lock")
            .insert(key, project);
    }

    pub fn stored(&self, space_name: &str, name: &str) -> Option<StoredProject> {
        self.projects
            .lock()
            .expect("projects lock")
            .get(&(space_name.to_string(), name.to_string()))
            .cloned()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Service-assigned identifier: slug of the display name.
    fn assign_identifier(display_name: &str) -> String {
        display_name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect()
    }

    async fn apply_latency(&self) {
        let latency = self.overrides.lock().expect("overrides lock").latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn injected(&self, op: &str, pick: impl Fn(&Overrides) -> Option<Failure>) -> Option<ApiError> {
        let overrides = self.overrides.lock().expect("overrides lock");
        pick(&overrides).map(|failure| failure.to_error(op))
    }
}

#[async_trait]
impl ProjectApi for FakeProjectApi {
    async fn create_project(
        &self,
        input: CreateProjectInput,
    ) -> Result<CreateProjectOutput, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_latency().await;
        if let Some(err) = self.injected("create", |o| o.create) {
            return Err(err);
        }

        let name = Self::assign_identifier(&input.display_name);
        let description = if input.description.is_empty() {
            self.default_description.clone().unwrap_or_default()
        } else {
            input.description.clone()
        };

        let drop_created = self.overrides.lock().expect("overrides lock").drop_created;
        if !drop_created {
            self.seed(StoredProject {
                name: name.clone(),
                space_name: input.space_name.clone(),
                display_name: input.display_name,
                description: description.clone(),
            });
        }

        Ok(CreateProjectOutput {
            name: Some(name),
            space_name: Some(input.space_name),
            description: Some(description),
        })
    }

    async fn get_project(&self, input: GetProjectInput) -> Result<GetProjectOutput, ApiError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_latency().await;
        if let Some(err) = self.injected("get", |o| o.get) {
            return Err(err);
        }

        let projects = self.projects.lock().expect("projects lock");
        match projects.get(&(input.space_name.clone(), input.name.clone())) {
            Some(stored) => Ok(GetProjectOutput {
                name: Some(stored.name.clone()),
                space_name: Some(stored.space_name.clone()),
                display_name: Some(stored.display_name.clone()),
                description: Some(stored.description.clone()),
            }),
            None => Err(ApiError::ResourceNotFound(format!(
                "no project {} in space {}",
                input.name, input.space_name
            ))),
        }
    }

    async fn update_project(&self, input: UpdateProjectInput) -> Result<(), ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_latency().await;
        if let Some(err) = self.injected("update", |o| o.update) {
            return Err(err);
        }

        let mut projects = self.projects.lock().expect("projects lock");
        match projects.get_mut(&(input.space_name.clone(), input.name.clone())) {
            Some(stored) => {
                stored.display_name = input.display_name;
                stored.description = input.description;
                Ok(())
            }
            None => Err(ApiError::ResourceNotFound(format!(
                "no project {} in space {}",
                input.name, input.space_name
            ))),
        }
    }

    async fn delete_project(&self, input: DeleteProjectInput) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_latency().await;
        if let Some(err) = self.injected("delete", |o| o.delete) {
            return Err(err);
        }

        let mut projects = self.projects.lock().expect("projects lock");
        match projects.remove(&(input.space_name.clone(), input.name.clone())) {
            Some(_) => Ok(()),
            None => Err(ApiError::ResourceNotFound(format!(
                "project {} already absent from space {}",
                input.name, input.space_name
            ))),
        }
    }
}
