//! # Local Project Record
//!
//! The authoritative desired/observed state container for one project
//! instance.
//!
//! A record holds the caller's desired fields, the service-assigned
//! identifier, and a snapshot of the fields observed at the last read. The
//! snapshot backs change detection: the reconciler asks the record whether a
//! mutable field differs from its last-known value before issuing an update.
//!
//! Records are single-owner; nothing here is synchronized because the
//! orchestrator never runs two lifecycle operations on the same project
//! concurrently.

use serde::{Deserialize, Serialize};

/// Mutable fields a caller may change between reconciliation cycles.
///
/// The identifier and owning space are deliberately not representable here:
/// they can never participate in change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DisplayName,
    Description,
}

/// Snapshot of field values as of the last observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ObservedFields {
    display_name: String,
    /// Normalized: an unset remote description is recorded as empty.
    description: String,
}

/// Desired and last-observed state for a single project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Service-assigned identifier; empty until assigned post-create.
    name: String,
    space_name: String,
    display_name: String,
    /// `None` is "unset" and distinct from `Some("")`.
    description: Option<String>,
    /// True only during the reconciliation cycle immediately following a
    /// create. The caller clears it between cycles.
    #[serde(default)]
    newly_created: bool,
    #[serde(default)]
    observed: Option<ObservedFields>,
}

impl ProjectRecord {
    /// New record with desired fields populated and no remote identity.
    pub fn new(space_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            space_name: space_name.into(),
            display_name: display_name.into(),
            description: None,
            newly_created: false,
            observed: None,
        }
    }

    /// Attach a desired description at construction time.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Soft-delete: forget the remote identity without touching desired
    /// fields.
    pub fn clear_name(&mut self) {
        self.name.clear();
    }

    /// Whether this record represents state believed to exist remotely.
    pub fn exists(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn space_name(&self) -> &str {
        &self.space_name
    }

    pub fn set_space_name(&mut self, space_name: impl Into<String>) {
        self.space_name = space_name.into();
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Desired description as sent to the service: empty when unset.
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn clear_description(&mut self) {
        self.description = None;
    }

    pub fn is_newly_created(&self) -> bool {
        self.newly_created
    }

    pub fn set_newly_created(&mut self, newly_created: bool) {
        self.newly_created = newly_created;
    }

    /// Overwrite observed fields from remote truth and refresh the
    /// change-detection snapshot.
    ///
    /// The display name is intentionally not overwritten: it is
    /// caller-authoritative and only ever flows toward the service.
    pub fn record_observation(
        &mut self,
        name: &str,
        space_name: Option<&str>,
        description: Option<&str>,
    ) {
        self.name = name.to_string();
        if let Some(space) = space_name {
            self.space_name = space.to_string();
        }
        self.description = description.map(str::to_string);
        self.observed = Some(ObservedFields {
            display_name: self.display_name.clone(),
            description: description.unwrap_or("").to_string(),
        });
    }

    /// Whether a mutable field differs from its last-known value.
    ///
    /// A record that has never been observed reports every field changed.
    /// Unset and empty descriptions compare equal, so an untouched record
    /// does not drift against a service that normalizes unset to empty.
    pub fn has_changed(&self, field: Field) -> bool {
        let Some(observed) = &self.observed else {
            return true;
        };
        match field {
            Field::DisplayName => self.display_name != observed.display_name,
            Field::Description => self.description_or_default() != observed.description,
        }
    }
}
