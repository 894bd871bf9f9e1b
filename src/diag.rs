//! # Diagnostics
//!
//! Structured failure records returned by the lifecycle verbs.
//!
//! Each diagnostic names the action that was in flight, the resource kind,
//! and the identifier (or display name, before one is assigned) it was
//! operating on. Verbs return a `Diagnostics` collection; an empty
//! collection is success. The collection is ordered and append-only so a
//! verb that fails twice (update, then the follow-on read) reports both.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle action a diagnostic was raised under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Creating,
    Reading,
    Updating,
    Deleting,
    Waiting,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creating => "creating",
            Self::Reading => "reading",
            Self::Updating => "updating",
            Self::Deleting => "deleting",
            Self::Waiting => "waiting",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a failure is terminal or worth retrying on the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Protocol violation or unexpected service failure.
    Fatal,
    /// Deadline or throttling pressure; the caller may retry the verb.
    Transient,
}

/// One structured failure record.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: FailureKind,
    pub action: Action,
    /// Resource kind, e.g. `"Project"`.
    pub resource: &'static str,
    /// Identifier or display name of the instance being reconciled.
    pub subject: String,
    pub detail: String,
    pub raised_at: DateTime<Utc>,
}

impl Diagnostic {
    /// Fatal failure for the given action and subject.
    #[must_use]
    pub fn fatal(
        action: Action,
        resource: &'static str,
        subject: impl Into<String>,
        detail: impl fmt::Display,
    ) -> Self {
        Self::raise(FailureKind::Fatal, action, resource, subject, detail)
    }

    /// Transient failure (deadline, throttling) for the given action.
    #[must_use]
    pub fn transient(
        action: Action,
        resource: &'static str,
        subject: impl Into<String>,
        detail: impl fmt::Display,
    ) -> Self {
        Self::raise(FailureKind::Transient, action, resource, subject, detail)
    }

    fn raise(
        kind: FailureKind,
        action: Action,
        resource: &'static str,
        subject: impl Into<String>,
        detail: impl fmt::Display,
    ) -> Self {
        Self {
            kind,
            action,
            resource,
            subject: subject.into(),
            detail: detail.to_string(),
            raised_at: Utc::now(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}): {}",
            self.action, self.resource, self.subject, self.detail
        )
    }
}

/// Ordered, append-only collection of diagnostics for one verb invocation.
#[derive(Debug, Default, Serialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Move every entry of `other` onto the end of this collection.
    pub fn append(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
