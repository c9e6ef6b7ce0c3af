//! Queue entry records as returned by the queue-entry REST resource.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A patient's position in a service queue.
///
/// Only the fields the confirm flows and the `list` command need are kept.
/// Nested `{uuid, display}` references from the REST representation are
/// flattened into plain fields on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QueueEntryRepr", rename_all = "camelCase")]
pub struct QueueEntry {
    pub uuid: String,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

impl QueueEntry {
    /// Create an entry with just an identity and display name
    pub fn new(uuid: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            display: display.into(),
            ..Default::default()
        }
    }

    /// Whether the entry has already left the queue
    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }
}

/// A `{uuid, display}` reference to another resource
#[derive(Debug, Clone, Default, Deserialize)]
struct ResourceRef {
    uuid: Option<String>,
    display: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueueEntryRepr {
    uuid: String,
    #[serde(default)]
    display: String,
    patient: Option<ResourceRef>,
    queue: Option<ResourceRef>,
    status: Option<ResourceRef>,
    priority: Option<ResourceRef>,
    started_at: Option<String>,
    ended_at: Option<String>,
}

impl From<QueueEntryRepr> for QueueEntry {
    fn from(repr: QueueEntryRepr) -> Self {
        // Older servers leave the entry's own display empty and only name the patient
        let display = if repr.display.is_empty() {
            repr.patient
                .as_ref()
                .and_then(|p| p.display.clone())
                .unwrap_or_default()
        } else {
            repr.display
        };

        QueueEntry {
            uuid: repr.uuid,
            display,
            patient_uuid: repr.patient.and_then(|p| p.uuid),
            queue: repr.queue.and_then(|q| q.display),
            status: repr.status.and_then(|s| s.display),
            priority: repr.priority.and_then(|p| p.display),
            started_at: repr.started_at,
            ended_at: repr.ended_at,
        }
    }
}

/// The queue actions that go through the confirm flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueActionKind {
    /// Delete the entry from the queue history
    Void,
    /// Remove the patient from the queue
    End,
    /// Revert the entry's last transition
    UndoTransition,
}

impl fmt::Display for QueueActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueActionKind::Void => write!(f, "void"),
            QueueActionKind::End => write!(f, "end"),
            QueueActionKind::UndoTransition => write!(f, "undo-transition"),
        }
    }
}

/// Paged list wrapper used by the REST API
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPage<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub links: Vec<PageLink>,
}

impl<T> ResultsPage<T> {
    /// URI of the following page, if the server reported one
    pub fn next_page(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == "next")
            .map(|l| l.uri.as_str())
    }
}

/// Navigation link attached to a page of results
#[derive(Debug, Clone, Deserialize)]
pub struct PageLink {
    pub rel: String,
    pub uri: String,
}
