//! Lifecycle event names and handler-name resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle points a model goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelEvent {
    Retrieved,
    Creating,
    Created,
    Updating,
    Updated,
    Saving,
    Saved,
    Deleting,
    Deleted,
    Trashed,
    ForceDeleting,
    ForceDeleted,
    Restoring,
    Restored,
    Replicating,
}

impl ModelEvent {
    /// Every event, in binding order
    pub const ALL: [ModelEvent; 15] = [
        ModelEvent::Retrieved,
        ModelEvent::Creating,
        ModelEvent::Created,
        ModelEvent::Updating,
        ModelEvent::Updated,
        ModelEvent::Saving,
        ModelEvent::Saved,
        ModelEvent::Deleting,
        ModelEvent::Deleted,
        ModelEvent::Trashed,
        ModelEvent::ForceDeleting,
        ModelEvent::ForceDeleted,
        ModelEvent::Restoring,
        ModelEvent::Restored,
        ModelEvent::Replicating,
    ];

    pub fn all() -> &'static [ModelEvent] {
        &Self::ALL
    }

    /// Event name as the model layer spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelEvent::Retrieved => "retrieved",
            ModelEvent::Creating => "creating",
            ModelEvent::Created => "created",
            ModelEvent::Updating => "updating",
            ModelEvent::Updated => "updated",
            ModelEvent::Saving => "saving",
            ModelEvent::Saved => "saved",
            ModelEvent::Deleting => "deleting",
            ModelEvent::Deleted => "deleted",
            ModelEvent::Trashed => "trashed",
            ModelEvent::ForceDeleting => "forceDeleting",
            ModelEvent::ForceDeleted => "forceDeleted",
            ModelEvent::Restoring => "restoring",
            ModelEvent::Restored => "restored",
            ModelEvent::Replicating => "replicating",
        }
    }

    /// Handler method name for this event, e.g. `onForceDeleting` for prefix `on`.
    pub fn handler_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, capitalize(self.as_str()))
    }
}

impl fmt::Display for ModelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model event: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for ModelEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelEvent::ALL
            .iter()
            .copied()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

/// Uppercase the first character and leave the rest alone.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
