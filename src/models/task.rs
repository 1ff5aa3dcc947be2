//! Task snapshot model and change comparison.

use serde::{Deserialize, Serialize};

/// Sentinel stored when a task carries no description.
pub const NO_DESCRIPTION: &str = "No description";
/// Sentinel stored when a task has no assignee.
pub const NOT_ASSIGNED: &str = "Not assigned";
/// Sentinel stored when a task has no due date.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Tracked fields of one Asana task as last fetched.
///
/// Field names follow the Asana API (`gid`, `due_on`, `permalink_url`) so a
/// flattened snapshot stays byte-compatible with pre-existing state files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskDetails {
    /// Stable Asana task identifier; primary key of the state map.
    pub gid: String,
    /// Task title.
    pub name: String,
    /// Sanitized free-text description, or [`NO_DESCRIPTION`].
    pub notes: String,
    /// Assignee display name, or [`NOT_ASSIGNED`].
    pub assignee: String,
    /// Calendar due date, or [`NOT_SPECIFIED`].
    pub due_on: String,
    /// URL of the task in Asana.
    pub permalink_url: String,
    /// Never populated by the detail fetch. The original integration
    /// compared it anyway; kept so change detection matches that behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl TaskDetails {
    /// Whether any compared field differs from `other`.
    ///
    /// Compares name, notes, assignee, due date, and the (dead) priority
    /// field by string equality.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.name != other.name
            || self.notes != other.notes
            || self.assignee != other.assignee
            || self.due_on != other.due_on
            || self.priority != other.priority
    }
}

/// One task's last-observed state plus its Telegram message correlation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Tracked task fields.
    #[serde(flatten)]
    pub details: TaskDetails,
    /// Identifier of the Telegram message mirroring this task. `None` only
    /// appears in legacy state files written when a send had failed; new
    /// entries are created exclusively after a successful send.
    #[serde(rename = "messageId")]
    pub message_id: Option<i64>,
}

impl TaskSnapshot {
    /// Pair fetched details with the message that now mirrors them.
    #[must_use]
    pub fn new(details: TaskDetails, message_id: i64) -> Self {
        Self {
            details,
            message_id: Some(message_id),
        }
    }
}
