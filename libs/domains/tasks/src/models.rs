use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Task entity - the single resource managed by this domain.
///
/// Every field is optional by design:
/// - `id` is absent until the store assigns one on first save and is
///   immutable afterwards.
/// - `name`, `due_date` and `completed` are optional payload fields. For a
///   merge patch, `None` means "not supplied, leave the stored value alone",
///   which is why `completed` is `Option<bool>` rather than `bool` - an
///   explicit `false` must be distinguishable from an omitted field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier assigned by the store (ObjectId hex)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Task label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Calendar due date, no time-of-day component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Completion flag (unset / true / false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Task {
    /// Apply a merge patch: each field present in `patch` overwrites the
    /// stored value, absent fields are left untouched. The identifier is
    /// never merged.
    pub fn merge_from(&mut self, patch: Task) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(completed) = patch.completed {
            self.completed = Some(completed);
        }
    }
}
