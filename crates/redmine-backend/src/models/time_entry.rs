use serde::{Deserialize, Serialize};

use super::common::{null_as_default, IdName, IdRef};

/// Redmine time entry as returned by the API.
///
/// `spent_on` and `created_on` are both read from the wire key `created_on`,
/// and [`TimeEntry::request`] writes `spent_on` back under that same key.
/// Redmine's own `spent_on` key is never consulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TimeEntryPayload")]
pub struct TimeEntry {
    pub id: u64,
    pub project: IdName,
    pub issue: IdRef,
    pub user: IdName,
    pub activity: IdName,
    pub hours: f32,
    pub spent_on: String,
    pub created_on: String,
    pub updated_on: String,
    pub comments: String,
}

impl TimeEntry {
    /// Build the write payload for create/update. The id is not part of it.
    pub fn request(&self) -> TimeEntryRequest {
        TimeEntryRequest {
            issue_id: self.issue.id,
            project_id: self.project.id,
            spent_on: self.spent_on.clone(),
            hours: self.hours,
            activity_id: self.activity.id,
            comments: self.comments.clone(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TimeEntryPayload {
    #[serde(deserialize_with = "null_as_default")]
    id: u64,
    #[serde(deserialize_with = "null_as_default")]
    project: IdName,
    #[serde(deserialize_with = "null_as_default")]
    issue: IdRef,
    #[serde(deserialize_with = "null_as_default")]
    user: IdName,
    #[serde(deserialize_with = "null_as_default")]
    activity: IdName,
    #[serde(alias = "Hours", deserialize_with = "null_as_default")]
    hours: f32,
    #[serde(deserialize_with = "null_as_default")]
    created_on: String,
    #[serde(deserialize_with = "null_as_default")]
    updated_on: String,
    #[serde(deserialize_with = "null_as_default")]
    comments: String,
}

impl From<TimeEntryPayload> for TimeEntry {
    fn from(payload: TimeEntryPayload) -> Self {
        TimeEntry {
            id: payload.id,
            project: payload.project,
            issue: payload.issue,
            user: payload.user,
            activity: payload.activity,
            hours: payload.hours,
            spent_on: payload.created_on.clone(),
            created_on: payload.created_on,
            updated_on: payload.updated_on,
            comments: payload.comments,
        }
    }
}

/// Write shape for POST/PUT. Zero and empty fields are omitted, `hours` never is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeEntryRequest {
    #[serde(skip_serializing_if = "is_zero")]
    pub issue_id: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub project_id: u64,
    #[serde(rename = "created_on", skip_serializing_if = "String::is_empty")]
    pub spent_on: String,
    pub hours: f32,
    #[serde(skip_serializing_if = "is_zero")]
    pub activity_id: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comments: String,
}

impl TimeEntryRequest {
    /// Serialize wrapped in the `{"time_entry": {...}}` envelope.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&TimeEntryEnvelope { time_entry: self })
    }
}

#[derive(Serialize)]
struct TimeEntryEnvelope<'a> {
    time_entry: &'a TimeEntryRequest,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TimeEntriesResult {
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TimeEntryResult {
    #[serde(default)]
    pub time_entry: TimeEntry,
}
