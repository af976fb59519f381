use crate::client::RedmineClient;
use crate::error::Result;
use crate::models::TimeEntry;

/// Time entry operations, implemented by [`RedmineClient`].
///
/// Front ends depend on this trait rather than the concrete client so they can
/// run against an in-memory implementation in tests.
pub trait TimeEntryTracker: Send + Sync {
    /// List a project's time entries (one page, as configured)
    fn time_entries(&self, project_id: u64) -> Result<Vec<TimeEntry>>;

    /// Get a time entry by ID
    fn time_entry(&self, id: u64) -> Result<TimeEntry>;

    /// Create a time entry, returning it with its assigned ID
    fn create_time_entry(&self, entry: &TimeEntry) -> Result<TimeEntry>;

    /// Update the time entry identified by `entry.id`
    fn update_time_entry(&self, entry: &TimeEntry) -> Result<()>;

    /// Delete a time entry
    fn delete_time_entry(&self, id: u64) -> Result<()>;
}

impl TimeEntryTracker for RedmineClient {
    fn time_entries(&self, project_id: u64) -> Result<Vec<TimeEntry>> {
        RedmineClient::time_entries(self, project_id)
    }

    fn time_entry(&self, id: u64) -> Result<TimeEntry> {
        RedmineClient::time_entry(self, id)
    }

    fn create_time_entry(&self, entry: &TimeEntry) -> Result<TimeEntry> {
        RedmineClient::create_time_entry(self, entry)
    }

    fn update_time_entry(&self, entry: &TimeEntry) -> Result<()> {
        RedmineClient::update_time_entry(self, entry)
    }

    fn delete_time_entry(&self, id: u64) -> Result<()> {
        RedmineClient::delete_time_entry(self, id)
    }
}
