use tracing::debug;
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::config::RedmineConfig;
use crate::error::{RedmineError, Result};
use crate::models::*;

/// Redmine REST API client for time entries
pub struct RedmineClient {
    agent: Agent,
    config: RedmineConfig,
}

impl RedmineClient {
    pub fn new(config: RedmineConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent, config }
    }

    pub fn config(&self) -> &RedmineConfig {
        &self.config
    }

    /// Absolute URL for `path` with the API key attached.
    fn url(&self, path: &str) -> String {
        format!(
            "{}{}?key={}",
            self.config.endpoint,
            path,
            urlencoding::encode(&self.config.api_key)
        )
    }

    /// Like [`Self::url`], plus the configured pagination clause.
    fn list_url(&self, path: &str) -> String {
        format!("{}{}", self.url(path), self.config.pagination.clause())
    }

    /// 404 becomes [`RedmineError::NotFound`]; anything else is handed to
    /// [`Self::check_status`].
    fn check_response(&self, response: Response<Body>, expected: u16) -> Result<Response<Body>> {
        if response.status().as_u16() == 404 {
            debug!("resource not found");
            return Err(RedmineError::NotFound);
        }
        self.check_status(response, expected)
    }

    /// Anything but `expected` is decoded as an `{"errors": [...]}` body.
    fn check_status(
        &self,
        mut response: Response<Body>,
        expected: u16,
    ) -> Result<Response<Body>> {
        let status = response.status().as_u16();
        if status == expected {
            return Ok(response);
        }

        let body = response.body_mut().read_to_string()?;
        let result: ErrorsResult = serde_json::from_str(&body)?;
        debug!(status, errors = result.errors.len(), "redmine returned errors");
        Err(RedmineError::Api {
            status,
            messages: result.errors,
        })
    }

    // ==================== Time Entry Operations ====================

    /// List time entries of a project, honouring the configured pagination
    pub fn time_entries(&self, project_id: u64) -> Result<Vec<TimeEntry>> {
        let path = format!("/projects/{}/time_entries.json", project_id);
        debug!(method = "GET", path = %path, "redmine request");

        let response = self.agent.get(&self.list_url(&path)).call()?;
        debug!(status = response.status().as_u16(), "redmine response");

        let mut response = self.check_response(response, 200)?;
        let body = response.body_mut().read_to_string()?;
        let result: TimeEntriesResult = serde_json::from_str(&body)?;
        Ok(result.time_entries)
    }

    /// Get a single time entry
    pub fn time_entry(&self, id: u64) -> Result<TimeEntry> {
        let path = format!("/time_entries/{}.json", id);
        debug!(method = "GET", path = %path, "redmine request");

        let response = self.agent.get(&self.url(&path)).call()?;
        debug!(status = response.status().as_u16(), "redmine response");

        let mut response = self.check_response(response, 200)?;
        let body = response.body_mut().read_to_string()?;
        let result: TimeEntryResult = serde_json::from_str(&body)?;
        Ok(result.time_entry)
    }

    /// Create a time entry. Returns the entry with its server-assigned id.
    pub fn create_time_entry(&self, entry: &TimeEntry) -> Result<TimeEntry> {
        let payload = entry.request().to_json()?;
        let path = "/time_entries.json";
        debug!(method = "POST", path, "redmine request");

        let response = self
            .agent
            .post(&self.url(path))
            .header("Content-Type", "application/json")
            .send(payload.as_str())?;
        debug!(status = response.status().as_u16(), "redmine response");

        // Create has no special 404 handling: every non-201 carries an error body.
        let mut response = self.check_status(response, 201)?;
        let body = response.body_mut().read_to_string()?;
        let result: TimeEntryResult = serde_json::from_str(&body)?;
        Ok(result.time_entry)
    }

    /// Replace a time entry's writable fields. `entry.id` selects the target.
    pub fn update_time_entry(&self, entry: &TimeEntry) -> Result<()> {
        let payload = entry.request().to_json()?;
        let path = format!("/time_entries/{}.json", entry.id);
        debug!(method = "PUT", path = %path, "redmine request");

        let response = self
            .agent
            .put(&self.url(&path))
            .header("Content-Type", "application/json")
            .send(payload.as_str())?;
        debug!(status = response.status().as_u16(), "redmine response");

        self.check_response(response, 200)?;
        Ok(())
    }

    /// Delete a time entry
    pub fn delete_time_entry(&self, id: u64) -> Result<()> {
        let path = format!("/time_entries/{}.json", id);
        debug!(method = "DELETE", path = %path, "redmine request");

        let response = self
            .agent
            .delete(&self.url(&path))
            .header("Content-Type", "application/json")
            .call()?;
        debug!(status = response.status().as_u16(), "redmine response");

        self.check_response(response, 200)?;
        Ok(())
    }
}
