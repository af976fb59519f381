use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `limit`/`offset` query parameters appended to list calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self { limit, offset }
    }

    /// Query-string fragment, e.g. `&limit=25&offset=50`. Empty when unset.
    pub fn clause(&self) -> String {
        let mut clause = String::new();
        if let Some(limit) = self.limit {
            clause.push_str(&format!("&limit={}", limit));
        }
        if let Some(offset) = self.offset {
            clause.push_str(&format!("&offset={}", offset));
        }
        clause
    }
}

/// Connection settings for a Redmine instance. Fixed once the client is built.
#[derive(Clone, Debug)]
pub struct RedmineConfig {
    pub endpoint: String,
    pub api_key: String,
    pub pagination: Pagination,
    pub timeout: Duration,
}

impl RedmineConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            pagination: Pagination::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.pagination.offset = Some(offset);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
