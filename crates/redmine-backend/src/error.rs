use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedmineError {
    #[error(transparent)]
    Http(#[from] ureq::Error),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    /// Any 404 on a single-resource call; the response body is not read.
    #[error("Not Found")]
    NotFound,

    /// Unexpected status with a decodable `{"errors": [...]}` body.
    #[error("{}", .messages.join("\n"))]
    Api { status: u16, messages: Vec<String> },
}

impl RedmineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RedmineError::NotFound)
    }

    /// Individual server messages, empty for non-API errors.
    pub fn messages(&self) -> &[String] {
        match self {
            RedmineError::Api { messages, .. } => messages,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, RedmineError>;
