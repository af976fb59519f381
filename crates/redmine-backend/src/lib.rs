pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod traits;


pub use client::RedmineClient;
pub use config::{Pagination, RedmineConfig};
pub use error::{RedmineError, Result};
pub use models::*;
pub use traits::TimeEntryTracker;
