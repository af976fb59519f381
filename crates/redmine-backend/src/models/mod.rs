mod common;
mod time_entry;

pub use common::{IdName, IdRef};
pub use time_entry::{TimeEntry, TimeEntryRequest};

pub(crate) use common::ErrorsResult;
pub(crate) use time_entry::{TimeEntriesResult, TimeEntryResult};
