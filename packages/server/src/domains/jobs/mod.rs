pub mod actions;
pub mod data;
pub mod errors;
pub mod models;

pub use errors::{JobError, JobResult, MISSING_REQUIRED_FIELDS};
pub use models::{Job, JobChanges, JobFilter, JobSort, NewJob};
