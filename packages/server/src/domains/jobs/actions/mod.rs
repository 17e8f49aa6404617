//! Jobs domain actions - validation and normalization in front of the store
//!
//! Called directly from the HTTP handlers. Actions take raw request input,
//! apply the job rules and return final models.

pub mod create_job;
pub mod normalize;
pub mod queries;
pub mod update_job;

pub use create_job::{create_job, prepare_new_job};
pub use normalize::{clean_tags, normalize_tags, parse_posting_date, DEFAULT_JOB_TYPE};
pub use queries::{delete_job, get_job, list_jobs};
pub use update_job::{prepare_changes, update_job, TAGS_MUST_BE_LIST};
