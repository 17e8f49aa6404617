//! Server dependencies for handlers (using traits for testability)
//!
//! Constructed once in `main` (or by a test harness) and handed to the
//! router; nothing in the crate reaches for a global store.

use std::sync::Arc;

use crate::kernel::BaseJobStore;

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub job_store: Arc<dyn BaseJobStore>,
}

impl ServerDeps {
    pub fn new(job_store: Arc<dyn BaseJobStore>) -> Self {
        Self { job_store }
    }
}
