use async_trait::async_trait;
use std::error::Error;

use crate::models::{JobId, JobPosting};

/// The slice of the backend the reconciliation driver talks to
#[async_trait]
pub trait JobBackend: Send + Sync {
    type E: Error + Send + Sync;
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, Self::E>;
    async fn close_job(&self, id: JobId) -> Result<(), Self::E>;
    async fn reopen_job(&self, id: JobId) -> Result<(), Self::E>;
}
