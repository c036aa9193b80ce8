use chrono::NaiveDate;
use futures::future::join_all;

use crate::api::JobBackend;
use crate::lifecycle::StatusCommand;
use crate::models::{JobId, JobPosting};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileFailure {
    pub job_id: JobId,
    pub command: StatusCommand,
    pub message: String,
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub updated: Vec<JobId>,
    pub failures: Vec<ReconcileFailure>,
    /// Set when commands were issued but the collection could not be re-fetched
    pub refetch_error: Option<String>,
}

impl ReconcileReport {
    pub fn issued(&self) -> usize {
        self.updated.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.refetch_error.is_none()
    }
}

#[derive(Debug)]
pub struct Reconciliation {
    pub jobs: Vec<JobPosting>,
    pub report: ReconcileReport,
}

/// Jobs whose stored status disagrees with their date window on `today`
pub fn plan(jobs: &[JobPosting], today: NaiveDate) -> Vec<(JobId, StatusCommand)> {
    jobs.iter()
        .filter_map(|job| job.window(today).command().map(|command| (job.id, command)))
        .collect()
}

async fn issue<B>(backend: &B, job_id: JobId, command: StatusCommand) -> Result<(), B::E>
where
    B: JobBackend + ?Sized,
{
    log::info!("Issuing {:?} for job {}", command, job_id);
    match command {
        StatusCommand::Close => backend.close_job(job_id).await,
        StatusCommand::Reopen => backend.reopen_job(job_id).await,
    }
}

/// Brings every job's stored status in line with its date window.
/// Commands run concurrently; failures are logged and reported but never
/// abort the pass. When anything was issued the authoritative collection is
/// re-fetched, otherwise `jobs` comes back untouched.
pub async fn reconcile<B>(backend: &B, jobs: Vec<JobPosting>, today: NaiveDate) -> Reconciliation
where
    B: JobBackend + ?Sized,
{
    let planned = plan(&jobs, today);
    if planned.is_empty() {
        log::debug!("All {} jobs match their date window", jobs.len());
        return Reconciliation {
            jobs,
            report: ReconcileReport::default(),
        };
    }

    let results = join_all(planned.iter().map(|&(job_id, command)| async move {
        (job_id, command, issue(backend, job_id, command).await)
    }))
    .await;

    let mut report = ReconcileReport::default();
    for (job_id, command, result) in results {
        match result {
            Ok(()) => report.updated.push(job_id),
            Err(e) => {
                log::error!("Failed to {:?} job {}: {}", command, job_id, e);
                report.failures.push(ReconcileFailure {
                    job_id,
                    command,
                    message: e.to_string(),
                });
            }
        }
    }

    let jobs = match backend.list_jobs().await {
        Ok(fresh) => fresh,
        Err(e) => {
            log::error!("Failed to re-fetch jobs after reconciliation: {}", e);
            report.refetch_error = Some(e.to_string());
            jobs
        }
    };
    log::info!(
        "Reconciliation issued {} commands, {} failed",
        report.issued(),
        report.failures.len()
    );
    Reconciliation { jobs, report }
}
