use chrono::{Local, NaiveDate};

use crate::models::{JobPosting, JobStatus};

/// Command that brings a job's stored status back in line with its window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCommand {
    Close,
    Reopen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDecision {
    pub desired_status: JobStatus,
    pub needs_update: bool,
}

impl WindowDecision {
    pub fn command(&self) -> Option<StatusCommand> {
        if !self.needs_update {
            return None;
        }
        match self.desired_status {
            JobStatus::Open => Some(StatusCommand::Reopen),
            JobStatus::Closed => Some(StatusCommand::Close),
        }
    }
}

/// Decides whether a job should be open on `today`, both ends of the window
/// inclusive. Dates are calendar days, so time of day never takes part.
pub fn evaluate(
    today: NaiveDate,
    start_date: NaiveDate,
    end_date: NaiveDate,
    current_status: JobStatus,
) -> WindowDecision {
    let desired_status = if start_date <= today && today <= end_date {
        JobStatus::Open
    } else {
        JobStatus::Closed
    };
    WindowDecision {
        desired_status,
        needs_update: desired_status != current_status,
    }
}

/// Local calendar day used for window evaluation
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl JobPosting {
    pub fn window(&self, today: NaiveDate) -> WindowDecision {
        evaluate(today, self.start_date, self.end_date, self.status)
    }
}
