use std::str::FromStr;

use crate::models::{Application, JobId, JobPosting, JobStatus, UserId, UnknownVariant};
use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Closed,
}

impl StatusFilter {
    fn admits(&self, status: JobStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => status == JobStatus::Open,
            StatusFilter::Closed => status == JobStatus::Closed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "todas" => Ok(StatusFilter::All),
            "open" | "aberta" | "abertas" => Ok(StatusFilter::Open),
            "closed" | "fechada" | "fechadas" => Ok(StatusFilter::Closed),
            _ => Err(UnknownVariant::new("status filter", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" | "recentes" => Ok(SortOrder::Newest),
            "oldest" | "antigas" => Ok(SortOrder::Oldest),
            _ => Err(UnknownVariant::new("sort order", s)),
        }
    }
}

/// A student's application together with the full job it refers to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidacy<'a> {
    pub application: &'a Application,
    pub job: &'a JobPosting,
}

impl Candidacy<'_> {
    pub fn can_cancel(&self) -> bool {
        self.job.is_open()
    }
}

/// The "my applications" view of a student: applications joined with their
/// jobs (dangling ones dropped), filtered by job status, ordered by date.
pub fn my_applications<'a>(
    applications: &'a [Application],
    jobs: &'a [JobPosting],
    student_id: UserId,
    filter: StatusFilter,
    order: SortOrder,
) -> Vec<Candidacy<'a>> {
    let mut candidacies = applications
        .iter()
        .filter(|application| application.student.id == student_id)
        .filter_map(|application| {
            jobs.iter()
                .find(|job| job.id == application.job.id)
                .map(|job| Candidacy { application, job })
        })
        .filter(|candidacy| filter.admits(candidacy.job.status))
        .collect::<Vec<_>>();
    candidacies.sort_by(|a, b| match order {
        SortOrder::Newest => b.application.applied_at.cmp(&a.application.applied_at),
        SortOrder::Oldest => a.application.applied_at.cmp(&b.application.applied_at),
    });
    candidacies
}

pub fn find_application(
    applications: &[Application],
    student_id: UserId,
    job_id: JobId,
) -> Option<&Application> {
    applications
        .iter()
        .find(|application| application.student.id == student_id && application.job.id == job_id)
}

/// Checks a student may apply to `job`: it must be open and not applied to yet.
pub fn check_can_apply(
    applications: &[Application],
    student_id: UserId,
    job: &JobPosting,
) -> Result<(), ValidationError> {
    if !job.is_open() {
        return Err(ValidationError::JobClosed(job.id));
    }
    if find_application(applications, student_id, job.id).is_some() {
        return Err(ValidationError::AlreadyApplied(job.id));
    }
    Ok(())
}

/// One job of the company panel with the applications it received
#[derive(Debug, Clone, PartialEq)]
pub struct PanelEntry<'a> {
    pub job: &'a JobPosting,
    pub candidates: Vec<&'a Application>,
}

pub fn candidates_for(applications: &[Application], job_id: JobId) -> Vec<&Application> {
    applications
        .iter()
        .filter(|application| application.job.id == job_id)
        .collect()
}

pub fn company_panel<'a>(
    jobs: &'a [JobPosting],
    applications: &'a [Application],
    company_id: UserId,
) -> Vec<PanelEntry<'a>> {
    jobs.iter()
        .filter(|job| job.company_id() == Some(company_id))
        .map(|job| PanelEntry {
            job,
            candidates: candidates_for(applications, job.id),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::{ApplicationStatus, CompanyRef, JobRef, StudentRef, WorkMode};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn job(id: JobId, company_id: UserId, status: JobStatus) -> JobPosting {
        JobPosting {
            id,
            title: format!("Job {}", id),
            description: String::new(),
            requirements: String::new(),
            location: String::new(),
            work_mode: WorkMode::Hybrid,
            weekly_hours: 30,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            status,
            interest_areas: vec![],
            company: Some(CompanyRef {
                id: Some(company_id),
                name: format!("Company {}", company_id),
            }),
        }
    }

    fn application(id: i64, student_id: UserId, job_id: JobId, day: u32) -> Application {
        Application {
            id,
            student: StudentRef {
                id: student_id,
                name: format!("Student {}", student_id),
                email: String::new(),
            },
            job: JobRef { id: job_id },
            applied_at: Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
            status: ApplicationStatus::Pending,
        }
    }

    fn fixture() -> (Vec<JobPosting>, Vec<Application>) {
        let jobs = vec![
            job(10, 100, JobStatus::Open),
            job(11, 100, JobStatus::Closed),
            job(12, 200, JobStatus::Open),
        ];
        let applications = vec![
            application(1, 1, 10, 5),
            application(2, 1, 11, 9),
            application(3, 1, 99, 10),
            application(4, 2, 10, 1),
            application(5, 1, 12, 2),
        ];
        (jobs, applications)
    }

    fn ids(candidacies: &[Candidacy]) -> Vec<i64> {
        candidacies.iter().map(|c| c.application.id).collect()
    }

    #[test]
    fn test_my_applications_join_and_order() {
        let (jobs, applications) = fixture();
        let newest = my_applications(&applications, &jobs, 1, StatusFilter::All, SortOrder::Newest);
        // application 3 points to a job that no longer exists
        assert_eq!(ids(&newest), vec![2, 1, 5]);
        let oldest = my_applications(&applications, &jobs, 1, StatusFilter::All, SortOrder::Oldest);
        assert_eq!(ids(&oldest), vec![5, 1, 2]);
    }

    #[test]
    fn test_my_applications_status_filter() {
        let (jobs, applications) = fixture();
        let open = my_applications(&applications, &jobs, 1, StatusFilter::Open, SortOrder::Newest);
        assert_eq!(ids(&open), vec![1, 5]);
        assert!(open.iter().all(|c| c.can_cancel()));
        let closed = my_applications(&applications, &jobs, 1, StatusFilter::Closed, SortOrder::Newest);
        assert_eq!(ids(&closed), vec![2]);
        assert!(!closed[0].can_cancel());
    }

    #[test]
    fn test_check_can_apply() {
        let (jobs, applications) = fixture();
        assert_eq!(
            check_can_apply(&applications, 1, &jobs[0]),
            Err(ValidationError::AlreadyApplied(10))
        );
        assert_eq!(
            check_can_apply(&applications, 3, &jobs[1]),
            Err(ValidationError::JobClosed(11))
        );
        assert_eq!(check_can_apply(&applications, 3, &jobs[0]), Ok(()));
    }

    #[test]
    fn test_company_panel() {
        let (jobs, applications) = fixture();
        let panel = company_panel(&jobs, &applications, 100);
        assert_eq!(panel.len(), 2);
        assert_eq!(panel[0].job.id, 10);
        assert_eq!(
            panel[0].candidates.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![1, 4]
        );
        assert!(panel[1].candidates.iter().all(|a| a.job.id == 11));
        assert!(company_panel(&jobs, &applications, 300).is_empty());
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("abertas".parse::<StatusFilter>(), Ok(StatusFilter::Open));
        assert_eq!("Oldest".parse::<SortOrder>(), Ok(SortOrder::Oldest));
        assert!("recent".parse::<SortOrder>().is_err());
    }
}
