use std::collections::HashSet;

use crate::models::{AreaId, InterestArea, JobId, JobPosting, Role, Student};

/// Who is looking at the job list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Student { interest_areas: HashSet<AreaId> },
    Company,
    Admin,
}

impl Viewer {
    pub fn student<'a>(areas: impl IntoIterator<Item = &'a InterestArea>) -> Self {
        Viewer::Student {
            interest_areas: areas.into_iter().map(|area| area.id).collect(),
        }
    }

    /// Builds the viewer for a logged-in role. Students without a loaded
    /// profile end up with no interest areas and therefore see nothing.
    pub fn for_role(role: Option<Role>, student: Option<&Student>) -> Self {
        match role {
            None => Viewer::Anonymous,
            Some(Role::Student) => Viewer::student(
                student
                    .map(|s| s.interest_areas.as_slice())
                    .unwrap_or_default(),
            ),
            Some(Role::Company) => Viewer::Company,
            Some(Role::Admin) => Viewer::Admin,
        }
    }

    pub fn admits(&self, job: &JobPosting) -> bool {
        match self {
            Viewer::Anonymous => job.is_open(),
            Viewer::Student { interest_areas } => {
                job.is_open() && job.area_ids().any(|id| interest_areas.contains(&id))
            }
            Viewer::Company | Viewer::Admin => true,
        }
    }
}

fn matches_search(job: &JobPosting, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    job.title.to_lowercase().contains(term)
        || job
            .company_name()
            .map(|name| name.to_lowercase().contains(term))
            .unwrap_or(false)
}

/// Narrows `jobs` to what `viewer` may see, keeping the input order.
pub fn filter<'a>(jobs: &'a [JobPosting], viewer: &Viewer, search_term: &str) -> Vec<&'a JobPosting> {
    let term = search_term.to_lowercase();
    jobs.iter()
        .filter(|job| matches_search(job, &term))
        .filter(|job| viewer.admits(job))
        .collect()
}

/// Looks up one job, hiding it exactly as `filter` would.
pub fn find<'a>(jobs: &'a [JobPosting], viewer: &Viewer, id: JobId) -> Option<&'a JobPosting> {
    jobs.iter()
        .find(|job| job.id == id)
        .filter(|job| viewer.admits(job))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::{CompanyRef, JobStatus, WorkMode};
    use chrono::NaiveDate;

    fn area(id: AreaId) -> InterestArea {
        InterestArea {
            id,
            title: format!("Area {}", id),
            description: String::new(),
        }
    }

    fn job(id: i64, title: &str, company: &str, status: JobStatus, areas: &[AreaId]) -> JobPosting {
        JobPosting {
            id,
            title: title.to_owned(),
            description: String::new(),
            requirements: String::new(),
            location: String::new(),
            work_mode: WorkMode::Remote,
            weekly_hours: 30,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            status,
            interest_areas: areas.iter().copied().map(area).collect(),
            company: Some(CompanyRef {
                id: Some(1),
                name: company.to_owned(),
            }),
        }
    }

    fn ids(jobs: Vec<&JobPosting>) -> Vec<i64> {
        jobs.into_iter().map(|job| job.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let jobs = vec![job(1, "Estágio Dev", "Tech Co", JobStatus::Open, &[1])];
        assert_eq!(ids(filter(&jobs, &Viewer::Anonymous, "dev")), vec![1]);
        assert_eq!(ids(filter(&jobs, &Viewer::Anonymous, "TECH")), vec![1]);
        assert!(filter(&jobs, &Viewer::Anonymous, "marketing").is_empty());
    }

    #[test]
    fn test_search_without_company() {
        let mut orphan = job(1, "Estágio Dev", "", JobStatus::Open, &[]);
        orphan.company = None;
        let jobs = vec![orphan];
        assert!(filter(&jobs, &Viewer::Admin, "tech").is_empty());
        assert_eq!(ids(filter(&jobs, &Viewer::Admin, "")), vec![1]);
    }

    #[test]
    fn test_anonymous_never_sees_closed_jobs() {
        let jobs = vec![
            job(1, "A", "X", JobStatus::Closed, &[1]),
            job(2, "B", "X", JobStatus::Open, &[1]),
            job(3, "C", "X", JobStatus::Closed, &[]),
        ];
        let visible = filter(&jobs, &Viewer::Anonymous, "");
        assert!(visible.iter().all(|job| job.status == JobStatus::Open));
        assert_eq!(ids(visible), vec![2]);
    }

    #[test]
    fn test_student_without_areas_sees_nothing() {
        let jobs = vec![
            job(1, "A", "X", JobStatus::Open, &[1]),
            job(2, "B", "X", JobStatus::Open, &[]),
        ];
        let viewer = Viewer::student(std::iter::empty());
        assert!(filter(&jobs, &viewer, "").is_empty());
        assert_eq!(Viewer::for_role(Some(Role::Student), None), viewer);
    }

    #[test]
    fn test_student_needs_area_intersection() {
        let jobs = vec![job(10, "A", "X", JobStatus::Open, &[2])];
        let areas = [area(1)];
        assert!(filter(&jobs, &Viewer::student(&areas), "").is_empty());

        let jobs = vec![
            job(10, "A", "X", JobStatus::Open, &[2, 3]),
            job(11, "B", "X", JobStatus::Closed, &[3]),
            job(12, "C", "X", JobStatus::Open, &[4]),
            job(13, "D", "X", JobStatus::Open, &[3]),
        ];
        let areas = [area(3)];
        assert_eq!(ids(filter(&jobs, &Viewer::student(&areas), "")), vec![10, 13]);
    }

    #[test]
    fn test_company_and_admin_see_everything_in_order() {
        let jobs = vec![
            job(3, "C", "X", JobStatus::Closed, &[]),
            job(1, "A", "X", JobStatus::Open, &[1]),
            job(2, "B", "Y", JobStatus::Closed, &[2]),
        ];
        assert_eq!(ids(filter(&jobs, &Viewer::Company, "")), vec![3, 1, 2]);
        assert_eq!(ids(filter(&jobs, &Viewer::Admin, "y")), vec![2]);
        assert_eq!(Viewer::for_role(None, None), Viewer::Anonymous);
    }

    #[test]
    fn test_find_hides_what_filter_hides() {
        let jobs = vec![
            job(1, "A", "X", JobStatus::Closed, &[1]),
            job(2, "B", "X", JobStatus::Open, &[2]),
        ];
        assert_eq!(find(&jobs, &Viewer::Anonymous, 1), None);
        assert_eq!(find(&jobs, &Viewer::Anonymous, 2).map(|job| job.id), Some(2));
        let areas = [area(1)];
        let student = Viewer::student(&areas);
        assert_eq!(find(&jobs, &student, 2), None);
        assert_eq!(find(&jobs, &Viewer::Company, 1).map(|job| job.id), Some(1));
        assert_eq!(find(&jobs, &Viewer::Admin, 3), None);
    }
}
