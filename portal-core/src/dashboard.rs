use crate::models::{Company, InterestArea, JobPosting, Student};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaCount {
    pub name: String,
    pub jobs: usize,
}

/// Figures shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub companies: usize,
    pub students: usize,
    pub open_jobs: usize,
    pub closed_jobs: usize,
    /// One entry per interest area, in area order
    pub jobs_per_area: Vec<AreaCount>,
}

impl DashboardStats {
    pub fn collect(
        companies: &[Company],
        students: &[Student],
        jobs: &[JobPosting],
        areas: &[InterestArea],
    ) -> Self {
        let open_jobs = jobs.iter().filter(|job| job.is_open()).count();
        let jobs_per_area = areas
            .iter()
            .map(|area| AreaCount {
                name: area.title.clone(),
                jobs: jobs
                    .iter()
                    .filter(|job| job.area_ids().any(|id| id == area.id))
                    .count(),
            })
            .collect();
        Self {
            companies: companies.len(),
            students: students.len(),
            open_jobs,
            closed_jobs: jobs.len() - open_jobs,
            jobs_per_area,
        }
    }

    pub fn total_jobs(&self) -> usize {
        self.open_jobs + self.closed_jobs
    }
}
