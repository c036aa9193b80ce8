use crate::models::{JobId, JobPosting};

/// Identifies one load of the job collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Latest known snapshot of the job collection.
/// Loads are sequenced: a result is only applied when its ticket is newer
/// than the one behind the current snapshot, so a slow superseded load can
/// never overwrite fresher data.
#[derive(Debug, Default)]
pub struct JobCache {
    issued: u64,
    applied: u64,
    jobs: Vec<JobPosting>,
}

impl JobCache {
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Returns whether the snapshot was replaced
    pub fn apply(&mut self, ticket: LoadTicket, jobs: Vec<JobPosting>) -> bool {
        if ticket.0 <= self.applied {
            log::debug!(
                "Dropping stale job load {} (current snapshot is from load {})",
                ticket.0,
                self.applied
            );
            return false;
        }
        self.applied = ticket.0;
        self.jobs = jobs;
        true
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn find(&self, id: JobId) -> Option<&JobPosting> {
        self.jobs.iter().find(|job| job.id == id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::{JobStatus, WorkMode};
    use chrono::NaiveDate;

    fn job(id: i64) -> JobPosting {
        JobPosting {
            id,
            title: String::from("Estágio"),
            description: String::new(),
            requirements: String::new(),
            location: String::new(),
            work_mode: WorkMode::Remote,
            weekly_hours: 20,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            status: JobStatus::Open,
            interest_areas: vec![],
            company: None,
        }
    }

    #[test]
    fn test_superseded_load_is_dropped() {
        let mut cache = JobCache::default();
        let slow = cache.begin_load();
        let fast = cache.begin_load();
        assert!(cache.apply(fast, vec![job(2)]));
        assert!(!cache.apply(slow, vec![job(1)]));
        assert_eq!(cache.jobs(), &[job(2)]);
        assert!(cache.find(2).is_some());
        assert!(cache.find(1).is_none());
    }

    #[test]
    fn test_loads_in_order_are_applied() {
        let mut cache = JobCache::default();
        let first = cache.begin_load();
        assert!(cache.apply(first, vec![job(1)]));
        let second = cache.begin_load();
        assert!(cache.apply(second, vec![job(1), job(2)]));
        assert_eq!(cache.jobs().len(), 2);
        assert!(!cache.apply(second, vec![]));
    }
}
