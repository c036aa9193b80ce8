use persistence::SessionStore;
use portal_api::Client;
use portal_core::{
    api::JobBackend,
    cache::JobCache,
    lifecycle,
    models::{AreaId, InterestArea, JobId, JobPosting, Role, Session, Student},
    navigation::Screen,
    reconcile::reconcile,
    visibility::{self, Viewer},
};

use crate::{
    error::{Error, Result},
    settings::Settings,
};

/// Everything a command needs: the backend client, the stored session and
/// the latest job snapshot.
pub struct App {
    pub client: Client,
    store: SessionStore,
    session: Option<Session>,
    cache: JobCache,
    reconcile: bool,
}

impl App {
    pub async fn open(settings: &Settings, reconcile: bool) -> Result<Self> {
        let store = SessionStore::new(&settings.session_file);
        let session = match store.load().await {
            Ok(session) => session,
            // logging in again or out overwrites it
            Err(persistence::Error::Json(e)) => {
                log::warn!(
                    "Ignoring unreadable session file {}: {}",
                    store.path().display(),
                    e
                );
                None
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(session) = &session {
            log::debug!("Resuming session of {} ({})", session.name, session.role);
        }
        let client = Client::new(&settings.api_url)
            .with_token(session.as_ref().map(|session| session.token.clone()));
        Ok(Self {
            client,
            store,
            session,
            cache: JobCache::default(),
            reconcile,
        })
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|session| session.role)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or(Error::Api(portal_api::Error::Unauthenticated))
    }

    /// Fails unless the current user may enter `screen`
    pub fn enter(&self, screen: &Screen) -> Result<()> {
        if !screen.allows(self.role()) {
            return Err(Error::Forbidden(screen.title()));
        }
        log::debug!("Entering '{}'", screen.title());
        Ok(())
    }

    pub async fn start_session(&mut self, session: Session) -> Result<()> {
        self.store.save(&session).await?;
        self.client.set_token(Some(session.token.clone()));
        self.session = Some(session);
        Ok(())
    }

    /// Returns whether a session was stored
    pub async fn end_session(&mut self) -> Result<bool> {
        self.client.set_token(None);
        self.session = None;
        Ok(self.store.clear().await?)
    }

    /// Fetches the job collection and, unless disabled or logged out,
    /// reconciles every job's status with its date window before caching it.
    pub async fn load_jobs(&mut self) -> Result<()> {
        let ticket = self.cache.begin_load();
        let jobs = self.client.list_jobs().await?;
        let jobs = if self.reconcile && self.client.is_authenticated() {
            let result = reconcile(&self.client, jobs, lifecycle::today()).await;
            if !result.report.is_clean() {
                log::warn!(
                    "{} status updates failed, they will be retried on the next load",
                    result.report.failures.len()
                );
            }
            result.jobs
        } else {
            jobs
        };
        self.cache.apply(ticket, jobs);
        Ok(())
    }

    pub fn jobs(&self) -> &[JobPosting] {
        self.cache.jobs()
    }

    pub fn job(&self, id: JobId) -> Result<&JobPosting> {
        self.cache.find(id).ok_or(Error::NotFound { kind: "Job", id })
    }

    /// A cached job, provided the current user would see it listed
    pub async fn visible_job(&self, id: JobId) -> Result<&JobPosting> {
        let viewer = self.viewer().await?;
        visibility::find(self.jobs(), &viewer, id).ok_or(Error::NotFound { kind: "Job", id })
    }

    /// A job of the cache that belongs to the logged-in company
    pub fn owned_job(&self, id: JobId) -> Result<&JobPosting> {
        let company_id = self.current_user()?.id;
        let job = self.job(id)?;
        if job.company_id() != Some(company_id) {
            return Err(Error::NotOwner(id));
        }
        Ok(job)
    }

    pub async fn student_profile(&self) -> Result<Student> {
        let id = self.current_user()?.id;
        Ok(self.client.get_student(id).await?)
    }

    pub async fn viewer(&self) -> Result<Viewer> {
        match self.role() {
            Some(Role::Student) => {
                let profile = self.student_profile().await?;
                Ok(Viewer::for_role(Some(Role::Student), Some(&profile)))
            }
            role => Ok(Viewer::for_role(role, None)),
        }
    }

    /// Resolves area ids against the backend's list, in the order given
    pub async fn areas_by_id(&self, ids: &[AreaId]) -> Result<Vec<InterestArea>> {
        let areas = self.client.list_areas().await?;
        ids.iter()
            .map(|&id| {
                areas
                    .iter()
                    .find(|area| area.id == id)
                    .cloned()
                    .ok_or(Error::NotFound {
                        kind: "Interest area",
                        id,
                    })
            })
            .collect()
    }
}
