use clap::{Args, Subcommand};
use portal_core::{
    api::JobBackend,
    applications::company_panel,
    models::{AreaId, JobId, JobPosting, WorkMode},
    navigation::Screen,
    validation::JobForm,
    visibility,
};

use crate::{context::App, error::Result};

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// Jobs visible to the current user
    List {
        /// Matches title or company name, case-insensitive
        #[arg(long, default_value = "")]
        search: String,
    },
    Show {
        id: JobId,
    },
    Create {
        #[command(flatten)]
        fields: JobFields,
    },
    /// Edits a job, omitted fields keep their current value
    Edit {
        id: JobId,
        #[command(flatten)]
        fields: JobFields,
    },
    Close {
        id: JobId,
    },
    Reopen {
        id: JobId,
    },
    Delete {
        id: JobId,
    },
}

#[derive(Args, Debug)]
pub struct JobFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    requirements: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// presencial, remoto or hibrido
    #[arg(long)]
    mode: Option<WorkMode>,
    /// Weekly hours, e.g. 30
    #[arg(long)]
    hours: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    start: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    end: Option<String>,
    /// Interest area id, repeat for several
    #[arg(long = "area")]
    areas: Vec<AreaId>,
}

impl JobFields {
    async fn fill(self, app: &App, mut form: JobForm) -> Result<JobForm> {
        let overrides = [
            (self.title, &mut form.title),
            (self.description, &mut form.description),
            (self.requirements, &mut form.requirements),
            (self.location, &mut form.location),
            (self.hours, &mut form.weekly_hours),
            (self.start, &mut form.start_date),
            (self.end, &mut form.end_date),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(mode) = self.mode {
            form.work_mode = mode;
        }
        if !self.areas.is_empty() {
            form.interest_areas = app.areas_by_id(&self.areas).await?;
        }
        Ok(form)
    }
}

fn print_summary(job: &JobPosting) {
    println!(
        "#{:<5} [{}] {} - {} ({} to {})",
        job.id,
        job.status,
        job.title,
        job.company_name().unwrap_or("-"),
        job.start_date,
        job.end_date
    );
}

pub fn print_details(job: &JobPosting) {
    println!("{}", job.title);
    println!("Company:      {}", job.company_name().unwrap_or("-"));
    println!("Status:       {}", job.status);
    println!("Location:     {} ({})", job.location, job.work_mode);
    println!("Weekly hours: {}", job.weekly_hours);
    println!("Period:       {} to {}", job.start_date, job.end_date);
    let areas = job
        .interest_areas
        .iter()
        .map(|area| area.title.as_str())
        .collect::<Vec<_>>();
    println!("Areas:        {}", areas.join(", "));
    println!();
    println!("{}", job.description);
    println!();
    println!("Requirements: {}", job.requirements);
}

pub async fn list(app: &mut App, screen: Screen, search: &str) -> Result<()> {
    app.enter(&screen)?;
    app.load_jobs().await?;
    let viewer = app.viewer().await?;
    let visible = visibility::filter(app.jobs(), &viewer, search);
    if visible.is_empty() {
        println!("No jobs found.");
    }
    for job in visible {
        print_summary(job);
    }
    Ok(())
}

pub async fn run(app: &mut App, command: JobCommand) -> Result<()> {
    match command {
        JobCommand::List { search } => list(app, Screen::Jobs, &search).await?,
        JobCommand::Show { id } => {
            app.load_jobs().await?;
            let job = app.visible_job(id).await?;
            app.enter(&Screen::JobDetails {
                job: Box::new(job.clone()),
            })?;
            print_details(job);
        }
        JobCommand::Create { fields } => {
            app.enter(&Screen::JobForm { editing: None })?;
            let draft = fields.fill(app, JobForm::default()).await?.validate()?;
            app.client.create_job(&draft).await?;
            println!("Job '{}' created.", draft.title);
        }
        JobCommand::Edit { id, fields } => {
            app.load_jobs().await?;
            let job = app.owned_job(id)?.clone();
            app.enter(&Screen::JobForm {
                editing: Some(Box::new(job.clone())),
            })?;
            let draft = fields.fill(app, JobForm::from_job(&job)).await?.validate()?;
            app.client.update_job(id, &draft).await?;
            println!("Job #{} updated.", id);
        }
        JobCommand::Close { id } => {
            app.enter(&Screen::CompanyPanel)?;
            app.load_jobs().await?;
            app.owned_job(id)?;
            app.client.close_job(id).await?;
            println!("Job #{} closed.", id);
        }
        JobCommand::Reopen { id } => {
            app.enter(&Screen::CompanyPanel)?;
            app.load_jobs().await?;
            app.owned_job(id)?;
            app.client.reopen_job(id).await?;
            println!("Job #{} reopened.", id);
        }
        JobCommand::Delete { id } => {
            app.enter(&Screen::CompanyPanel)?;
            app.load_jobs().await?;
            app.owned_job(id)?;
            app.client.delete_job(id).await?;
            println!("Job #{} deleted.", id);
        }
    }
    Ok(())
}

/// The company's own jobs with the applications each one received
pub async fn panel(app: &mut App) -> Result<()> {
    app.enter(&Screen::CompanyPanel)?;
    app.load_jobs().await?;
    let applications = app.client.list_applications().await?;
    let company_id = app.current_user()?.id;
    let panel = company_panel(app.jobs(), &applications, company_id);
    if panel.is_empty() {
        println!("No jobs published yet.");
    }
    for entry in panel {
        print_summary(entry.job);
        for application in entry.candidates {
            println!(
                "        {} <{}> applied {} [{}]",
                application.student.name,
                application.student.email,
                application.applied_at.format("%Y-%m-%d"),
                application.status
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{context::test::{open_app, Backend}, error::Error};

    #[tokio::test]
    async fn test_show_hides_closed_job_from_visitors() {
        let body = r#"[{"id": 1, "titulo": "Estágio Dev", "cargaHoraria": "20 horas",
            "dataInicio": "2000-01-01", "dataFim": "2000-02-01", "status": "FECHADA",
            "empresa": {"id": 7, "nome": "Tech Co"}}]"#;
        let backend = Backend::serve(&[("GET /vagaEstagio", body)]).await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_app(&backend.base_url, dir.path(), None).await;
        match run(&mut app, JobCommand::Show { id: 1 }).await {
            Err(Error::NotFound { kind: "Job", id: 1 }) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
