use clap::Subcommand;
use futures::try_join;
use portal_core::{
    dashboard::DashboardStats,
    models::AreaId,
    navigation::Screen,
    validation::{format_cnpj, format_cpf, AreaForm},
};

use crate::{context::App, error::Result, jobs};

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Totals and jobs per interest area
    Dashboard,
    #[command(subcommand)]
    Areas(AreaCommand),
    Students,
    Companies,
    /// Every job, open or closed
    Jobs {
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AreaCommand {
    List,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    Update {
        id: AreaId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    Delete {
        id: AreaId,
    },
}

const BAR_WIDTH: usize = 30;

async fn dashboard(app: &mut App) -> Result<()> {
    app.enter(&Screen::AdminDashboard)?;
    app.load_jobs().await?;
    let (companies, students, areas) = try_join!(
        app.client.list_companies(),
        app.client.list_students(),
        app.client.list_areas()
    )?;
    let stats = DashboardStats::collect(&companies, &students, app.jobs(), &areas);
    println!("Companies:   {}", stats.companies);
    println!("Students:    {}", stats.students);
    println!("Open jobs:   {}", stats.open_jobs);
    println!("Closed jobs: {}", stats.closed_jobs);
    println!("Total jobs:  {}", stats.total_jobs());
    println!();
    println!("Jobs per interest area");
    let widest = stats
        .jobs_per_area
        .iter()
        .map(|count| count.jobs)
        .max()
        .unwrap_or(0)
        .max(1);
    for count in &stats.jobs_per_area {
        let bar = "#".repeat(count.jobs * BAR_WIDTH / widest);
        println!("{:<24} {:>3} {}", count.name, count.jobs, bar);
    }
    Ok(())
}

async fn areas(app: &App, command: AreaCommand) -> Result<()> {
    app.enter(&Screen::AdminAreas)?;
    match command {
        AreaCommand::List => {
            for area in app.client.list_areas().await? {
                println!("#{:<4} {} - {}", area.id, area.title, area.description);
            }
        }
        AreaCommand::Create { title, description } => {
            let area = AreaForm { title, description }.validate()?;
            app.client.create_area(&area).await?;
            println!("Interest area '{}' created.", area.title);
        }
        AreaCommand::Update {
            id,
            title,
            description,
        } => {
            let area = AreaForm { title, description }.validate()?;
            app.client.update_area(id, &area).await?;
            println!("Interest area #{} updated.", id);
        }
        AreaCommand::Delete { id } => {
            app.client.delete_area(id).await?;
            println!("Interest area #{} deleted.", id);
        }
    }
    Ok(())
}

pub async fn run(app: &mut App, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Dashboard => dashboard(app).await,
        AdminCommand::Areas(command) => areas(app, command).await,
        AdminCommand::Students => {
            app.enter(&Screen::AdminStudents)?;
            for student in app.client.list_students().await? {
                println!(
                    "#{:<5} {} | {} | {}",
                    student.id,
                    student.name,
                    format_cpf(&student.cpf),
                    student.email
                );
            }
            Ok(())
        }
        AdminCommand::Companies => {
            app.enter(&Screen::AdminCompanies)?;
            for company in app.client.list_companies().await? {
                println!(
                    "#{:<5} {} | {} | {}",
                    company.id,
                    company.name,
                    format_cnpj(&company.cnpj),
                    company.email
                );
            }
            Ok(())
        }
        AdminCommand::Jobs { search } => jobs::list(app, Screen::AdminJobs, &search).await,
    }
}
