mod admin;
mod auth;
mod context;
mod error;
mod jobs;
mod settings;
mod student;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use portal_core::{
    applications::{SortOrder, StatusFilter},
    models::{AreaId, JobId},
};

use crate::{
    admin::AdminCommand, auth::RegisterCommand, context::App, error::Result, jobs::JobCommand,
    settings::Settings,
};

#[derive(Parser)]
#[command(author, version, about = "Portal de Estágios client", long_about = None)]
struct Cli {
    /// Backend base URL, overrides PORTAL_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Where the login session is kept, overrides PORTAL_SESSION_FILE
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Do not bring job statuses in line with their dates when loading jobs
    #[arg(long, global = true)]
    no_reconcile: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in with an email, or a CNPJ for companies
    Login {
        login: String,
        #[arg(long)]
        password: Option<String>,
    },
    Logout,
    Whoami,
    #[command(subcommand)]
    Register(RegisterCommand),
    #[command(subcommand)]
    Jobs(JobCommand),
    /// Company panel: own jobs and their candidates
    Panel,
    Apply {
        job_id: JobId,
    },
    /// Withdraw an application while the job is still open
    Cancel {
        job_id: JobId,
    },
    MyApplications {
        /// all, open or closed
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// newest or oldest
        #[arg(long, default_value = "newest")]
        order: SortOrder,
    },
    Profile,
    /// Replace the student's interest areas
    SetAreas {
        area_ids: Vec<AreaId>,
    },
    /// Export the student's résumé as HTML
    Resume {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    #[command(subcommand)]
    Admin(AdminCommand),
}

async fn run(args: Cli) -> Result<()> {
    let settings = Settings::from_env().with_overrides(args.api_url, args.session_file);
    log::debug!("Using backend at {}", settings.api_url);
    let mut app = App::open(&settings, !args.no_reconcile).await?;
    match args.command {
        Commands::Login { login, password } => auth::login(&mut app, login, password).await,
        Commands::Logout => auth::logout(&mut app).await,
        Commands::Whoami => {
            auth::whoami(&app);
            Ok(())
        }
        Commands::Register(command) => auth::register(&app, command).await,
        Commands::Jobs(command) => jobs::run(&mut app, command).await,
        Commands::Panel => jobs::panel(&mut app).await,
        Commands::Apply { job_id } => student::apply(&mut app, job_id).await,
        Commands::Cancel { job_id } => student::cancel(&mut app, job_id).await,
        Commands::MyApplications { status, order } => {
            student::list(&mut app, status, order).await
        }
        Commands::Profile => student::profile(&app).await,
        Commands::SetAreas { area_ids } => student::set_areas(&app, area_ids).await,
        Commands::Resume { output } => student::export_resume(&app, output).await,
        Commands::Admin(command) => admin::run(&mut app, command).await,
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();
    if let Err(e) = run(args).await {
        log::debug!("Command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filters_and_globals() {
        let args = Cli::try_parse_from([
            "portal-cli",
            "my-applications",
            "--status",
            "fechadas",
            "--order",
            "oldest",
            "--no-reconcile",
        ])
        .unwrap();
        assert!(args.no_reconcile);
        match args.command {
            Commands::MyApplications { status, order } => {
                assert_eq!(status, StatusFilter::Closed);
                assert_eq!(order, SortOrder::Oldest);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_job_create_collects_areas() {
        let args = Cli::try_parse_from([
            "portal-cli",
            "jobs",
            "create",
            "--title",
            "Estágio Dev",
            "--mode",
            "remoto",
            "--area",
            "1",
            "--area",
            "3",
        ])
        .unwrap();
        assert!(matches!(args.command, Commands::Jobs(JobCommand::Create { .. })));
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["portal-cli", "my-applications", "--status", "maybe"]).is_err());
    }
}
