use std::io::Write;

use clap::Subcommand;
use portal_core::{
    navigation::Screen,
    password,
    validation::{self, AdminRegistration, CompanyRegistration, StudentRegistration},
};

use crate::{context::App, error::Result};

#[derive(Subcommand, Debug)]
pub enum RegisterCommand {
    Student {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cpf: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    Company {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cnpj: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    Admin {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
}

/// Reads one trimmed line from stdin after printing `label`
pub fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

fn password_and_confirmation(password: Option<String>) -> Result<(String, String)> {
    match password {
        Some(password) => Ok((password.clone(), password)),
        None => {
            let password = prompt("Password")?;
            let confirmation = prompt("Confirm password")?;
            Ok((password, confirmation))
        }
    }
}

pub async fn login(app: &mut App, login: String, password: Option<String>) -> Result<()> {
    app.enter(&Screen::Login)?;
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };
    // companies log in with their CNPJ, masked or not
    let login = if login.contains('@') {
        login
    } else {
        validation::digits(&login)
    };
    let session = app.client.login(&login, &password).await?;
    let landing = Screen::landing(session.role);
    println!("Welcome, {}! Start at '{}'.", session.name, landing.title());
    app.start_session(session).await
}

pub async fn logout(app: &mut App) -> Result<()> {
    if app.end_session().await? {
        println!("Logged out.");
    } else {
        println!("Nobody was logged in.");
    }
    Ok(())
}

pub fn whoami(app: &App) {
    match app.session() {
        Some(session) => println!(
            "{} (id {}, {}), home screen '{}'",
            session.name,
            session.id,
            session.role,
            Screen::landing(session.role).title()
        ),
        None => println!("Not logged in."),
    }
}

pub async fn register(app: &App, command: RegisterCommand) -> Result<()> {
    match command {
        RegisterCommand::Student {
            name,
            cpf,
            email,
            password,
        } => {
            app.enter(&Screen::RegisterStudent)?;
            let (password, password_confirmation) = password_and_confirmation(password)?;
            let student = StudentRegistration {
                name,
                cpf,
                email,
                password,
                password_confirmation,
            }
            .validate()?;
            app.client.register_student(&student).await?;
            println!("Student {} registered, you can log in now.", student.name);
        }
        RegisterCommand::Company {
            name,
            cnpj,
            email,
            password,
        } => {
            app.enter(&Screen::RegisterCompany)?;
            let (password, password_confirmation) = password_and_confirmation(password)?;
            if let Some(strength) = password::strength(&password) {
                println!("Password strength: {}", strength);
            }
            let company = CompanyRegistration {
                name,
                cnpj,
                email,
                password,
                password_confirmation,
            }
            .validate()?;
            app.client.register_company(&company).await?;
            println!(
                "Company {} registered, log in with the CNPJ {}.",
                company.name,
                validation::format_cnpj(&company.cnpj)
            );
        }
        RegisterCommand::Admin {
            name,
            email,
            password,
        } => {
            app.enter(&Screen::RegisterAdmin)?;
            let (password, password_confirmation) = password_and_confirmation(password)?;
            let admin = AdminRegistration {
                name,
                email,
                password,
                password_confirmation,
            }
            .validate()?;
            app.client.register_admin(&admin).await?;
            println!("Administrator {} registered.", admin.name);
        }
    }
    Ok(())
}
