use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::{self, InterestArea, JobId, JobPosting, WorkMode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,
    #[error("Invalid CPF: expected 11 digits")]
    InvalidCpf,
    #[error("Invalid CNPJ: expected 14 digits")]
    InvalidCnpj,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Password must have at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Required field missing: '{0}'")]
    MissingField(&'static str),
    #[error("Invalid date for '{0}', expected YYYY-MM-DD")]
    InvalidDate(&'static str),
    #[error("Weekly hours must be a number")]
    InvalidWeeklyHours,
    #[error("Start date must not be after end date")]
    InvertedWindow,
    #[error("Select at least one interest area")]
    NoInterestArea,
    #[error("Job {0} is closed")]
    JobClosed(JobId),
    #[error("Already applied to job {0}")]
    AlreadyApplied(JobId),
    #[error("Applications can only be cancelled while the job is open")]
    CancelClosed,
}

type Result<T> = std::result::Result<T, ValidationError>;

pub const STUDENT_MIN_PASSWORD: usize = 6;
pub const COMPANY_MIN_PASSWORD: usize = 8;
pub const ADMIN_MIN_PASSWORD: usize = 6;

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"\D").unwrap();
    static ref CPF_STEPS: [(Regex, &'static str); 4] = [
        (Regex::new(r"(\d{3})(\d)").unwrap(), "${1}.${2}"),
        (Regex::new(r"(\d{3})(\d)").unwrap(), "${1}.${2}"),
        (Regex::new(r"(\d{3})(\d{1,2})").unwrap(), "${1}-${2}"),
        (Regex::new(r"(-\d{2})\d+?$").unwrap(), "${1}"),
    ];
    static ref CNPJ_STEPS: [(Regex, &'static str); 4] = [
        (Regex::new(r"^(\d{2})(\d)").unwrap(), "${1}.${2}"),
        (Regex::new(r"^(\d{2}\.\d{3})(\d)").unwrap(), "${1}.${2}"),
        (Regex::new(r"^(\d{2}\.\d{3}\.\d{3})(\d)").unwrap(), "${1}/${2}"),
        (Regex::new(r"(\d{4})(\d)").unwrap(), "${1}-${2}"),
    ];
}

pub fn digits(raw: &str) -> String {
    NON_DIGIT.replace_all(raw, "").into_owned()
}

fn apply_mask(raw: &str, steps: &[(Regex, &'static str)]) -> String {
    steps
        .iter()
        .fold(digits(raw), |acc, (re, replacement)| {
            re.replace(&acc, *replacement).into_owned()
        })
}

/// Masks CPF input as `000.000.000-00`; partial input is masked as far as it goes.
pub fn format_cpf(raw: &str) -> String {
    apply_mask(raw, CPF_STEPS.as_slice())
}

/// Masks CNPJ input as `00.000.000/0000-00`; partial input is masked as far as it goes.
pub fn format_cnpj(raw: &str) -> String {
    apply_mask(raw, CNPJ_STEPS.as_slice())
        .chars()
        .take(18)
        .collect()
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    Ok(())
}

fn require_email(email: &str) -> Result<()> {
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn require_password(password: &str, confirmation: &str, min: usize) -> Result<()> {
    if password.chars().count() < min {
        return Err(ValidationError::PasswordTooShort(min));
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct StudentRegistration {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl StudentRegistration {
    pub fn validate(self) -> Result<NewStudent> {
        require_name(&self.name)?;
        let cpf = digits(&self.cpf);
        if cpf.len() != 11 {
            return Err(ValidationError::InvalidCpf);
        }
        require_email(&self.email)?;
        require_password(
            &self.password,
            &self.password_confirmation,
            STUDENT_MIN_PASSWORD,
        )?;
        Ok(NewStudent {
            name: self.name,
            cpf,
            email: self.email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompanyRegistration {
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    #[serde(rename = "nome")]
    pub name: String,
    pub cnpj: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl CompanyRegistration {
    pub fn validate(self) -> Result<NewCompany> {
        require_name(&self.name)?;
        let cnpj = digits(&self.cnpj);
        if cnpj.len() != 14 {
            return Err(ValidationError::InvalidCnpj);
        }
        require_email(&self.email)?;
        require_password(
            &self.password,
            &self.password_confirmation,
            COMPANY_MIN_PASSWORD,
        )?;
        Ok(NewCompany {
            name: self.name,
            cnpj,
            email: self.email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl AdminRegistration {
    pub fn validate(self) -> Result<NewAdmin> {
        require_name(&self.name)?;
        require_email(&self.email)?;
        require_password(
            &self.password,
            &self.password_confirmation,
            ADMIN_MIN_PASSWORD,
        )?;
        Ok(NewAdmin {
            name: self.name,
            email: self.email,
            password: self.password,
        })
    }
}

/// Raw input of the job create/edit form
#[derive(Debug, Clone, Default)]
pub struct JobForm {
    pub editing: Option<JobId>,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub work_mode: WorkMode,
    pub weekly_hours: String,
    pub start_date: String,
    pub end_date: String,
    pub interest_areas: Vec<InterestArea>,
}

impl JobForm {
    /// Prefills the form with an existing job for editing
    pub fn from_job(job: &JobPosting) -> Self {
        Self {
            editing: Some(job.id),
            title: job.title.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            location: job.location.clone(),
            work_mode: job.work_mode,
            weekly_hours: job.weekly_hours.to_string(),
            start_date: job.start_date.format("%Y-%m-%d").to_string(),
            end_date: job.end_date.format("%Y-%m-%d").to_string(),
            interest_areas: job.interest_areas.clone(),
        }
    }

    pub fn validate(self) -> Result<JobDraft> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("start date", &self.start_date)?;
        require("end date", &self.end_date)?;
        require("location", &self.location)?;
        require("weekly hours", &self.weekly_hours)?;
        require("requirements", &self.requirements)?;
        if self.interest_areas.is_empty() {
            return Err(ValidationError::NoInterestArea);
        }
        let start_date =
            models::parse_day(&self.start_date).ok_or(ValidationError::InvalidDate("start date"))?;
        let end_date =
            models::parse_day(&self.end_date).ok_or(ValidationError::InvalidDate("end date"))?;
        if start_date > end_date {
            return Err(ValidationError::InvertedWindow);
        }
        let weekly_hours =
            models::parse_hours(&self.weekly_hours).ok_or(ValidationError::InvalidWeeklyHours)?;
        Ok(JobDraft {
            id: self.editing,
            title: self.title,
            description: self.description,
            requirements: self.requirements,
            location: self.location,
            work_mode: self.work_mode,
            weekly_hours,
            start_date,
            end_date,
            interest_areas: self.interest_areas,
        })
    }
}

/// Validated job payload for create and update requests
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct JobDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "requisitos")]
    pub requirements: String,
    #[serde(rename = "localizacao")]
    pub location: String,
    #[serde(rename = "modalidade")]
    pub work_mode: WorkMode,
    #[serde(rename = "cargaHoraria", serialize_with = "models::hours::serialize")]
    pub weekly_hours: u32,
    #[serde(rename = "dataInicio", serialize_with = "models::day::serialize")]
    pub start_date: NaiveDate,
    #[serde(rename = "dataFim", serialize_with = "models::day::serialize")]
    pub end_date: NaiveDate,
    #[serde(rename = "listAreaInteresse")]
    pub interest_areas: Vec<InterestArea>,
}

#[derive(Debug, Clone, Default)]
pub struct AreaForm {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AreaDraft {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

impl AreaForm {
    pub fn validate(self) -> Result<AreaDraft> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        Ok(AreaDraft {
            title: self.title,
            description: self.description,
        })
    }
}
