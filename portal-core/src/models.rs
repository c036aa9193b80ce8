use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub type JobId = i64;
pub type AreaId = i64;
pub type UserId = i64;
pub type ApplicationId = i64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    #[serde(rename = "ABERTA", alias = "OPEN")]
    Open,
    #[serde(rename = "FECHADA", alias = "CLOSED")]
    Closed,
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Open => write!(f, "open"),
            JobStatus::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkMode {
    #[default]
    #[serde(rename = "PRESENCIAL", alias = "ON_SITE")]
    OnSite,
    #[serde(rename = "REMOTO", alias = "REMOTE")]
    Remote,
    #[serde(rename = "HIBRIDO", alias = "HYBRID")]
    Hybrid,
}

impl FromStr for WorkMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "presencial" | "on-site" | "onsite" | "on_site" => Ok(WorkMode::OnSite),
            "remoto" | "remote" => Ok(WorkMode::Remote),
            "hibrido" | "híbrido" | "hybrid" => Ok(WorkMode::Hybrid),
            _ => Err(UnknownVariant::new("work mode", s)),
        }
    }
}

impl Display for WorkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkMode::OnSite => write!(f, "on-site"),
            WorkMode::Remote => write!(f, "remote"),
            WorkMode::Hybrid => write!(f, "hybrid"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    #[serde(rename = "PENDENTE", alias = "PENDING")]
    Pending,
    #[serde(rename = "EM_ANALISE", alias = "IN_REVIEW")]
    InReview,
    #[serde(rename = "APROVADO", alias = "APPROVED")]
    Approved,
    #[serde(rename = "REJEITADO", alias = "REJECTED")]
    Rejected,
}

impl Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::InReview => write!(f, "in review"),
            ApplicationStatus::Approved => write!(f, "approved"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "ESTUDANTE", alias = "STUDENT")]
    Student,
    #[serde(rename = "EMPRESA", alias = "COMPANY")]
    Company,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "estudante" | "student" => Ok(Role::Student),
            "empresa" | "company" => Ok(Role::Company),
            "admin" | "administrador" => Ok(Role::Admin),
            _ => Err(UnknownVariant::new("role", s)),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Company => write!(f, "company"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InterestArea {
    pub id: AreaId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
}

/// The owning company as embedded in a job posting.
/// Older payloads carry only the company name as a plain string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(from = "CompanyRefRepr")]
pub struct CompanyRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CompanyRefRepr {
    Name(String),
    Full {
        #[serde(default)]
        id: Option<UserId>,
        #[serde(rename = "nome", default)]
        name: String,
    },
}

impl From<CompanyRefRepr> for CompanyRef {
    fn from(repr: CompanyRefRepr) -> Self {
        match repr {
            CompanyRefRepr::Name(name) => Self { id: None, name },
            CompanyRefRepr::Full { id, name } => Self { id, name },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub id: JobId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "requisitos", default)]
    pub requirements: String,
    #[serde(rename = "localizacao", default)]
    pub location: String,
    #[serde(rename = "modalidade", default)]
    pub work_mode: WorkMode,
    #[serde(rename = "cargaHoraria", with = "hours", default)]
    pub weekly_hours: u32,
    #[serde(rename = "dataInicio", with = "day")]
    pub start_date: NaiveDate,
    #[serde(rename = "dataFim", with = "day")]
    pub end_date: NaiveDate,
    pub status: JobStatus,
    #[serde(rename = "listAreaInteresse", default)]
    pub interest_areas: Vec<InterestArea>,
    #[serde(rename = "empresa", default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyRef>,
}

impl JobPosting {
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.name.as_str())
    }

    pub fn company_id(&self) -> Option<UserId> {
        self.company.as_ref().and_then(|c| c.id)
    }

    pub fn area_ids(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.interest_areas.iter().map(|area| area.id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobRef {
    pub id: JobId,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StudentRef {
    pub id: UserId,
    #[serde(rename = "nome", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Application {
    pub id: ApplicationId,
    #[serde(rename = "estudante")]
    pub student: StudentRef,
    #[serde(rename = "vagaEstagio")]
    pub job: JobRef,
    #[serde(rename = "dataInscricao", with = "timestamp")]
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Student {
    pub id: UserId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "listAreaInteresse", default)]
    pub interest_areas: Vec<InterestArea>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: UserId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: UserId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Authenticated user as returned by the login endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: UserId,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "tipo")]
    pub role: Role,
    pub token: String,
}

/// Parses a calendar day, accepting `YYYY-MM-DD` or a full datetime whose
/// time of day is dropped.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.naive_local().date());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|datetime| datetime.date())
}

/// Extracts the number from weekly hours input such as `"30"` or `"30 horas"`.
pub fn parse_hours(raw: &str) -> Option<u32> {
    let digits = raw
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    digits.parse().ok()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub(crate) mod day {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_day(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: '{}'", raw)))
    }
}

pub(crate) mod hours {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(hours: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{} horas", hours))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(hours) => Ok(hours),
            Repr::Text(raw) => super::parse_hours(&raw)
                .ok_or_else(|| D::Error::custom(format!("invalid weekly hours: '{}'", raw))),
        }
    }
}

pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: '{}'", raw)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_job_posting_from_backend_payload() {
        let payload = json!({
            "id": 10,
            "titulo": "Estágio Dev",
            "descricao": "Desenvolvimento web",
            "requisitos": "JavaScript",
            "localizacao": "São Paulo - SP",
            "modalidade": "HIBRIDO",
            "cargaHoraria": "30 horas",
            "dataInicio": "2025-11-01T00:00:00",
            "dataFim": "2025-11-15",
            "status": "ABERTA",
            "listAreaInteresse": [{"id": 1, "titulo": "Tecnologia", "descricao": "TI"}],
            "empresa": {"id": 7, "nome": "Tech Co", "cnpj": "11222333000181"}
        });
        let job: JobPosting = serde_json::from_value(payload).expect("Should deserialize");
        assert_eq!(job.weekly_hours, 30);
        assert_eq!(job.work_mode, WorkMode::Hybrid);
        assert_eq!(job.start_date, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(job.company_name(), Some("Tech Co"));
        assert_eq!(job.company_id(), Some(7));
        assert_eq!(job.area_ids().collect::<Vec<_>>(), vec![1]);
        assert!(job.is_open());
    }

    #[test]
    fn test_company_given_as_plain_name() {
        let company: CompanyRef = serde_json::from_value(json!("Tech Co")).unwrap();
        assert_eq!(company.name, "Tech Co");
        assert_eq!(company.id, None);
    }

    #[test]
    fn test_status_accepts_english_aliases() {
        let status: JobStatus = serde_json::from_value(json!("CLOSED")).unwrap();
        assert_eq!(status, JobStatus::Closed);
        assert_eq!(serde_json::to_value(JobStatus::Open).unwrap(), json!("ABERTA"));
    }

    #[test]
    fn test_weekly_hours_serialized_with_unit() {
        let job: JobPosting = serde_json::from_value(json!({
            "id": 1,
            "titulo": "Estágio",
            "cargaHoraria": 20,
            "dataInicio": "2025-01-01",
            "dataFim": "2025-02-01",
            "status": "FECHADA"
        }))
        .unwrap();
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["cargaHoraria"], json!("20 horas"));
        assert_eq!(value["dataFim"], json!("2025-02-01"));
        assert!(value.get("empresa").is_none());
    }

    #[test]
    fn test_parse_day_truncates_time_of_day() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 20);
        assert_eq!(parse_day("2025-11-20"), expected);
        assert_eq!(parse_day("2025-11-20T23:59:59"), expected);
        assert_eq!(parse_day("2025-11-20T23:59:59.123-03:00"), expected);
        assert_eq!(parse_day("20/11/2025"), None);
    }

    #[test]
    fn test_application_timestamp_formats() {
        let application: Application = serde_json::from_value(json!({
            "id": 3,
            "estudante": {"id": 1, "nome": "Ana", "email": "ana@mail.com"},
            "vagaEstagio": {"id": 10, "titulo": "ignored"},
            "dataInscricao": "2025-11-20T10:30:00",
            "status": "EM_ANALISE"
        }))
        .unwrap();
        assert_eq!(application.status, ApplicationStatus::InReview);
        assert_eq!(application.job.id, 10);
        assert_eq!(
            application.applied_at,
            Utc.with_ymd_and_hms(2025, 11, 20, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_session_from_login_response() {
        let session: Session = serde_json::from_value(json!({
            "id": 5,
            "nome": "Tech Co",
            "tipo": "EMPRESA",
            "token": "jwt"
        }))
        .unwrap();
        assert_eq!(session.role, Role::Company);
        assert_eq!("Empresa".parse::<Role>(), Ok(Role::Company));
        assert!("visitor".parse::<Role>().is_err());
    }
}
