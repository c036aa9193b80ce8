use portal_core::{
    models::{
        Application, ApplicationId, AreaId, Company, InterestArea, JobId, JobRef, Session,
        Student, UserId,
    },
    validation::{AreaDraft, JobDraft, NewAdmin, NewCompany, NewStudent},
};
use reqwest::Method;
use serde::Serialize;

use crate::client::{Client, Result};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    senha: &'a str,
}

#[derive(Serialize)]
struct IdRef {
    id: UserId,
}

#[derive(Serialize)]
struct NewApplication {
    #[serde(rename = "estudante")]
    student: IdRef,
    #[serde(rename = "vagaEstagio")]
    job: JobRef,
}

/// Authentication and registration
impl Client {
    /// Logs in with an email (students, admins) or a CNPJ (companies) and
    /// keeps the returned token for later requests.
    pub async fn login(&mut self, login: &str, password: &str) -> Result<Session> {
        let credentials = Credentials {
            email: login,
            senha: password,
        };
        let builder = self.request(Method::POST, "/api/auth/login").json(&credentials);
        let session: Session = self.fetch(builder).await?;
        log::info!("Logged in as {} ({})", session.name, session.role);
        self.set_token(Some(session.token.clone()));
        Ok(session)
    }

    pub async fn register_student(&self, student: &NewStudent) -> Result<()> {
        self.execute(self.request(Method::POST, "/estudante").json(student))
            .await
    }

    pub async fn register_company(&self, company: &NewCompany) -> Result<()> {
        self.execute(self.request(Method::POST, "/empresa").json(company))
            .await
    }

    pub async fn register_admin(&self, admin: &NewAdmin) -> Result<()> {
        self.execute(self.request(Method::POST, "/admin").json(admin))
            .await
    }
}

/// Job postings. Listing, closing and reopening live in the `JobBackend` impl.
impl Client {
    pub async fn create_job(&self, job: &JobDraft) -> Result<()> {
        self.execute(self.authorized(Method::POST, "/vagaEstagio")?.json(job))
            .await
    }

    pub async fn update_job(&self, id: JobId, job: &JobDraft) -> Result<()> {
        let path = format!("/vagaEstagio/{}", id);
        self.execute(self.authorized(Method::PUT, &path)?.json(job))
            .await
    }

    pub async fn delete_job(&self, id: JobId) -> Result<()> {
        let path = format!("/vagaEstagio/{}", id);
        self.execute(self.authorized(Method::DELETE, &path)?).await
    }
}

/// Applications
impl Client {
    pub async fn apply(&self, student_id: UserId, job_id: JobId) -> Result<()> {
        let body = NewApplication {
            student: IdRef { id: student_id },
            job: JobRef { id: job_id },
        };
        self.execute(self.authorized(Method::POST, "/inscricao")?.json(&body))
            .await
    }

    pub async fn list_applications(&self) -> Result<Vec<Application>> {
        self.fetch(self.authorized(Method::GET, "/inscricao")?)
            .await
    }

    pub async fn cancel_application(&self, id: ApplicationId) -> Result<()> {
        let path = format!("/inscricao/{}", id);
        self.execute(self.authorized(Method::DELETE, &path)?).await
    }
}

/// Interest areas
impl Client {
    pub async fn list_areas(&self) -> Result<Vec<InterestArea>> {
        self.fetch(self.request(Method::GET, "/areaInteresse"))
            .await
    }

    pub async fn create_area(&self, area: &AreaDraft) -> Result<()> {
        self.execute(self.authorized(Method::POST, "/areaInteresse")?.json(area))
            .await
    }

    pub async fn update_area(&self, id: AreaId, area: &AreaDraft) -> Result<()> {
        let path = format!("/areaInteresse/{}", id);
        self.execute(self.authorized(Method::PUT, &path)?.json(area))
            .await
    }

    pub async fn delete_area(&self, id: AreaId) -> Result<()> {
        let path = format!("/areaInteresse/{}", id);
        self.execute(self.authorized(Method::DELETE, &path)?).await
    }
}

/// Students and companies
impl Client {
    pub async fn list_students(&self) -> Result<Vec<Student>> {
        self.fetch(self.authorized(Method::GET, "/estudante")?)
            .await
    }

    pub async fn get_student(&self, id: UserId) -> Result<Student> {
        let path = format!("/estudante/{}", id);
        self.fetch(self.authorized(Method::GET, &path)?).await
    }

    /// Replaces the student's interest areas, leaving the rest of the profile as is
    pub async fn update_student_areas(
        &self,
        student: &Student,
        areas: Vec<InterestArea>,
    ) -> Result<()> {
        let updated = Student {
            interest_areas: areas,
            ..student.clone()
        };
        let path = format!("/estudante/{}", student.id);
        self.execute(self.authorized(Method::PUT, &path)?.json(&updated))
            .await
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>> {
        self.fetch(self.authorized(Method::GET, "/empresa")?)
            .await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::test::serve_once;
    use portal_core::models::Role;

    #[tokio::test]
    async fn test_login_keeps_token() {
        let (base_url, server) =
            serve_once(200, r#"{"id": 5, "nome": "Ana", "tipo": "ESTUDANTE", "token": "jwt"}"#)
                .await;
        let mut client = Client::new(&base_url);
        let session = client.login("ana@mail.com", "secret1").await.unwrap();
        assert_eq!(session.role, Role::Student);
        assert!(client.is_authenticated());
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/auth/login HTTP/1.1"));
        assert!(request.ends_with(r#"{"email":"ana@mail.com","senha":"secret1"}"#));
    }

    #[tokio::test]
    async fn test_apply_body() {
        let (base_url, server) = serve_once(201, "{}").await;
        let client = Client::new(&base_url).with_token(Some("jwt".to_owned()));
        client.apply(1, 10).await.unwrap();
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /inscricao HTTP/1.1"));
        assert!(request.ends_with(r#"{"estudante":{"id":1},"vagaEstagio":{"id":10}}"#));
    }

    #[tokio::test]
    async fn test_listing_applications_requires_login() {
        let client = Client::new("http://localhost:8080");
        assert!(matches!(
            client.list_applications().await,
            Err(crate::Error::Unauthenticated)
        ));
    }
}
