use async_trait::async_trait;
use portal_core::{
    api::JobBackend,
    models::{JobId, JobPosting},
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Request to '{url}' failed with status {status}: {message}")]
    RequestNotOk {
        status: StatusCode,
        url: String,
        message: String,
    },
    #[error("Not logged in")]
    Unauthenticated,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Deserialize)]
struct ErrorBody {
    mensagem: Option<String>,
}

/// Pulls the backend's `mensagem` out of an error body, if there is one
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.mensagem)
        .filter(|message| !message.trim().is_empty())
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_else(|_| "empty".to_owned());
    log::error!("Request not successful, status code: {}", status);
    log::error!("Request not successful, body: {}", body);
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned()
    });
    Err(Error::RequestNotOk {
        status,
        url,
        message,
    })
}

/// Client for the Portal de Estágios REST backend
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: None,
        }
    }

    /// Attaches the bearer token sent with every later request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request carrying the token when there is one
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Request that must carry a token
    pub(crate) fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        if self.token.is_none() {
            return Err(Error::Unauthenticated);
        }
        Ok(self.request(method, path))
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = check(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<()> {
        check(builder.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl JobBackend for Client {
    type E = Error;

    async fn list_jobs(&self) -> Result<Vec<JobPosting>> {
        self.fetch(self.request(Method::GET, "/vagaEstagio")).await
    }

    async fn close_job(&self, id: JobId) -> Result<()> {
        let path = format!("/vagaEstagio/{}/encerrar", id);
        self.execute(self.authorized(Method::PUT, &path)?).await
    }

    async fn reopen_job(&self, id: JobId) -> Result<()> {
        let path = format!("/vagaEstagio/{}/reabrir", id);
        self.execute(self.authorized(Method::PUT, &path)?).await
    }
}
