use portal_core::{models::JobId, validation::ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] portal_api::Error),
    #[error(transparent)]
    Session(#[from] persistence::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Input error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("'{0}' is not available to the current user, log in with a suitable account")]
    Forbidden(&'static str),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error("Job {0} belongs to another company")]
    NotOwner(JobId),
}

pub type Result<T> = std::result::Result<T, Error>;
