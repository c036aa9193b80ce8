pub mod api;
pub mod applications;
pub mod cache;
pub mod dashboard;
pub mod lifecycle;
pub mod models;
pub mod navigation;
pub mod password;
pub mod reconcile;
pub mod resume;
pub mod validation;
pub mod visibility;

pub use api::JobBackend;
pub use models::{JobPosting, JobStatus, Role, Session};
