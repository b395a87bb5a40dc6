//! Outbound access to the job board API.
//!
//! [`HttpGateway`] talks to the API directly and reports every failure.
//! [`FetchWithFixtureFallback`] wraps any gateway and degrades failed reads to
//! built-in data, which is what the store normally runs against.

pub mod fallback;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::AccessToken;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::{Job, JobId};

pub use fallback::FetchWithFixtureFallback;
pub use http::HttpGateway;

pub const JOBS_PATH: &str = "/api/jobs";
pub const SAVED_JOBS_PATH: &str = "/api/users/saved-jobs";
pub const APPLIED_JOBS_PATH: &str = "/api/users/applied-jobs";
pub const SAVE_JOB_PATH: &str = "/api/users/save-job";
pub const UNSAVE_JOB_PATH: &str = "/api/users/unsave-job";
pub const APPLY_JOB_PATH: &str = "/api/users/apply-job";

#[async_trait]
pub trait JobGateway: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    async fn get_job(&self, id: JobId) -> Result<Job>;

    async fn list_saved_jobs(&self, token: &AccessToken) -> Result<Vec<Job>>;

    async fn list_applied_jobs(&self, token: &AccessToken) -> Result<Vec<Job>>;

    /// Save (`saved == true`) or unsave a job for the token's user.
    async fn set_saved(&self, id: JobId, saved: bool, token: &AccessToken) -> Result<()>;

    async fn apply(&self, id: JobId, token: &AccessToken) -> Result<()>;
}

#[async_trait]
impl<T: JobGateway + ?Sized> JobGateway for Arc<T> {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        (**self).list_jobs().await
    }

    async fn get_job(&self, id: JobId) -> Result<Job> {
        (**self).get_job(id).await
    }

    async fn list_saved_jobs(&self, token: &AccessToken) -> Result<Vec<Job>> {
        (**self).list_saved_jobs(token).await
    }

    async fn list_applied_jobs(&self, token: &AccessToken) -> Result<Vec<Job>> {
        (**self).list_applied_jobs(token).await
    }

    async fn set_saved(&self, id: JobId, saved: bool, token: &AccessToken) -> Result<()> {
        (**self).set_saved(id, saved, token).await
    }

    async fn apply(&self, id: JobId, token: &AccessToken) -> Result<()> {
        (**self).apply(id, token).await
    }
}

/// Build the gateway described by `config`: HTTP, wrapped in the fixture
/// fallback unless fallback is disabled.
pub fn build_gateway(config: &ClientConfig) -> Result<Arc<dyn JobGateway>> {
    let http = HttpGateway::new(&config.gateway)?;
    if config.fallback.enabled {
        Ok(Arc::new(FetchWithFixtureFallback::new(http, &config.fallback)))
    } else {
        Ok(Arc::new(http))
    }
}
