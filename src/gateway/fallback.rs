use async_trait::async_trait;

use super::JobGateway;
use crate::auth::AccessToken;
use crate::config::FallbackConfig;
use crate::error::{JobBoardError, Result};
use crate::model::{fixture_jobs, Job, JobId};

/// Positions of the fixture jobs reported as "applied" when the API is down.
const APPLIED_FIXTURE_RANGE: std::ops::Range<usize> = 3..5;

/// Graceful degradation for a [`JobGateway`].
///
/// | call                | on failure                                    |
/// |---------------------|-----------------------------------------------|
/// | `list_jobs`         | the fixture job set                           |
/// | `get_job`           | matching fixture, else `JobNotFound`          |
/// | `list_saved_jobs`   | empty list                                    |
/// | `list_applied_jobs` | fixtures 4 and 5                              |
/// | writes              | logged and swallowed, unless configured strict |
pub struct FetchWithFixtureFallback<G> {
    inner: G,
    fixtures: Vec<Job>,
    swallow_write_failures: bool,
}

impl<G: JobGateway> FetchWithFixtureFallback<G> {
    pub fn new(inner: G, config: &FallbackConfig) -> Self {
        Self {
            inner,
            fixtures: fixture_jobs(),
            swallow_write_failures: config.swallow_write_failures,
        }
    }

    /// Replace the built-in fixture set.
    pub fn with_fixtures(mut self, fixtures: Vec<Job>) -> Self {
        self.fixtures = fixtures;
        self
    }

    fn applied_fixtures(&self) -> Vec<Job> {
        let end = APPLIED_FIXTURE_RANGE.end.min(self.fixtures.len());
        let start = APPLIED_FIXTURE_RANGE.start.min(end);
        self.fixtures[start..end].to_vec()
    }

    fn write_outcome(&self, operation: &'static str, job_id: JobId, error: JobBoardError) -> Result<()> {
        if self.swallow_write_failures {
            tracing::warn!(operation, job_id, error = %error, "Write failed, ignoring");
            Ok(())
        } else {
            tracing::warn!(operation, job_id, error = %error, "Write failed");
            Err(error)
        }
    }
}

#[async_trait]
impl<G: JobGateway> JobGateway for FetchWithFixtureFallback<G> {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        match self.inner.list_jobs().await {
            Ok(jobs) => Ok(jobs),
            Err(e) => {
                tracing::warn!(error = %e, count = self.fixtures.len(), "Fetching jobs failed, serving fixture jobs");
                Ok(self.fixtures.clone())
            }
        }
    }

    async fn get_job(&self, id: JobId) -> Result<Job> {
        match self.inner.get_job(id).await {
            Ok(job) => Ok(job),
            Err(e) => {
                tracing::warn!(job_id = id, error = %e, "Fetching job failed, looking up fixtures");
                self.fixtures
                    .iter()
                    .find(|job| job.id == id)
                    .cloned()
                    .ok_or(JobBoardError::JobNotFound(id))
            }
        }
    }

    async fn list_saved_jobs(&self, token: &AccessToken) -> Result<Vec<Job>> {
        match self.inner.list_saved_jobs(token).await {
            Ok(jobs) => Ok(jobs),
            Err(e) => {
                tracing::warn!(error = %e, "Fetching saved jobs failed, assuming none");
                Ok(Vec::new())
            }
        }
    }

    async fn list_applied_jobs(&self, token: &AccessToken) -> Result<Vec<Job>> {
        match self.inner.list_applied_jobs(token).await {
            Ok(jobs) => Ok(jobs),
            Err(e) => {
                tracing::warn!(error = %e, "Fetching applied jobs failed, serving fixture subset");
                Ok(self.applied_fixtures())
            }
        }
    }

    async fn set_saved(&self, id: JobId, saved: bool, token: &AccessToken) -> Result<()> {
        match self.inner.set_saved(id, saved, token).await {
            Ok(()) => Ok(()),
            Err(e) => self.write_outcome(if saved { "save" } else { "unsave" }, id, e),
        }
    }

    async fn apply(&self, id: JobId, token: &AccessToken) -> Result<()> {
        match self.inner.apply(id, token).await {
            Ok(()) => Ok(()),
            Err(e) => self.write_outcome("apply", id, e),
        }
    }
}
