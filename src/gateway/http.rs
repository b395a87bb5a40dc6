use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    JobGateway, APPLIED_JOBS_PATH, APPLY_JOB_PATH, JOBS_PATH, SAVED_JOBS_PATH, SAVE_JOB_PATH,
    UNSAVE_JOB_PATH,
};
use crate::auth::AccessToken;
use crate::config::GatewayConfig;
use crate::error::{JobBoardError, Result};
use crate::model::{Job, JobId};

/// Body of the save/unsave/apply calls.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JobIdBody {
    job_id: JobId,
}

/// Direct HTTP access to the API. One attempt per call, no fallback.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| JobBoardError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str, token: Option<&AccessToken>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Sending API request");

        let request = self.client.request(method, url);
        match token {
            Some(token) => request.header(header::AUTHORIZATION, token.bearer()),
            None => request,
        }
    }

    async fn get_json<T>(&self, path: &str, token: Option<&AccessToken>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.request(Method::GET, path, token).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch a job list, dropping records that do not decode as a [`Job`].
    /// Only a body that is not a JSON array fails the whole call.
    async fn get_job_list(&self, path: &str, token: Option<&AccessToken>) -> Result<Vec<Job>> {
        let records: Vec<serde_json::Value> = self.get_json(path, token).await?;
        let total = records.len();

        let jobs: Vec<Job> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.get("id").cloned();
                match serde_json::from_value(record) {
                    Ok(job) => Some(job),
                    Err(e) => {
                        tracing::warn!(path, id = ?id, error = %e, "Skipping undecodable job record");
                        None
                    }
                }
            })
            .collect();

        if jobs.len() < total {
            tracing::warn!(path, kept = jobs.len(), total, "Some job records were skipped");
        }
        Ok(jobs)
    }

    async fn post_job_id(&self, path: &str, job_id: JobId, token: &AccessToken) -> Result<()> {
        let response = self
            .request(Method::POST, path, Some(token))
            .json(&JobIdBody { job_id })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Map non-2xx responses to errors; pass successful ones through.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), %body, "API request rejected");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(JobBoardError::Unauthorized(body)),
        _ => Err(JobBoardError::Api {
            status: status.as_u16(),
            body,
        }),
    }
}

#[async_trait]
impl JobGateway for HttpGateway {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.get_job_list(JOBS_PATH, None).await
    }

    async fn get_job(&self, id: JobId) -> Result<Job> {
        match self.get_json(&format!("{}/{}", JOBS_PATH, id), None).await {
            Err(JobBoardError::Api { status: 404, .. }) => Err(JobBoardError::JobNotFound(id)),
            other => other,
        }
    }

    async fn list_saved_jobs(&self, token: &AccessToken) -> Result<Vec<Job>> {
        self.get_job_list(SAVED_JOBS_PATH, Some(token)).await
    }

    async fn list_applied_jobs(&self, token: &AccessToken) -> Result<Vec<Job>> {
        self.get_job_list(APPLIED_JOBS_PATH, Some(token)).await
    }

    async fn set_saved(&self, id: JobId, saved: bool, token: &AccessToken) -> Result<()> {
        let path = if saved { SAVE_JOB_PATH } else { UNSAVE_JOB_PATH };
        self.post_job_id(path, id, token).await?;
        tracing::info!(job_id = id, saved, "Job save state updated");
        Ok(())
    }

    async fn apply(&self, id: JobId, token: &AccessToken) -> Result<()> {
        self.post_job_id(APPLY_JOB_PATH, id, token).await?;
        tracing::info!(job_id = id, "Applied to job");
        Ok(())
    }
}
