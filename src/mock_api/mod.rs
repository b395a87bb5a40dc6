//! In-memory stand-in for the job board API.
//!
//! Serves the same routes the gateway calls, backed by the fixture jobs, with
//! saved/applied lists kept per bearer token. Used for local development and
//! by the integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{JobBoardError, Result};
use crate::gateway::{
    APPLIED_JOBS_PATH, APPLY_JOB_PATH, JOBS_PATH, SAVED_JOBS_PATH, SAVE_JOB_PATH, UNSAVE_JOB_PATH,
};
use crate::model::{fixture_jobs, Job, JobId};

#[derive(Debug, Default, Clone)]
struct UserJobs {
    saved: Vec<JobId>,
    applied: Vec<JobId>,
}

#[derive(Clone)]
pub struct MockApiState {
    jobs: Arc<RwLock<Vec<Job>>>,
    users: Arc<RwLock<HashMap<String, UserJobs>>>,
}

impl Default for MockApiState {
    fn default() -> Self {
        Self::with_jobs(fixture_jobs())
    }
}

impl MockApiState {
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(jobs)),
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn saved_ids(&self, token: &str) -> Vec<JobId> {
        self.users
            .read()
            .await
            .get(token)
            .map(|u| u.saved.clone())
            .unwrap_or_default()
    }

    pub async fn applied_ids(&self, token: &str) -> Vec<JobId> {
        self.users
            .read()
            .await
            .get(token)
            .map(|u| u.applied.clone())
            .unwrap_or_default()
    }

    async fn jobs_by_id(&self, ids: &[JobId]) -> Vec<Job> {
        let jobs = self.jobs.read().await;
        ids.iter()
            .filter_map(|id| jobs.iter().find(|job| job.id == *id).cloned())
            .collect()
    }

    async fn job_exists(&self, id: JobId) -> bool {
        self.jobs.read().await.iter().any(|job| job.id == id)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobIdRequest {
    job_id: JobId,
}

#[derive(Serialize)]
struct ActionResponse {
    success: bool,
    error: Option<String>,
}

impl ActionResponse {
    fn ok() -> (StatusCode, Json<Self>) {
        (
            StatusCode::OK,
            Json(Self {
                success: true,
                error: None,
            }),
        )
    }

    fn failed(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                success: false,
                error: Some(error.into()),
            }),
        )
    }
}

pub fn router(state: MockApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(JOBS_PATH, get(list_jobs_handler))
        .route(&format!("{}/:id", JOBS_PATH), get(get_job_handler))
        .route(SAVED_JOBS_PATH, get(saved_jobs_handler))
        .route(APPLIED_JOBS_PATH, get(applied_jobs_handler))
        .route(SAVE_JOB_PATH, post(save_job_handler))
        .route(UNSAVE_JOB_PATH, post(unsave_job_handler))
        .route(APPLY_JOB_PATH, post(apply_job_handler))
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: MockApiState,
    shutdown: CancellationToken,
) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| JobBoardError::Internal(format!("mock API server failed: {}", e)))
}

pub async fn run_mock_api(
    addr: SocketAddr,
    state: MockApiState,
    shutdown: CancellationToken,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| JobBoardError::Config(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!(addr = %addr, "Starting mock API server");
    serve(listener, state, shutdown).await?;
    tracing::info!("Mock API server stopped");
    Ok(())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

async fn list_jobs_handler(State(state): State<MockApiState>) -> impl IntoResponse {
    Json(state.jobs.read().await.clone())
}

async fn get_job_handler(
    State(state): State<MockApiState>,
    Path(id): Path<JobId>,
) -> impl IntoResponse {
    let jobs = state.jobs.read().await;
    match jobs.iter().find(|job| job.id == id) {
        Some(job) => Json(job.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Job not found").into_response(),
    }
}

async fn saved_jobs_handler(State(state): State<MockApiState>, headers: HeaderMap) -> impl IntoResponse {
    let Some(token) = bearer_token(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let ids = state.saved_ids(&token).await;
    Json(state.jobs_by_id(&ids).await).into_response()
}

async fn applied_jobs_handler(
    State(state): State<MockApiState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(token) = bearer_token(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let ids = state.applied_ids(&token).await;
    Json(state.jobs_by_id(&ids).await).into_response()
}

async fn save_job_handler(
    State(state): State<MockApiState>,
    headers: HeaderMap,
    Json(payload): Json<JobIdRequest>,
) -> impl IntoResponse {
    let Some(token) = bearer_token(&headers) else {
        return ActionResponse::failed(StatusCode::UNAUTHORIZED, "Missing bearer token");
    };
    if !state.job_exists(payload.job_id).await {
        return ActionResponse::failed(StatusCode::NOT_FOUND, "Job not found");
    }

    let mut users = state.users.write().await;
    let user = users.entry(token).or_default();
    if !user.saved.contains(&payload.job_id) {
        user.saved.push(payload.job_id);
    }
    tracing::debug!(job_id = payload.job_id, "Job saved");
    ActionResponse::ok()
}

async fn unsave_job_handler(
    State(state): State<MockApiState>,
    headers: HeaderMap,
    Json(payload): Json<JobIdRequest>,
) -> impl IntoResponse {
    let Some(token) = bearer_token(&headers) else {
        return ActionResponse::failed(StatusCode::UNAUTHORIZED, "Missing bearer token");
    };

    if let Some(user) = state.users.write().await.get_mut(&token) {
        user.saved.retain(|id| *id != payload.job_id);
    }
    tracing::debug!(job_id = payload.job_id, "Job unsaved");
    ActionResponse::ok()
}

async fn apply_job_handler(
    State(state): State<MockApiState>,
    headers: HeaderMap,
    Json(payload): Json<JobIdRequest>,
) -> impl IntoResponse {
    let Some(token) = bearer_token(&headers) else {
        return ActionResponse::failed(StatusCode::UNAUTHORIZED, "Missing bearer token");
    };
    if !state.job_exists(payload.job_id).await {
        return ActionResponse::failed(StatusCode::NOT_FOUND, "Job not found");
    }

    let mut users = state.users.write().await;
    let user = users.entry(token).or_default();
    if !user.applied.contains(&payload.job_id) {
        user.applied.push(payload.job_id);
    }
    tracing::debug!(job_id = payload.job_id, "Application recorded");
    ActionResponse::ok()
}
