pub mod filter;
pub mod state;

pub use filter::filter_jobs;
pub use state::{PaginationState, StoreState, ViewMode};

use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use crate::auth::AccessToken;
use crate::config::StoreConfig;
use crate::gateway::JobGateway;
use crate::model::{FilterUpdate, Job, JobId};
use crate::pagination::PageMarker;

/// Handle to the job board state.
///
/// Actions are the only way to change the state. Each action takes the write
/// lock only for the synchronous transition; gateway calls run without it.
/// Every completed transition bumps the revision published by [`subscribe`].
///
/// [`subscribe`]: JobStore::subscribe
#[derive(Clone)]
pub struct JobStore {
    gateway: Arc<dyn JobGateway>,
    state: Arc<RwLock<StoreState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl JobStore {
    pub fn new(gateway: Arc<dyn JobGateway>, config: &StoreConfig) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            gateway,
            state: Arc::new(RwLock::new(StoreState::new(config.page_size))),
            revision: Arc::new(revision),
        }
    }

    /// Receiver that changes after every state transition.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    /// Run `f` against the current state without cloning it.
    pub async fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    async fn update<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let result = {
            let mut state = self.state.write().await;
            f(&mut state)
        };
        self.revision.send_modify(|rev| *rev += 1);
        result
    }

    pub async fn load_jobs(&self) {
        self.update(StoreState::begin_loading).await;

        match self.gateway.list_jobs().await {
            Ok(jobs) => {
                tracing::debug!(count = jobs.len(), "Jobs loaded");
                self.update(|state| state.replace_jobs(jobs)).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loading jobs failed");
                self.update(|state| state.fail(e.to_string())).await;
            }
        }
    }

    pub async fn load_job_by_id(&self, id: JobId) {
        self.update(StoreState::begin_loading).await;

        match self.gateway.get_job(id).await {
            Ok(job) => self.update(|state| state.set_current_job(job)).await,
            Err(e) => {
                tracing::warn!(job_id = id, error = %e, "Loading job failed");
                self.update(|state| state.fail(e.to_string())).await;
            }
        }
    }

    pub async fn load_saved_jobs(&self, token: &AccessToken) {
        self.update(StoreState::begin_loading).await;

        match self.gateway.list_saved_jobs(token).await {
            Ok(jobs) => self.update(|state| state.replace_saved_jobs(jobs)).await,
            Err(e) => {
                tracing::warn!(error = %e, "Loading saved jobs failed");
                self.update(|state| state.fail(e.to_string())).await;
            }
        }
    }

    pub async fn load_applied_jobs(&self, token: &AccessToken) {
        self.update(StoreState::begin_loading).await;

        match self.gateway.list_applied_jobs(token).await {
            Ok(jobs) => self.update(|state| state.replace_applied_jobs(jobs)).await,
            Err(e) => {
                tracing::warn!(error = %e, "Loading applied jobs failed");
                self.update(|state| state.fail(e.to_string())).await;
            }
        }
    }

    pub async fn save_job(&self, id: JobId, token: &AccessToken) {
        match self.gateway.set_saved(id, true, token).await {
            Ok(()) => {
                let added = self.update(|state| state.record_saved(id)).await;
                if !added {
                    tracing::debug!(job_id = id, "Saved job not added locally");
                }
            }
            Err(e) => self.update(|state| state.error = Some(e.to_string())).await,
        }
    }

    pub async fn unsave_job(&self, id: JobId, token: &AccessToken) {
        match self.gateway.set_saved(id, false, token).await {
            Ok(()) => {
                self.update(|state| state.remove_saved(id)).await;
            }
            Err(e) => self.update(|state| state.error = Some(e.to_string())).await,
        }
    }

    pub async fn apply_to_job(&self, id: JobId, token: &AccessToken) {
        match self.gateway.apply(id, token).await {
            Ok(()) => {
                let added = self.update(|state| state.record_applied(id)).await;
                if !added {
                    tracing::debug!(job_id = id, "Applied job not added locally");
                }
            }
            Err(e) => self.update(|state| state.error = Some(e.to_string())).await,
        }
    }

    pub async fn set_filters<I>(&self, updates: I)
    where
        I: IntoIterator<Item = FilterUpdate>,
    {
        self.update(|state| state.set_filters(updates)).await;
    }

    pub async fn reset_filters(&self) {
        self.update(StoreState::reset_filters).await;
    }

    pub async fn apply_filters(&self) {
        self.update(StoreState::apply_filters).await;
    }

    pub async fn set_view(&self, view: ViewMode) {
        self.update(|state| state.set_view(view)).await;
    }

    /// Returns the page actually selected after clamping.
    pub async fn set_page(&self, page: usize) -> usize {
        self.update(|state| state.set_page(page)).await
    }

    pub async fn current_page_jobs(&self) -> Vec<Job> {
        self.read(|state| state.current_page_jobs().to_vec()).await
    }

    pub async fn visible_pages(&self) -> Vec<PageMarker> {
        self.read(StoreState::visible_pages).await
    }

    pub async fn is_saved(&self, id: JobId) -> bool {
        self.read(|state| state.is_saved(id)).await
    }

    pub async fn has_applied(&self, id: JobId) -> bool {
        self.read(|state| state.has_applied(id)).await
    }
}
