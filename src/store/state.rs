use serde::{Deserialize, Serialize};

use crate::model::{FilterCriteria, FilterUpdate, Job, JobId};
use crate::pagination::{page_bounds, total_pages, visible_pages, PageMarker};
use crate::store::filter::filter_jobs;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Grid => write!(f, "grid"),
            ViewMode::List => write!(f, "list"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    /// 1-based, kept within `[1, total_pages]`
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

/// Everything the job board shows, plus the transitions that change it.
///
/// Transitions are synchronous and run to completion; `JobStore` serializes
/// access to one instance.
#[derive(Debug, Clone, Serialize)]
pub struct StoreState {
    pub jobs: Vec<Job>,
    pub filtered_jobs: Vec<Job>,
    pub saved_jobs: Vec<Job>,
    pub applied_jobs: Vec<Job>,
    pub current_job: Option<Job>,
    pub filters: FilterCriteria,
    pub view: ViewMode,
    pub pagination: PaginationState,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

impl StoreState {
    pub fn new(page_size: usize) -> Self {
        Self {
            jobs: Vec::new(),
            filtered_jobs: Vec::new(),
            saved_jobs: Vec::new(),
            applied_jobs: Vec::new(),
            current_job: None,
            filters: FilterCriteria::default(),
            view: ViewMode::default(),
            pagination: PaginationState {
                current_page: 1,
                total_pages: 1,
                page_size: page_size.max(1),
            },
            is_loading: false,
            error: None,
        }
    }

    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Record a failed action. Replaces any earlier error message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.error = Some(message.into());
    }

    pub fn replace_jobs(&mut self, jobs: Vec<Job>) {
        self.filtered_jobs = jobs.clone();
        self.jobs = jobs;
        self.is_loading = false;
        self.apply_filters();
    }

    pub fn set_current_job(&mut self, job: Job) {
        self.current_job = Some(job);
        self.is_loading = false;
    }

    pub fn replace_saved_jobs(&mut self, jobs: Vec<Job>) {
        self.saved_jobs = jobs;
        self.is_loading = false;
    }

    pub fn replace_applied_jobs(&mut self, jobs: Vec<Job>) {
        self.applied_jobs = jobs;
        self.is_loading = false;
    }

    pub fn find_job(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn is_saved(&self, id: JobId) -> bool {
        self.saved_jobs.iter().any(|job| job.id == id)
    }

    pub fn has_applied(&self, id: JobId) -> bool {
        self.applied_jobs.iter().any(|job| job.id == id)
    }

    /// Add a loaded job to the saved list after the server accepted the save.
    /// Returns false if the job is not loaded or is already saved.
    pub fn record_saved(&mut self, id: JobId) -> bool {
        if self.is_saved(id) {
            return false;
        }
        match self.find_job(id).cloned() {
            Some(job) => {
                self.saved_jobs.push(job);
                true
            }
            None => false,
        }
    }

    /// Drop every saved record with this id. Returns how many were removed.
    pub fn remove_saved(&mut self, id: JobId) -> usize {
        let before = self.saved_jobs.len();
        self.saved_jobs.retain(|job| job.id != id);
        before - self.saved_jobs.len()
    }

    /// Add a loaded job to the applied list. Same rules as `record_saved`.
    pub fn record_applied(&mut self, id: JobId) -> bool {
        if self.has_applied(id) {
            return false;
        }
        match self.find_job(id).cloned() {
            Some(job) => {
                self.applied_jobs.push(job);
                true
            }
            None => false,
        }
    }

    pub fn set_filters<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = FilterUpdate>,
    {
        for update in updates {
            self.filters.apply(update);
        }
        self.pagination.current_page = 1;
        self.apply_filters();
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterCriteria::default();
        self.pagination.current_page = 1;
        self.apply_filters();
    }

    /// Recompute the derived view and page count from `jobs` and `filters`.
    pub fn apply_filters(&mut self) {
        self.filtered_jobs = filter_jobs(&self.jobs, &self.filters);
        self.pagination.total_pages =
            total_pages(self.filtered_jobs.len(), self.pagination.page_size);
        if self.pagination.current_page > self.pagination.total_pages {
            self.pagination.current_page = self.pagination.total_pages;
        }
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    /// Move to `page`, clamped into `[1, total_pages]`. Returns the page now current.
    pub fn set_page(&mut self, page: usize) -> usize {
        let clamped = page.clamp(1, self.pagination.total_pages);
        if clamped != page {
            tracing::debug!(
                requested = page,
                clamped,
                total_pages = self.pagination.total_pages,
                "Page out of range"
            );
        }
        self.pagination.current_page = clamped;
        clamped
    }

    /// The slice of `filtered_jobs` shown on the current page.
    pub fn current_page_jobs(&self) -> &[Job] {
        let range = page_bounds(
            self.pagination.current_page,
            self.pagination.page_size,
            self.filtered_jobs.len(),
        );
        &self.filtered_jobs[range]
    }

    pub fn visible_pages(&self) -> Vec<PageMarker> {
        visible_pages(self.pagination.current_page, self.pagination.total_pages)
    }
}
