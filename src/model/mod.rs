pub mod filters;
pub mod fixtures;
pub mod job;

pub use filters::{Facet, FilterCriteria, FilterUpdate, SALARY_CEILING, SALARY_FLOOR};
pub use fixtures::fixture_jobs;
pub use job::{ExperienceLevel, Job, JobId, JobType, VisaCategory, WorkSetting};
