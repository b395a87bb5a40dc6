use crate::model::{FilterCriteria, Job};

/// Case-insensitive substring test. An empty needle matches everything.
fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

fn tag_allowed(selected: &std::collections::BTreeSet<String>, tag: &str) -> bool {
    selected.is_empty() || selected.contains(tag)
}

fn salary_in_range(job: &Job, criteria: &FilterCriteria) -> bool {
    if !criteria.salary_restricted() {
        return true;
    }
    match job.salary_amount() {
        Some(amount) => {
            amount >= criteria.salary_min as f64 && amount <= criteria.salary_max as f64
        }
        None => false,
    }
}

fn visa_allowed(job: &Job, criteria: &FilterCriteria) -> bool {
    if criteria.visa_category.is_empty() {
        return true;
    }
    job.visa_category
        .is_some_and(|category| criteria.visa_category.contains(category.as_str()))
}

/// Jobs from `jobs` that satisfy every active restriction in `criteria`.
///
/// Restrictions combine with AND; tags selected within one facet combine with
/// OR. The result keeps the input order.
pub fn filter_jobs(jobs: &[Job], criteria: &FilterCriteria) -> Vec<Job> {
    let search = criteria.search.to_lowercase();
    let location = criteria.location.to_lowercase();

    jobs.iter()
        .filter(|job| {
            contains_ignore_case(&job.title, &search) || contains_ignore_case(&job.company, &search)
        })
        .filter(|job| contains_ignore_case(&job.location, &location))
        .filter(|job| salary_in_range(job, criteria))
        .filter(|job| tag_allowed(&criteria.job_type, job.job_type.as_str()))
        .filter(|job| tag_allowed(&criteria.experience_level, job.experience_level.as_str()))
        .filter(|job| tag_allowed(&criteria.work_setting, job.work_setting.as_str()))
        .filter(|job| visa_allowed(job, criteria))
        .filter(|job| tag_allowed(&criteria.job_category, &job.job_category))
        .cloned()
        .collect()
}
