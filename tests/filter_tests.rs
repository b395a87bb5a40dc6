use jobboard_lite::model::{
    fixture_jobs, Facet, FilterCriteria, FilterUpdate, Job, SALARY_CEILING,
};
use jobboard_lite::pagination::{total_pages, visible_pages, PageMarker};
use jobboard_lite::store::{filter_jobs, StoreState};

fn ids(jobs: &[Job]) -> Vec<u64> {
    jobs.iter().map(|j| j.id).collect()
}

fn criteria_with(updates: Vec<FilterUpdate>) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();
    for update in updates {
        criteria.apply(update);
    }
    criteria
}

/// A spread of criteria touching every facet, used by the property tests.
fn sample_criteria() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria::default(),
        criteria_with(vec![FilterUpdate::Search("dev".into())]),
        criteria_with(vec![FilterUpdate::Location("remote".into())]),
        criteria_with(vec![FilterUpdate::SalaryRange {
            min: 100_000,
            max: 150_000,
        }]),
        criteria_with(vec![FilterUpdate::facet(Facet::JobType, ["Part-Time"])]),
        criteria_with(vec![
            FilterUpdate::facet(Facet::WorkSetting, ["Hybrid", "Remote"]),
            FilterUpdate::facet(Facet::ExperienceLevel, ["Mid senior"]),
        ]),
        criteria_with(vec![
            FilterUpdate::facet(Facet::VisaCategory, ["H-1B"]),
            FilterUpdate::facet(Facet::JobCategory, ["Engineering"]),
        ]),
        criteria_with(vec![FilterUpdate::Search("no such job".into())]),
    ]
}

#[test]
fn test_filtering_is_idempotent() {
    let jobs = fixture_jobs();
    for criteria in sample_criteria() {
        let once = filter_jobs(&jobs, &criteria);
        let twice = filter_jobs(&jobs, &criteria);
        assert_eq!(once, twice);
        // Filtering an already filtered set changes nothing either
        assert_eq!(filter_jobs(&once, &criteria), once);
    }
}

#[test]
fn test_filtering_preserves_order_and_is_subset() {
    let jobs = fixture_jobs();
    for criteria in sample_criteria() {
        let result = filter_jobs(&jobs, &criteria);
        let positions: Vec<usize> = result
            .iter()
            .map(|job| jobs.iter().position(|j| j == job).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_default_criteria_keep_everything() {
    let jobs = fixture_jobs();
    assert_eq!(filter_jobs(&jobs, &FilterCriteria::default()), jobs);
}

#[test]
fn test_total_pages_formula_after_recompute() {
    for page_size in [1, 3, 5, 12] {
        let mut state = StoreState::new(page_size);
        state.replace_jobs(fixture_jobs());
        for criteria in sample_criteria() {
            state.filters = criteria;
            state.apply_filters();
            let expected = state.filtered_jobs.len().div_ceil(page_size).max(1);
            assert_eq!(state.pagination.total_pages, expected);
            assert_eq!(
                state.pagination.total_pages,
                total_pages(state.filtered_jobs.len(), page_size)
            );
        }
    }
}

#[test]
fn test_part_time_scenario() {
    let mut state = StoreState::new(12);
    state.replace_jobs(fixture_jobs());
    state.set_filters([FilterUpdate::facet(Facet::JobType, ["Part-Time"])]);

    assert_eq!(ids(&state.filtered_jobs), vec![5]);
    assert_eq!(state.filtered_jobs[0].title, "Marketing Specialist");
    assert_eq!(state.pagination.total_pages, 1);
}

#[test]
fn test_salary_range_is_inclusive() {
    let criteria = criteria_with(vec![FilterUpdate::SalaryRange {
        min: 100_000,
        max: 150_000,
    }]);
    let result = filter_jobs(&fixture_jobs(), &criteria);
    let salaries: Vec<&str> = result.iter().map(|j| j.salary.as_str()).collect();

    // 90000, 160000 and 170000 fall outside the range
    assert_eq!(salaries, vec!["140000", "120000", "145000", "110000", "120000"]);
    assert!(!salaries.contains(&"90000"));
    assert!(!salaries.contains(&"160000"));
    assert!(!salaries.contains(&"170000"));
}

#[test]
fn test_salary_boundaries() {
    let jobs = fixture_jobs();

    let exact_max = criteria_with(vec![FilterUpdate::SalaryRange {
        min: 100_000,
        max: 145_000,
    }]);
    assert!(ids(&filter_jobs(&jobs, &exact_max)).contains(&4));

    let above_min = criteria_with(vec![FilterUpdate::SalaryRange {
        min: 110_001,
        max: 150_000,
    }]);
    assert!(!ids(&filter_jobs(&jobs, &above_min)).contains(&7));
}

#[test]
fn test_search_is_case_insensitive() {
    let criteria = criteria_with(vec![FilterUpdate::Search("dev".into())]);
    let titles: Vec<String> = filter_jobs(&fixture_jobs(), &criteria)
        .into_iter()
        .map(|j| j.title)
        .collect();
    assert_eq!(
        titles,
        vec![
            "Senior React Developer",
            "DevOps Engineer",
            "Frontend Developer"
        ]
    );

    let upper = criteria_with(vec![FilterUpdate::Search("DEV".into())]);
    assert_eq!(filter_jobs(&fixture_jobs(), &upper).len(), titles.len());
}

#[test]
fn test_or_within_facet_and_across_facets() {
    let jobs = fixture_jobs();

    let either_setting = criteria_with(vec![FilterUpdate::facet(
        Facet::WorkSetting,
        ["Remote", "Onsite"],
    )]);
    assert_eq!(ids(&filter_jobs(&jobs, &either_setting)), vec![2, 3, 5, 7]);

    let remote_and_sponsored = criteria_with(vec![
        FilterUpdate::facet(Facet::WorkSetting, ["Remote", "Onsite"]),
        FilterUpdate::facet(Facet::VisaCategory, ["Cap-Exempt"]),
    ]);
    assert_eq!(ids(&filter_jobs(&jobs, &remote_and_sponsored)), vec![3]);
}

#[test]
fn test_reset_restores_full_view() {
    let mut state = StoreState::new(3);
    state.replace_jobs(fixture_jobs());
    state.set_filters([
        FilterUpdate::Search("manager".into()),
        FilterUpdate::SalaryRange {
            min: 50_000,
            max: SALARY_CEILING,
        },
    ]);
    assert_eq!(state.filtered_jobs.len(), 2);

    state.reset_filters();
    assert_eq!(state.filters, FilterCriteria::default());
    assert_eq!(state.filtered_jobs, state.jobs);
    assert_eq!(state.pagination.current_page, 1);
    assert_eq!(state.pagination.total_pages, 3);
}

#[test]
fn test_visible_pages_examples() {
    use PageMarker::{Ellipsis, Page};

    assert_eq!(
        visible_pages(1, 5),
        vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
    );
    assert_eq!(
        visible_pages(2, 10),
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(9), Page(10)]
    );
    assert_eq!(
        visible_pages(5, 10),
        vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
    );
    assert_eq!(
        visible_pages(9, 10),
        vec![Page(1), Page(2), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
    );
}
