use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::job::{ExperienceLevel, JobType, VisaCategory, WorkSetting};

pub const SALARY_FLOOR: u64 = 0;
pub const SALARY_CEILING: u64 = 500_000;

/// One independently filterable tag dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facet {
    JobType,
    ExperienceLevel,
    WorkSetting,
    VisaCategory,
    JobCategory,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::JobType,
        Facet::ExperienceLevel,
        Facet::WorkSetting,
        Facet::VisaCategory,
        Facet::JobCategory,
    ];

    /// Every tag the API defines for this facet. `None` for free-form facets.
    pub fn known_tags(&self) -> Option<Vec<&'static str>> {
        match self {
            Facet::JobType => Some(JobType::ALL.iter().map(JobType::as_str).collect()),
            Facet::ExperienceLevel => Some(
                ExperienceLevel::ALL
                    .iter()
                    .map(ExperienceLevel::as_str)
                    .collect(),
            ),
            Facet::WorkSetting => Some(WorkSetting::ALL.iter().map(WorkSetting::as_str).collect()),
            Facet::VisaCategory => Some(VisaCategory::ALL.iter().map(VisaCategory::as_str).collect()),
            Facet::JobCategory => None,
        }
    }

    /// False only for a tag outside a closed facet's vocabulary; such a tag
    /// matches no job.
    pub fn is_known_tag(&self, tag: &str) -> bool {
        self.known_tags()
            .map_or(true, |tags| tags.contains(&tag))
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facet::JobType => write!(f, "job_type"),
            Facet::ExperienceLevel => write!(f, "experience_level"),
            Facet::WorkSetting => write!(f, "work_setting"),
            Facet::VisaCategory => write!(f, "visa_category"),
            Facet::JobCategory => write!(f, "job_category"),
        }
    }
}

/// Active filter criteria. Empty strings and empty tag sets mean "no restriction".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub location: String,
    pub salary_min: u64,
    pub salary_max: u64,
    pub job_type: BTreeSet<String>,
    pub experience_level: BTreeSet<String>,
    pub work_setting: BTreeSet<String>,
    pub visa_category: BTreeSet<String>,
    pub job_category: BTreeSet<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            location: String::new(),
            salary_min: SALARY_FLOOR,
            salary_max: SALARY_CEILING,
            job_type: BTreeSet::new(),
            experience_level: BTreeSet::new(),
            work_setting: BTreeSet::new(),
            visa_category: BTreeSet::new(),
            job_category: BTreeSet::new(),
        }
    }
}

impl FilterCriteria {
    pub fn facet(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::JobType => &self.job_type,
            Facet::ExperienceLevel => &self.experience_level,
            Facet::WorkSetting => &self.work_setting,
            Facet::VisaCategory => &self.visa_category,
            Facet::JobCategory => &self.job_category,
        }
    }

    pub fn facet_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::JobType => &mut self.job_type,
            Facet::ExperienceLevel => &mut self.experience_level,
            Facet::WorkSetting => &mut self.work_setting,
            Facet::VisaCategory => &mut self.visa_category,
            Facet::JobCategory => &mut self.job_category,
        }
    }

    /// True when the salary bounds restrict anything, i.e. the range is
    /// narrower than `[SALARY_FLOOR, SALARY_CEILING]`.
    pub fn salary_restricted(&self) -> bool {
        self.salary_min > SALARY_FLOOR || self.salary_max < SALARY_CEILING
    }

    /// Number of active restrictions (search, location, salary, and each non-empty facet).
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if !self.search.is_empty() {
            count += 1;
        }
        if !self.location.is_empty() {
            count += 1;
        }
        if self.salary_restricted() {
            count += 1;
        }
        count
            + Facet::ALL
                .iter()
                .filter(|facet| !self.facet(**facet).is_empty())
                .count()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.active_count() == 0
    }

    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Search(text) => self.search = text,
            FilterUpdate::Location(text) => self.location = text,
            FilterUpdate::SalaryRange { min, max } => {
                self.salary_min = min;
                self.salary_max = max;
            }
            FilterUpdate::Facet { facet, values } => *self.facet_mut(facet) = values,
            FilterUpdate::Toggle {
                facet,
                value,
                selected,
            } => {
                let set = self.facet_mut(facet);
                if selected {
                    set.insert(value);
                } else {
                    set.remove(&value);
                }
            }
        }
    }
}

/// The closed set of ways a caller may change the filter criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Search(String),
    Location(String),
    SalaryRange { min: u64, max: u64 },
    /// Replace every selected tag of a facet.
    Facet { facet: Facet, values: BTreeSet<String> },
    /// Select or deselect a single tag of a facet.
    Toggle {
        facet: Facet,
        value: String,
        selected: bool,
    },
}

impl FilterUpdate {
    pub fn facet<I, S>(facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterUpdate::Facet {
            facet,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn select(facet: Facet, value: impl Into<String>) -> Self {
        FilterUpdate::Toggle {
            facet,
            value: value.into(),
            selected: true,
        }
    }

    pub fn deselect(facet: Facet, value: impl Into<String>) -> Self {
        FilterUpdate::Toggle {
            facet,
            value: value.into(),
            selected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unrestricted() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.salary_min, 0);
        assert_eq!(criteria.salary_max, 500_000);
        assert!(!criteria.salary_restricted());
        assert!(criteria.is_unrestricted());
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterUpdate::select(Facet::WorkSetting, "Remote"));
        criteria.apply(FilterUpdate::select(Facet::WorkSetting, "Hybrid"));
        criteria.apply(FilterUpdate::select(Facet::WorkSetting, "Remote"));
        assert_eq!(criteria.work_setting.len(), 2);

        criteria.apply(FilterUpdate::deselect(Facet::WorkSetting, "Remote"));
        assert_eq!(
            criteria.work_setting.iter().collect::<Vec<_>>(),
            vec!["Hybrid"]
        );
    }

    #[test]
    fn facet_replaces_whole_set() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterUpdate::facet(Facet::JobType, ["Contract", "Full-Time"]));
        criteria.apply(FilterUpdate::facet(Facet::JobType, ["Part-Time"]));
        assert_eq!(criteria.job_type.len(), 1);
        assert!(criteria.job_type.contains("Part-Time"));
    }

    #[test]
    fn active_count_tracks_each_restriction() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterUpdate::Search("dev".into()));
        criteria.apply(FilterUpdate::SalaryRange {
            min: 100_000,
            max: SALARY_CEILING,
        });
        criteria.apply(FilterUpdate::select(Facet::VisaCategory, "H-1B"));
        assert_eq!(criteria.active_count(), 3);
    }

    #[test]
    fn known_tags_per_facet() {
        assert_eq!(
            Facet::JobType.known_tags(),
            Some(vec!["Full-Time", "Part-Time", "Contract"])
        );
        assert_eq!(
            Facet::VisaCategory.known_tags(),
            Some(vec!["H-1B", "Cap-Exempt"])
        );
        assert!(Facet::JobCategory.known_tags().is_none());

        assert!(Facet::ExperienceLevel.is_known_tag("Mid senior"));
        assert!(!Facet::WorkSetting.is_known_tag("remote"));
        assert!(Facet::JobCategory.is_known_tag("Astronomy"));
    }

    #[test]
    fn widened_salary_range_is_not_a_restriction() {
        let criteria = FilterCriteria {
            salary_max: 900_000,
            ..Default::default()
        };
        assert!(!criteria.salary_restricted());
    }
}
