use serde::{Deserialize, Deserializer, Serialize};

pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    Contract,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::FullTime, JobType::PartTime, JobType::Contract];

    /// Tag used on the wire and in filter sets.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-Time",
            JobType::PartTime => "Part-Time",
            JobType::Contract => "Contract",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Mid senior", alias = "Mid-senior")]
    MidSenior,
    Associate,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 2] = [ExperienceLevel::MidSenior, ExperienceLevel::Associate];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::MidSenior => "Mid senior",
            ExperienceLevel::Associate => "Associate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::MidSenior => "Mid Level",
            ExperienceLevel::Associate => "Associate",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkSetting {
    Remote,
    Onsite,
    Hybrid,
}

impl WorkSetting {
    pub const ALL: [WorkSetting; 3] = [WorkSetting::Remote, WorkSetting::Onsite, WorkSetting::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkSetting::Remote => "Remote",
            WorkSetting::Onsite => "Onsite",
            WorkSetting::Hybrid => "Hybrid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkSetting::Remote => "Remote",
            WorkSetting::Onsite => "On-site",
            WorkSetting::Hybrid => "Hybrid",
        }
    }
}

impl std::fmt::Display for WorkSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visa sponsorship category offered by the employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisaCategory {
    #[serde(rename = "H-1B")]
    H1b,
    #[serde(rename = "Cap-Exempt")]
    CapExempt,
}

impl VisaCategory {
    pub const ALL: [VisaCategory; 2] = [VisaCategory::H1b, VisaCategory::CapExempt];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisaCategory::H1b => "H-1B",
            VisaCategory::CapExempt => "Cap-Exempt",
        }
    }

    pub fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for VisaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A job posting as returned by the API. Never mutated after it is fetched;
/// a refetch replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(rename = "job_title")]
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(rename = "full_description", default)]
    pub description: String,
    #[serde(rename = "job_location")]
    pub location: String,
    /// Annual salary as transmitted (text holding a number).
    #[serde(deserialize_with = "salary_text")]
    pub salary: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub work_setting: WorkSetting,
    #[serde(rename = "h1type", default)]
    pub visa_category: Option<VisaCategory>,
    pub job_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    // Older API responses carry the posting date under this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
}

impl Job {
    /// Numeric salary. Blank text reads as zero; text that is not a number
    /// has no value and never satisfies a salary range.
    pub fn salary_amount(&self) -> Option<f64> {
        let text = self.salary.trim();
        if text.is_empty() {
            return Some(0.0);
        }
        text.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn posted_on(&self) -> Option<&str> {
        self.posted_date.as_deref().or(self.date_posted.as_deref())
    }
}

/// Accepts the salary either as a JSON string or as a JSON number.
fn salary_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSalary {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawSalary::deserialize(deserializer)? {
        RawSalary::Text(text) => text,
        RawSalary::Integer(n) => n.to_string(),
        RawSalary::Float(f) => f.to_string(),
    })
}
