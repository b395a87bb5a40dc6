use super::job::{ExperienceLevel, Job, JobId, JobType, VisaCategory, WorkSetting};

const APPLY_URL: &str = "https://example.com/apply";

#[allow(clippy::too_many_arguments)]
fn fixture(
    id: JobId,
    title: &str,
    company: &str,
    logo_text: &str,
    description: &str,
    location: &str,
    salary: &str,
    job_type: JobType,
    experience_level: ExperienceLevel,
    work_setting: WorkSetting,
    visa_category: Option<VisaCategory>,
    job_category: &str,
    posted_date: &str,
) -> Job {
    Job {
        id,
        title: title.to_string(),
        company: company.to_string(),
        company_logo: Some(format!("https://placehold.co/100x100?text={logo_text}")),
        description: description.to_string(),
        location: location.to_string(),
        salary: salary.to_string(),
        job_type,
        experience_level,
        work_setting,
        visa_category,
        job_category: job_category.to_string(),
        posted_date: Some(posted_date.to_string()),
        date_posted: None,
        application_url: Some(APPLY_URL.to_string()),
    }
}

/// Built-in job set served when the API cannot be reached.
pub fn fixture_jobs() -> Vec<Job> {
    vec![
        fixture(
            1,
            "Senior React Developer",
            "TechCorp",
            "TC",
            "We are looking for an experienced React developer to build modern web applications. \
             The ideal candidate has 3+ years of experience with React and its ecosystem.",
            "San Francisco, CA",
            "160000",
            JobType::FullTime,
            ExperienceLevel::Associate,
            WorkSetting::Hybrid,
            Some(VisaCategory::H1b),
            "Engineering",
            "2023-06-01",
        ),
        fixture(
            2,
            "Product Manager",
            "Innovate Inc",
            "II",
            "Seeking a skilled product manager to lead our product development initiatives. \
             You will work closely with engineers, designers, and stakeholders.",
            "New York, NY",
            "140000",
            JobType::FullTime,
            ExperienceLevel::Associate,
            WorkSetting::Onsite,
            None,
            "Product",
            "2023-06-05",
        ),
        fixture(
            3,
            "UI/UX Designer",
            "Creative Solutions",
            "CS",
            "Join our design team to create beautiful, intuitive interfaces for our products. \
             Experience with Figma and user research required.",
            "Remote",
            "120000",
            JobType::Contract,
            ExperienceLevel::MidSenior,
            WorkSetting::Remote,
            Some(VisaCategory::CapExempt),
            "Design",
            "2023-06-10",
        ),
        fixture(
            4,
            "DevOps Engineer",
            "CloudScale",
            "CS",
            "We need a DevOps engineer to help us automate our infrastructure. \
             Experience with AWS, Kubernetes, and CI/CD pipelines is required.",
            "Seattle, WA",
            "145000",
            JobType::FullTime,
            ExperienceLevel::MidSenior,
            WorkSetting::Hybrid,
            Some(VisaCategory::H1b),
            "Engineering",
            "2023-06-15",
        ),
        fixture(
            5,
            "Marketing Specialist",
            "GrowthHackers",
            "GH",
            "Looking for a marketing specialist to help us grow our customer base. \
             Experience with digital marketing, SEO, and content creation is a plus.",
            "Chicago, IL",
            "90000",
            JobType::PartTime,
            ExperienceLevel::Associate,
            WorkSetting::Onsite,
            None,
            "Marketing",
            "2023-06-20",
        ),
        fixture(
            6,
            "Data Scientist",
            "AnalyticsAI",
            "AI",
            "Join our data science team to build machine learning models and extract insights \
             from large datasets. Experience with Python and ML frameworks required.",
            "Boston, MA",
            "170000",
            JobType::FullTime,
            ExperienceLevel::MidSenior,
            WorkSetting::Hybrid,
            Some(VisaCategory::H1b),
            "Data Science",
            "2023-06-25",
        ),
        fixture(
            7,
            "Customer Success Manager",
            "ServiceFirst",
            "SF",
            "We are looking for a customer success manager to ensure our clients get the most \
             value from our product. Strong communication skills required.",
            "Denver, CO",
            "110000",
            JobType::FullTime,
            ExperienceLevel::MidSenior,
            WorkSetting::Remote,
            None,
            "Customer Service",
            "2023-07-01",
        ),
        fixture(
            8,
            "Frontend Developer",
            "WebWizards",
            "WW",
            "Join our team to build beautiful, responsive web applications. \
             Experience with React, TypeScript, and CSS required.",
            "Austin, TX",
            "120000",
            JobType::FullTime,
            ExperienceLevel::MidSenior,
            WorkSetting::Hybrid,
            Some(VisaCategory::CapExempt),
            "Engineering",
            "2023-07-05",
        ),
    ]
}
