use std::net::SocketAddr;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use jobboard_lite::auth::{AccessToken, CredentialSource, StaticCredentials};
use jobboard_lite::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
use jobboard_lite::format::{format_date, format_salary, time_ago, truncate_text};
use jobboard_lite::gateway::build_gateway;
use jobboard_lite::mock_api::{run_mock_api, MockApiState};
use jobboard_lite::model::{Facet, FilterCriteria, FilterUpdate, Job, JobId};
use jobboard_lite::pagination::PageMarker;
use jobboard_lite::shutdown::install_shutdown_handler;
use jobboard_lite::store::{JobStore, StoreState};

#[derive(Parser, Debug)]
#[command(name = "jobboard-lite")]
#[command(version)]
#[command(about = "Browse, filter, save and apply to job postings")]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Browse job postings
    Jobs {
        #[command(flatten)]
        client: ClientArgs,

        #[command(subcommand)]
        command: JobCommands,
    },

    /// Manage the signed-in user's saved jobs
    Saved {
        #[command(flatten)]
        client: ClientArgs,

        #[command(flatten)]
        user: UserArgs,

        #[command(subcommand)]
        command: SavedCommands,
    },

    /// Manage the signed-in user's job applications
    Applied {
        #[command(flatten)]
        client: ClientArgs,

        #[command(flatten)]
        user: UserArgs,

        #[command(subcommand)]
        command: AppliedCommands,
    },

    /// Serve an in-memory job board API backed by the built-in jobs
    MockApi(MockApiArgs),
}

// =============================================================================
// Shared Arguments
// =============================================================================

#[derive(Parser, Debug)]
struct ClientArgs {
    /// Job board API base URL
    #[arg(long, short = 'a', env = "JOBBOARD_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Report API failures instead of falling back to built-in jobs
    #[arg(long)]
    no_fallback: bool,

    /// Report failed save/unsave/apply calls instead of ignoring them
    #[arg(long)]
    strict_writes: bool,

    /// Output format
    #[arg(long, short = 'o', default_value = "table")]
    output: OutputFormat,
}

impl ClientArgs {
    fn config(&self, page_size: usize) -> ClientConfig {
        let mut config = ClientConfig::new(self.api_url.clone());
        config.gateway = config
            .gateway
            .with_timeout(Duration::from_secs(self.timeout_secs));
        config.fallback.enabled = !self.no_fallback;
        config.fallback.swallow_write_failures = !self.strict_writes;
        config.store = config.store.with_page_size(page_size);
        config
    }

    fn store(&self, page_size: usize) -> Result<JobStore, Box<dyn std::error::Error>> {
        let config = self.config(page_size);
        let gateway = build_gateway(&config)?;
        Ok(JobStore::new(gateway, &config.store))
    }
}

#[derive(Parser, Debug)]
struct UserArgs {
    /// Access token issued by the identity provider
    #[arg(long, env = "JOBBOARD_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

impl UserArgs {
    async fn access_token(&self) -> Result<AccessToken, Box<dyn std::error::Error>> {
        Ok(StaticCredentials::new(self.token.clone())
            .access_token()
            .await?)
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(clap::Subcommand, Debug)]
enum JobCommands {
    /// List jobs matching the given filters, one page at a time
    List(ListArgs),
    /// Show a single job
    Show {
        /// The job ID
        id: JobId,
    },
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Match against title or company (case-insensitive)
    #[arg(long, short = 's')]
    search: Option<String>,

    /// Match against location (case-insensitive)
    #[arg(long, short = 'l')]
    location: Option<String>,

    /// Minimum salary (inclusive)
    #[arg(long)]
    salary_min: Option<u64>,

    /// Maximum salary (inclusive)
    #[arg(long)]
    salary_max: Option<u64>,

    /// Job types, comma-separated (Full-Time, Part-Time, Contract)
    #[arg(long, value_delimiter = ',')]
    job_type: Vec<String>,

    /// Experience levels, comma-separated (Associate, "Mid senior")
    #[arg(long, value_delimiter = ',')]
    experience_level: Vec<String>,

    /// Work settings, comma-separated (Remote, Onsite, Hybrid)
    #[arg(long, value_delimiter = ',')]
    work_setting: Vec<String>,

    /// Visa categories, comma-separated (H-1B, Cap-Exempt)
    #[arg(long, value_delimiter = ',')]
    visa: Vec<String>,

    /// Job categories, comma-separated
    #[arg(long, value_delimiter = ',')]
    category: Vec<String>,

    /// Page to show (1-based)
    #[arg(long, short = 'p', default_value = "1")]
    page: usize,

    /// Jobs per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

impl ListArgs {
    fn filter_updates(&self) -> Vec<FilterUpdate> {
        let mut updates = Vec::new();
        if let Some(search) = &self.search {
            updates.push(FilterUpdate::Search(search.clone()));
        }
        if let Some(location) = &self.location {
            updates.push(FilterUpdate::Location(location.clone()));
        }
        if self.salary_min.is_some() || self.salary_max.is_some() {
            let defaults = FilterCriteria::default();
            updates.push(FilterUpdate::SalaryRange {
                min: self.salary_min.unwrap_or(defaults.salary_min),
                max: self.salary_max.unwrap_or(defaults.salary_max),
            });
        }
        for (facet, values) in [
            (Facet::JobType, &self.job_type),
            (Facet::ExperienceLevel, &self.experience_level),
            (Facet::WorkSetting, &self.work_setting),
            (Facet::VisaCategory, &self.visa),
            (Facet::JobCategory, &self.category),
        ] {
            if values.is_empty() {
                continue;
            }
            for value in values.iter().map(|v| v.trim()) {
                if !facet.is_known_tag(value) {
                    tracing::warn!(%facet, tag = value, "Unknown tag, no job will match it");
                }
            }
            updates.push(FilterUpdate::facet(facet, values.iter().map(|v| v.trim())));
        }
        updates
    }
}

#[derive(clap::Subcommand, Debug)]
enum SavedCommands {
    /// List saved jobs
    List,
    /// Save a job
    Add { id: JobId },
    /// Remove a job from the saved list
    Remove { id: JobId },
}

#[derive(clap::Subcommand, Debug)]
enum AppliedCommands {
    /// List jobs applied to
    List,
    /// Apply to a job
    Add { id: JobId },
}

#[derive(Parser, Debug)]
struct MockApiArgs {
    /// Port to listen on
    #[arg(long, default_value = "8080")]
    port: u16,
}

// =============================================================================
// JSON Output Types
// =============================================================================

#[derive(Serialize)]
struct JobListOutput<'a> {
    jobs: &'a [Job],
    total_count: usize,
    page: usize,
    total_pages: usize,
    pages: Vec<PageMarker>,
    filters: &'a FilterCriteria,
}

#[derive(Serialize)]
struct ActionOutput {
    job_id: JobId,
    action: &'static str,
    recorded_locally: bool,
}

// =============================================================================
// Helper Functions
// =============================================================================

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Turn the store's error flag into a command failure.
fn check_error(state: &StoreState) -> Result<(), Box<dyn std::error::Error>> {
    match &state.error {
        Some(message) => Err(message.clone().into()),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy)]
enum UserList {
    Saved,
    Applied,
}

/// Load the job list and then the user's `list`, stopping at the first
/// failed load. A save or apply only records jobs that are loaded.
async fn load_for_action(
    store: &JobStore,
    token: &AccessToken,
    list: UserList,
) -> Result<(), Box<dyn std::error::Error>> {
    store.load_jobs().await;
    store.read(check_error).await?;

    match list {
        UserList::Saved => store.load_saved_jobs(token).await,
        UserList::Applied => store.load_applied_jobs(token).await,
    }
    store.read(check_error).await
}

fn print_job_table(jobs: &[Job]) {
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }

    println!(
        "{:<5} {:<28} {:<20} {:<20} {:<10} {:<8} SALARY",
        "ID", "TITLE", "COMPANY", "LOCATION", "TYPE", "SETTING"
    );
    println!("{}", "-".repeat(104));
    for job in jobs {
        println!(
            "{:<5} {:<28} {:<20} {:<20} {:<10} {:<8} {}",
            job.id,
            truncate_text(&job.title, 25),
            truncate_text(&job.company, 17),
            truncate_text(&job.location, 17),
            job.job_type.as_str(),
            job.work_setting.as_str(),
            format_salary(&job.salary)
        );
    }
}

fn print_jobs(jobs: &[Job], output_format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(jobs)?),
        OutputFormat::Table => print_job_table(jobs),
    }
    Ok(())
}

// =============================================================================
// Command Handlers
// =============================================================================

async fn handle_job_list(
    client: &ClientArgs,
    args: ListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = client.store(args.page_size)?;
    store.load_jobs().await;
    store.set_filters(args.filter_updates()).await;
    store.set_page(args.page).await;

    let state = store.snapshot().await;
    check_error(&state)?;

    let page_jobs = state.current_page_jobs();
    let pages = state.visible_pages();

    match client.output {
        OutputFormat::Json => {
            let output = JobListOutput {
                jobs: page_jobs,
                total_count: state.filtered_jobs.len(),
                page: state.pagination.current_page,
                total_pages: state.pagination.total_pages,
                pages,
                filters: &state.filters,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            print_job_table(page_jobs);
            println!();
            let strip: Vec<String> = pages
                .iter()
                .map(|marker| match marker {
                    PageMarker::Page(n) if *n == state.pagination.current_page => format!("[{}]", n),
                    other => other.to_string(),
                })
                .collect();
            println!(
                "Page {} of {}: {}",
                state.pagination.current_page,
                state.pagination.total_pages,
                strip.join(" ")
            );
            println!(
                "Showing {} of {} matching jobs ({} total)",
                page_jobs.len(),
                state.filtered_jobs.len(),
                state.jobs.len()
            );
        }
    }
    Ok(())
}

async fn handle_job_show(client: &ClientArgs, id: JobId) -> Result<(), Box<dyn std::error::Error>> {
    let store = client.store(DEFAULT_PAGE_SIZE)?;
    store.load_job_by_id(id).await;

    let state = store.snapshot().await;
    check_error(&state)?;
    let Some(job) = state.current_job else {
        return Err(format!("Job {} not loaded", id).into());
    };

    match client.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&job)?),
        OutputFormat::Table => {
            println!("{} at {}", job.title, job.company);
            println!("{}", "=".repeat(40));
            println!("Location:    {} ({})", job.location, job.work_setting.label());
            println!("Salary:      {}", format_salary(&job.salary));
            println!("Type:        {}", job.job_type.label());
            println!("Experience:  {}", job.experience_level.label());
            println!("Category:    {}", job.job_category);
            if let Some(visa) = job.visa_category {
                println!("Visa:        {}", visa.label());
            }
            println!(
                "Posted:      {} ({})",
                format_date(job.posted_on()),
                time_ago(job.posted_on(), Utc::now())
            );
            if let Some(url) = &job.application_url {
                println!("Apply at:    {}", url);
            }
            println!();
            for line in job.description.lines() {
                println!("  {}", line);
            }
        }
    }
    Ok(())
}

async fn handle_saved(
    client: &ClientArgs,
    user: &UserArgs,
    command: SavedCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = user.access_token().await?;
    let store = client.store(DEFAULT_PAGE_SIZE)?;

    let (id, action) = match command {
        SavedCommands::List => {
            store.load_saved_jobs(&token).await;
            let state = store.snapshot().await;
            check_error(&state)?;
            return print_jobs(&state.saved_jobs, &client.output);
        }
        SavedCommands::Add { id } => {
            load_for_action(&store, &token, UserList::Saved).await?;
            store.save_job(id, &token).await;
            (id, "saved")
        }
        SavedCommands::Remove { id } => {
            store.load_saved_jobs(&token).await;
            store.unsave_job(id, &token).await;
            (id, "unsaved")
        }
    };

    let state = store.snapshot().await;
    check_error(&state)?;
    let recorded_locally = match action {
        "saved" => state.is_saved(id),
        _ => !state.is_saved(id),
    };
    print_action(id, action, recorded_locally, &client.output)
}

async fn handle_applied(
    client: &ClientArgs,
    user: &UserArgs,
    command: AppliedCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = user.access_token().await?;
    let store = client.store(DEFAULT_PAGE_SIZE)?;

    match command {
        AppliedCommands::List => {
            store.load_applied_jobs(&token).await;
            let state = store.snapshot().await;
            check_error(&state)?;
            print_jobs(&state.applied_jobs, &client.output)
        }
        AppliedCommands::Add { id } => {
            load_for_action(&store, &token, UserList::Applied).await?;
            store.apply_to_job(id, &token).await;

            let state = store.snapshot().await;
            check_error(&state)?;
            print_action(id, "applied", state.has_applied(id), &client.output)
        }
    }
}

fn print_action(
    job_id: JobId,
    action: &'static str,
    recorded_locally: bool,
    output_format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match output_format {
        OutputFormat::Json => {
            let output = ActionOutput {
                job_id,
                action,
                recorded_locally,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!("Job {} {}.", job_id, action);
            if !recorded_locally {
                println!("(Job {} is not in the loaded job list)", job_id);
            }
        }
    }
    Ok(())
}

async fn run_mock_server(args: MockApiArgs) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    let shutdown = install_shutdown_handler();
    run_mock_api(addr, MockApiState::default(), shutdown).await?;
    Ok(())
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging();

    match args.command {
        Commands::Jobs { client, command } => match command {
            JobCommands::List(list_args) => handle_job_list(&client, list_args).await?,
            JobCommands::Show { id } => handle_job_show(&client, id).await?,
        },
        Commands::Saved {
            client,
            user,
            command,
        } => handle_saved(&client, &user, command).await?,
        Commands::Applied {
            client,
            user,
            command,
        } => handle_applied(&client, &user, command).await?,
        Commands::MockApi(mock_args) => run_mock_server(mock_args).await?,
    }

    Ok(())
}
