use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use medpost_client::domains::applications::AppliedJobsTracker;
use medpost_client::domains::search::{SearchOrchestrator, SearchSnapshot};
use medpost_client::infra::logging::init_logger;
use medpost_client::infra::services::ApiService;
use medpost_client::infra::session::{SessionContext, SessionStore, StoredSession};
use medpost_client::infra::{ApiClient, Config};
use medpost_model::{AppliedJobSet, Category};

#[derive(Parser, Debug)]
#[command(name = "medpost-search")]
#[command(about = "Search MedPost jobs, facilities and workers")]
struct Cli {
    /// Free-text query
    query: Option<String>,

    /// Category to search (jobs, facilities, workers); defaults to the first
    /// one your account may search
    #[arg(short, long)]
    category: Option<Category>,

    /// Only list endorsed workers (workers category only)
    #[arg(long, default_value_t = false)]
    endorsed_only: bool,

    /// Search this city right away instead of a typed query
    #[arg(short, long, conflicts_with = "query")]
    location: Option<String>,

    /// API server URL (overrides config)
    #[arg(long, env = "MEDPOST_SERVER_URL")]
    server_url: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    if let Some(server_url) = cli.server_url.clone() {
        config.server_url = server_url;
    }

    let session = load_session().context("failed to load session")?;
    let api: Arc<dyn ApiService> =
        Arc::new(ApiClient::from_config(&config).context("failed to build API client")?);

    let tracker = AppliedJobsTracker::new(Arc::clone(&api), session.clone());
    let orchestrator = SearchOrchestrator::new(api, session, &config.runtime_config());

    if let Some(category) = cli.category {
        let allowed = orchestrator.snapshot().allowed_categories;
        if !allowed.contains(&category) {
            bail!(
                "{} search is not available for this account (allowed: {})",
                category,
                allowed
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        orchestrator.set_category(category);
    }
    if cli.endorsed_only {
        orchestrator.set_endorsed_only(true);
    }
    match (&cli.location, &cli.query) {
        (Some(city), _) => orchestrator.use_location(city.clone()),
        (None, Some(query)) => orchestrator.set_query(query.clone()),
        (None, None) => {}
    }

    let (applied, snapshot) = tokio::join!(tracker.on_focus(), orchestrator.settled());

    if cli.json {
        let rendered = serde_json::to_string_pretty(&snapshot.results)
            .context("failed to serialize results")?;
        println!("{}", rendered);
        return Ok(());
    }

    print_snapshot(&snapshot, &applied)
}

fn load_session() -> anyhow::Result<SessionContext> {
    let stored = match SessionStore::default_location() {
        Some(store) => store
            .read()
            .with_context(|| format!("reading {}", store.path().display()))?,
        None => StoredSession::default(),
    };
    Ok(SessionContext::from_stored(stored.with_env_overrides()))
}

fn print_snapshot(snapshot: &SearchSnapshot, applied: &AppliedJobSet) -> anyhow::Result<()> {
    if let Some(error) = &snapshot.error {
        bail!("{}", error);
    }

    if let Some(message) = snapshot.empty_state_message() {
        println!("{}", message);
        return Ok(());
    }

    println!("{} results ({})", snapshot.results.len(), snapshot.category);
    for result in &snapshot.results {
        let mut line = format!("[{}] {}", result.id(), result.display_title());

        let location = result.location_line();
        if !location.is_empty() {
            line.push_str(&format!(" | {}", location));
        }
        if let Some(job) = result.as_job() {
            if let Some(facility) = &job.facility_name {
                line.push_str(&format!(" | {}", facility));
            }
            line.push_str(&format!(" | {}", applied.apply_button(&job.id).label()));
        }

        println!("{}", line);
    }

    Ok(())
}
