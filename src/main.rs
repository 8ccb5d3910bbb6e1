mod analysis;
mod config;
mod pr;
mod report;

use clap::Parser;
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;

use config::RuleSet;
use pr::GitHubClient;
use report::Verdict;

/// PR Inspector — audits a GitHub project's open pull requests and reports
/// the ones whose diffs merit human review.
#[derive(Parser, Debug)]
#[command(name = "pr-inspector", version, about)]
struct Cli {
    /// GitHub username of the project owner
    user: String,

    /// GitHub project name
    project: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let _main_span = info_span!("inspect", user = %cli.user, project = %cli.project).entered();

    info!("loading configuration");
    let config = config::Config::load()?;

    let client = GitHubClient::new();
    // A listing or fetch failure propagates here and exits non-zero rather
    // than silently printing an empty report.
    let interesting = run(&client, &config.rules, &cli.user, &cli.project).await?;

    report::print_report(&interesting);
    Ok(())
}

/// The pipeline: list open pull requests, derive diff locations, fetch every
/// diff concurrently, analyze each, and keep the interesting verdicts in
/// fetch order.
async fn run(
    client: &GitHubClient,
    rules: &RuleSet,
    user: &str,
    project: &str,
) -> Result<Vec<Verdict>, pr::PrError> {
    let pull_requests = client.list_open_pull_requests(user, project).await?;
    let locations = pr::diff_locations(&pull_requests);
    let diffs = pr::fetch::fetch_all(client.http(), &locations).await?;

    let mut interesting = Vec::new();
    for (location, body) in &diffs {
        let verdict = analysis::analyze(body, rules, &pull_requests, location);
        if verdict.interesting {
            interesting.push(verdict);
        }
    }
    info!(
        analyzed = diffs.len(),
        interesting = interesting.len(),
        "analysis complete"
    );
    Ok(interesting)
}
