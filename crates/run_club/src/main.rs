//! `run-club`: count the Strava runs that were Run Club sessions.
//!
//! Usage:
//! ```bash
//! # Prompt for everything
//! run-club
//!
//! # Fully non-interactive, with per-activity diagnostics on stderr
//! run-club --token "$STRAVA_ACCESS_TOKEN" --lat 51.5074 --lon=-0.1278 --max-distance 0.3 --debug
//!
//! # Machine-readable output
//! run-club --json
//! ```

use std::process::ExitCode;

use clap::Parser;
use run_club::config::{Overrides, RunConfig, StdinPrompter};
use run_club::{ClubReport, RunClubResult, logging, report};
use strava_client::fetch_all_activities;
use strava_client::http_client::ReqwestStravaClient;

#[derive(Parser)]
#[command(
    name = "run-club",
    about = "Strava Run Club Tracker",
    long_about = "Finds runs that started near the club meeting point on Tuesdays between 18:45 and 19:15 and prints totals."
)]
struct Cli {
    /// Enable debug output showing fetch and filtering details
    #[arg(long, short = 'd', visible_alias = "verbose")]
    debug: bool,

    /// Strava API access token (falls back to STRAVA_ACCESS_TOKEN, then a prompt)
    #[arg(long)]
    token: Option<String>,

    /// Club start latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<String>,

    /// Club start longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<String>,

    /// Maximum distance from the club start in km (default 0.5)
    #[arg(long)]
    max_distance: Option<String>,

    /// Strava API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Activities requested per page
    #[arg(long)]
    per_page: Option<String>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            token: self.token.clone(),
            latitude: self.lat.clone(),
            longitude: self.lon.clone(),
            max_distance_km: self.max_distance.clone(),
            base_url: self.base_url.clone(),
            per_page: self.per_page.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "run-club failed");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> RunClubResult<()> {
    if !cli.json {
        eprintln!("{}\n", report::banner(report::TITLE));
    }
    tracing::debug!("debug mode enabled");

    let mut prompter = StdinPrompter::new();
    let cfg = RunConfig::resolve(cli.overrides(), &mut prompter)?;
    let client = ReqwestStravaClient::from_config(&cfg.client_config());

    eprintln!("Fetching activities from Strava...");
    let activities = fetch_all_activities(&client, cfg.per_page).await?;
    eprintln!("Retrieved {} total activities", activities.len());

    eprintln!("Filtering for Run Club activities...");
    let club_report = ClubReport::from_activities(&activities, &cfg.club);

    if cli.json {
        println!("{}", report::render_json(&club_report)?);
    } else {
        println!("{club_report}");
    }
    Ok(())
}
