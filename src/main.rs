use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use league_roast::api::{RiotApiClient, RiotSession};
use league_roast::config::Config;
use league_roast::display::output::{
    display_error, display_info, display_report, display_roster, display_success,
};
use league_roast::display::TerminalProgress;
use league_roast::narrative::{LlmNarrator, Narrator, OfflineNarrator};
use league_roast::pipeline::{AnalysisRequest, AnalysisSettings, Analyzer};
use league_roast::roster::{pros_in_league, pros_on_team, roster_by_league, teams_by_league};
use league_roast::server;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "League Roast")]
#[command(about = "Review a ranked season and get roasted for it", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Year in review for one player
    Review {
        /// Riot ID (Name#TAG); the region's default tag is used without one
        riot_id: String,

        /// Platform (default: DEFAULT_REGION or na1)
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Put a player's season next to a pro's
    Compare {
        /// Riot ID (Name#TAG)
        riot_id: String,

        /// Pro key, see `pros` (e.g. faker)
        #[arg(short, long)]
        pro: String,

        /// Platform (default: DEFAULT_REGION or na1)
        #[arg(short, long)]
        region: Option<String>,
    },

    /// List the pros available for comparison
    Pros {
        /// Only this league (LCK, LEC, LCS, LTA)
        #[arg(short, long)]
        league: Option<String>,

        /// Only this team
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Run the HTTP service
    Serve {
        /// Listen address (default: BIND_ADDR or 0.0.0.0:8000)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let args = Args::parse();

    match args.command {
        Command::Serve { .. } => init_tracing("league_roast=info,tower_http=info"),
        _ => init_tracing("league_roast=warn"),
    }

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn narrator(config: &Config) -> Arc<dyn Narrator> {
    match &config.llm {
        Some(llm) => Arc::new(LlmNarrator::new(llm.clone())),
        None => {
            info!("LLM_API_KEY not set, postcards will use the built-in templates");
            Arc::new(OfflineNarrator)
        }
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Pros { league, team } => list_pros(league.as_deref(), team.as_deref()),
        Command::Review { riot_id, region } => analyze(riot_id, region, None),
        Command::Compare {
            riot_id,
            pro,
            region,
        } => analyze(riot_id, region, Some(pro)),
        Command::Serve { bind } => {
            let mut config = Config::from_env().context("failed to load configuration")?;
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            let narrator = narrator(&config);

            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            runtime
                .block_on(server::serve(config, narrator))
                .context("server stopped")
        }
    }
}

fn list_pros(league: Option<&str>, team: Option<&str>) -> Result<()> {
    let mut roster = roster_by_league();

    if let Some(league) = league {
        if pros_in_league(league).is_empty() {
            bail!("no pros listed for league '{}'", league);
        }
        roster.retain(|name, _| name.eq_ignore_ascii_case(league));
    }

    if let Some(team) = team {
        if pros_on_team(team).is_empty() {
            let known: Vec<&str> = teams_by_league().into_values().flatten().collect();
            bail!("no pros listed for team '{}' (known: {})", team, known.join(", "));
        }
        for teams in roster.values_mut() {
            teams.retain(|name, _| name.eq_ignore_ascii_case(team));
        }
    }

    display_roster(&roster);
    Ok(())
}

fn analyze(riot_id: String, region: Option<String>, pro: Option<String>) -> Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    let region = region.unwrap_or_else(|| config.region.clone());

    display_info(&format!(
        "Fetching {} ranked season for {} in region {}",
        config.season_year, riot_id, region
    ));

    let client = RiotApiClient::new(config.api_key.clone());
    let narrator = narrator(&config);
    let progress = TerminalProgress::new();
    let session = RiotSession::new(&client, &progress);
    let analyzer = Analyzer::new(
        &session,
        narrator.as_ref(),
        &progress,
        AnalysisSettings::from_config(&config),
    );

    let request = AnalysisRequest {
        summoner_name: riot_id.clone(),
        region: Some(region),
        pro_player_id: pro,
    };

    let report = match analyzer.analyze(&request) {
        Ok(report) => {
            progress.finish(&format!(
                "Analyzed {} ranked games",
                report.your_stats.total_games
            ));
            report
        }
        Err(e) => {
            progress.abandon();
            return Err(e).with_context(|| format!("could not analyze {}", riot_id));
        }
    };

    display_report(&report, &riot_id);
    display_success(&format!("{} postcards generated", report.postcards.len()));
    Ok(())
}
