//! Frozen Tag CLI
//!
//! Activity info, single sandbox rounds and seeded batches from the shell.
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=ft_core=debug`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ft_core::api::{simulate_batch, simulate_request, SimulationRequest};
use ft_core::config::{ActivityConfig, RoundSettings};
use ft_core::notify::Notifier;
use ft_core::sim::default_rosters;
use ft_core::FrozenTagActivity;

#[derive(Parser)]
#[command(name = "ft_cli")]
#[command(about = "Run Frozen Tag rounds in the headless sandbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Round shape shared by `simulate` and `batch`
#[derive(clap::Args, Debug, Clone)]
struct RoundArgs {
    /// Number of teams
    #[arg(long, default_value_t = 2)]
    teams: usize,

    /// Players on each team
    #[arg(long, default_value_t = 4)]
    players_per_team: usize,

    /// Round length in seconds (30-300, step 15)
    #[arg(long, default_value_t = 90)]
    round_length: u32,

    /// Allow punching during the round
    #[arg(long, default_value_t = false)]
    allow_attacks: bool,

    /// Builtin map name
    #[arg(long, default_value = "Frost Plaza")]
    arena: String,

    /// Activity config JSON (falls back to $FT_CONFIG_PATH, then defaults)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print activity registration info
    Info {
        /// Notification locale used for the sample line
        #[arg(long, default_value = "en-US")]
        locale: String,

        /// Also print the round settings JSON schema
        #[arg(long, default_value = "false")]
        schema: bool,
    },

    /// Play one sandbox round and print the result
    Simulate {
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[command(flatten)]
        round: RoundArgs,

        /// Write the result JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Play many seeded rounds in parallel and print a summary
    Batch {
        #[arg(long, default_value_t = 100)]
        runs: u64,

        #[arg(long, default_value_t = 0)]
        seed_start: u64,

        #[command(flatten)]
        round: RoundArgs,

        /// Write the summary JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { locale, schema } => {
            let info = FrozenTagActivity::info();
            println!("{}", serde_json::to_string_pretty(&info)?);

            let notifier = Notifier::new(&locale)
                .with_context(|| format!("loading notifications for {}", locale))?;
            let sample = notifier.round_start(RoundSettings::default().round_length_secs);
            println!("\nSample ({}): {}", notifier.locale(), sample.text);

            if schema {
                println!("\n{}", serde_json::to_string_pretty(&RoundSettings::json_schema())?);
            }
        }

        Commands::Simulate { seed, round, out } => {
            let request = build_request(seed, &round)?;
            let result = simulate_request(&request)
                .with_context(|| format!("simulating round with seed {}", seed))?;

            tracing::info!(
                seed,
                outcome = ?result.outcome,
                reason = ?result.reason,
                duration_ms = result.duration_ms,
                "round finished"
            );
            emit(out.as_deref(), &serde_json::to_string_pretty(&result)?)?;
        }

        Commands::Batch { runs, seed_start, round, out } => {
            let requests = (0..runs)
                .map(|i| build_request(seed_start.wrapping_add(i), &round))
                .collect::<Result<Vec<_>>>()?;
            let summary = simulate_batch(&requests);

            tracing::info!(
                rounds = summary.rounds,
                failed = summary.failed,
                avg_duration_ms = summary.avg_duration_ms,
                "batch finished"
            );
            if summary.failed > 0 {
                tracing::warn!("{} of {} rounds failed", summary.failed, summary.rounds);
            }
            emit(out.as_deref(), &serde_json::to_string_pretty(&summary)?)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ActivityConfig> {
    let config = match path {
        Some(path) => {
            let path_str = path.to_str().context("config path is not valid UTF-8")?;
            ActivityConfig::from_file(path_str)?
        }
        None => ActivityConfig::from_env()?,
    };
    Ok(config)
}

fn build_request(seed: u64, round: &RoundArgs) -> Result<SimulationRequest> {
    let mut request = SimulationRequest::new(seed, default_rosters(round.teams, round.players_per_team));
    request.settings = RoundSettings {
        round_length_secs: round.round_length,
        disable_attacks: !round.allow_attacks,
    };
    request.config = load_config(round.config.as_deref())?;
    request.arena = round.arena.clone();
    Ok(request)
}

fn emit(out: Option<&Path>, json: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Saved to: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
