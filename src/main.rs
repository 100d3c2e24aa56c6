use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playsheet::api::state::AppState;
use playsheet::calculate::{self, PlayFilter};
use playsheet::config::AppConfig;
use playsheet::models::{GroupKey, HashMark, PlayDraft, PlayRecord, TeamSide};
use playsheet::storage::{csv::render_csv, PlayStore, StoreConfig};

#[derive(Parser)]
#[command(name = "playsheet")]
#[command(about = "Play-by-play logger and tendency tracker for football coaches")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Log a single play
    Add {
        /// Game identifier (typically a date)
        #[arg(long)]
        game: String,

        /// Opponent name
        #[arg(long)]
        opponent: String,

        /// Offense or Defense
        #[arg(long, default_value = "Offense")]
        side: String,

        /// Quarter (1-4)
        #[arg(long)]
        quarter: u8,

        /// Down (1-4)
        #[arg(long)]
        down: u8,

        /// Yards to go
        #[arg(long)]
        distance: f64,

        /// Field position (1-99)
        #[arg(long)]
        yard_line: u8,

        /// Hash mark: Left, Middle or Right
        #[arg(long, default_value = "Middle")]
        hash: String,

        /// Formation code
        #[arg(long)]
        formation: String,

        /// Two-digit personnel tag (e.g. 11)
        #[arg(long)]
        personnel: String,

        /// Play type (e.g. Run, Pass, RPO)
        #[arg(long)]
        play_type: String,

        /// Yards gained (negative allowed)
        #[arg(long)]
        result_yards: f64,

        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Print the play log
    Log {
        /// Filter by game
        #[arg(long)]
        game: Option<String>,

        /// Filter by opponent
        #[arg(long)]
        opponent: Option<String>,

        /// Filter by side (Offense/Defense)
        #[arg(long)]
        side: Option<String>,
    },

    /// Print a grouped tendency report
    Report {
        /// Group by: down, formation or personnel
        #[arg(long, default_value = "down")]
        group_by: String,

        /// Filter by game
        #[arg(long)]
        game: Option<String>,

        /// Filter by opponent
        #[arg(long)]
        opponent: Option<String>,

        /// Filter by side (Offense/Defense)
        #[arg(long)]
        side: Option<String>,
    },

    /// Export the play log as CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<String>,
    },

    /// Wipe the play log
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

fn build_filter(
    game: Option<String>,
    opponent: Option<String>,
    side: Option<String>,
) -> Result<PlayFilter> {
    let team_side = match side {
        Some(raw) => Some(raw.parse::<TeamSide>()?),
        None => None,
    };
    Ok(PlayFilter {
        game,
        opponent,
        team_side,
    })
}

fn print_metrics_row(key: &str, metrics: &playsheet::models::TendencyMetrics) {
    println!(
        "  {:<12} {:>5}  run {:>5.1}%  pass {:>5.1}%  success {:>5.1}%  avg {:>6.2}  explosive {:>5.1}%",
        key,
        metrics.plays,
        metrics.run_pct,
        metrics.pass_pct,
        metrics.success_rate_pct,
        metrics.avg_yards,
        metrics.explosive_rate_pct,
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting playsheet v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load(std::path::Path::new(&cli.config))
        .with_context(|| format!("loading config from {}", cli.config))?;
    if let Some(dir) = &cli.data_dir {
        config.store.data_dir = PathBuf::from(dir);
    }

    let store = PlayStore::new(StoreConfig {
        backend: config.store.backend,
        data_dir: config.store.data_dir.clone(),
    });
    let classifier = config
        .classify
        .build_classifier()
        .context("building play classifier")?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(store, classifier);
            let app = playsheet::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Add {
            game,
            opponent,
            side,
            quarter,
            down,
            distance,
            yard_line,
            hash,
            formation,
            personnel,
            play_type,
            result_yards,
            notes,
        } => {
            let draft = PlayDraft {
                game,
                opponent,
                team_side: side.parse::<TeamSide>()?,
                quarter,
                down,
                distance,
                yard_line,
                hash: hash.parse::<HashMark>()?,
                formation,
                personnel,
                play_type,
                result_yards,
                notes,
            };
            let record = PlayRecord::from_draft(draft)?;
            store.append(&record)?;
            println!(
                "Logged: {} {} | {}&{} from the {} | {} {} for {} yd | {}",
                record.game,
                record.opponent,
                record.down,
                record.distance,
                record.yard_line,
                record.formation,
                record.play_type,
                record.result_yards,
                if record.success {
                    "SUCCESS"
                } else {
                    "no gain on schedule"
                },
            );
        }
        Commands::Log {
            game,
            opponent,
            side,
        } => {
            let filter = build_filter(game, opponent, side)?;
            let all = store.load()?;
            let mut matched: Vec<&PlayRecord> = filter.apply(&all);
            matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

            println!("=== Play Log ({} plays) ===\n", matched.len());
            for p in &matched {
                println!(
                    "  Q{} {}&{} @{} {:<6} | {:<12} {:<4} {:<10} {:>5.1} yd {} {}",
                    p.quarter,
                    p.down,
                    p.distance,
                    p.yard_line,
                    p.hash.to_string(),
                    p.formation,
                    p.personnel,
                    p.play_type,
                    p.result_yards,
                    if p.success { "[S]" } else { "   " },
                    p.notes,
                );
            }
        }
        Commands::Report {
            group_by,
            game,
            opponent,
            side,
        } => {
            let group_by: GroupKey = group_by.parse().map_err(anyhow::Error::msg)?;
            let filter = build_filter(game, opponent, side)?;
            let all = store.load()?;
            let matched = filter.apply(&all);

            println!(
                "=== Tendency Report by {} ({} plays) ===\n",
                group_by,
                matched.len()
            );
            match calculate::summarize(&matched, &classifier) {
                Some(overall) => print_metrics_row("overall", &overall),
                None => println!("  (no plays match the filters)"),
            }
            println!();

            let report = calculate::aggregate(&matched, group_by, &classifier);
            for row in &report.rows {
                print_metrics_row(&row.key, &row.metrics);
            }
        }
        Commands::Export { out } => {
            let plays = store.load()?;
            let csv = render_csv(&plays)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &csv)
                        .with_context(|| format!("writing export to {}", path))?;
                    println!("Exported {} plays to {}", plays.len(), path);
                }
                None => print!("{}", csv),
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("refusing to wipe the play log without --yes");
            }
            let deleted = store.load()?.len();
            store.overwrite(&[])?;
            println!("Play log reset ({} plays deleted).", deleted);
        }
    }

    Ok(())
}
