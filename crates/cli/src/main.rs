//! rde CLI - replay a scenario through the reflective decision engine.

mod scenario;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rde_core::{CategoryPattern, EngineConfig, EnergyLevel, MoodTrend, TaskId, TaskRecommendation};
use rde_engine::ReflectiveOrchestrator;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "rde")]
#[command(about = "Energy- and mood-aware task suggestions with reflective guidance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine config (JSON); defaults apply to anything left out
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the scenario's open tasks
    Suggest {
        /// Scenario file
        #[arg(long)]
        scenario: PathBuf,
    },
    /// Replay reflections and print the guidance for each
    Reflect {
        /// Scenario file
        #[arg(long)]
        scenario: PathBuf,
        /// Seed for template selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show energy, mood trend and learned patterns
    Status {
        /// Scenario file
        #[arg(long)]
        scenario: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

#[derive(Serialize)]
struct Suggestion<'a> {
    title: &'a str,
    #[serde(flatten)]
    recommendation: &'a TaskRecommendation,
}

#[derive(Serialize)]
struct ReflectionReport<'a> {
    category: &'a str,
    guidance: Vec<String>,
}

#[derive(Serialize)]
struct StatusReport {
    current_energy: EnergyLevel,
    daily_average_energy: EnergyLevel,
    mood_trend: MoodTrend,
    patterns: Vec<CategoryPattern>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Suggest { scenario } => {
            let scenario = Scenario::load(&scenario)?;
            let session = scenario.session(config, None).await;
            let titles: HashMap<TaskId, &str> =
                scenario.tasks.iter().map(|t| (t.id, t.title.as_str())).collect();

            let orchestrator = ReflectiveOrchestrator::new(session, scenario.tasks.clone());
            let suggestions = orchestrator.generate_suggestions().await?;
            info!("Ranked {} suggestions", suggestions.len());

            let rows: Vec<Suggestion<'_>> = suggestions
                .iter()
                .map(|rec| Suggestion {
                    title: titles.get(&rec.task_id).copied().unwrap_or("(unknown)"),
                    recommendation: rec,
                })
                .collect();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("Suggestions ({})", rows.len());
                for row in rows {
                    println!(
                        "  {:>3.0}% | {} - {}",
                        row.recommendation.confidence * 100.0,
                        row.title,
                        row.recommendation.reason,
                    );
                }
            }
        }
        Commands::Reflect { scenario, seed } => {
            let scenario = Scenario::load(&scenario)?;
            let session = scenario.session(config, seed).await;

            let mut reports = Vec::new();
            for reflection in &scenario.reflections {
                let guidance = session.reflect(reflection.clone()).await;
                reports.push(ReflectionReport {
                    category: &reflection.category,
                    guidance,
                });
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for (i, report) in reports.iter().enumerate() {
                    println!("Reflection {} ({}):", i + 1, report.category);
                    for line in &report.guidance {
                        println!("  - {}", line);
                    }
                }
                print_patterns(&session.patterns().await);
            }
        }
        Commands::Status { scenario } => {
            let scenario = Scenario::load(&scenario)?;
            let session = scenario.session(config, None).await;
            for reflection in &scenario.reflections {
                session.reflect(reflection.clone()).await;
            }

            let report = StatusReport {
                current_energy: session.current_energy().await,
                daily_average_energy: session.daily_average_energy().await,
                mood_trend: session.mood_trend().await,
                patterns: session.patterns().await,
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Status");
                println!("  Current energy: {}", report.current_energy);
                println!("  Today's average energy: {}", report.daily_average_energy);
                println!("  Mood trend: {}", report.mood_trend);
                print_patterns(&report.patterns);
            }
        }
    }

    Ok(())
}

fn print_patterns(patterns: &[CategoryPattern]) {
    if patterns.is_empty() {
        return;
    }

    println!("Patterns");
    for pattern in patterns {
        println!(
            "  {} | {:.0}% of {} | best: {} | optimal: {:.0} min",
            pattern.category,
            pattern.success_rate * 100.0,
            pattern.total_count,
            pattern.best_time_of_day.as_deref().unwrap_or("-"),
            pattern.optimal_duration_minutes,
        );
    }
}
