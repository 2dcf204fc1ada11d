use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use homework_progress::models::Report;
use homework_progress::{progress, report, snapshot};

#[derive(Parser)]
#[command(name = "homework-progress")]
#[command(about = "Derive homework progress, streaks, and badges from an assignment snapshot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the overall numbers and top subjects
    Stats {
        #[arg(long)]
        assignments: PathBuf,
        #[arg(long)]
        submissions: Option<PathBuf>,
        /// Evaluation instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Generate a markdown progress report
    Report {
        #[arg(long)]
        assignments: PathBuf,
        #[arg(long)]
        submissions: Option<PathBuf>,
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        #[arg(long, default_value = "progress.md")]
        out: PathBuf,
    },
    /// Emit the full report as JSON on stdout
    Json {
        #[arg(long)]
        assignments: PathBuf,
        #[arg(long)]
        submissions: Option<PathBuf>,
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats {
            assignments,
            submissions,
            now,
            limit,
        } => {
            let report = compute(&assignments, submissions.as_deref(), now)?;
            let overall = &report.overall;

            if overall.total == 0 {
                println!("No assignments in this snapshot.");
                return Ok(());
            }

            println!(
                "{} assignments: {} completed, {} late, {} missed, {} pending",
                overall.total, overall.completed, overall.late, overall.missed, overall.pending
            );
            println!(
                "Completion rate {}%, on-time rate {}%",
                overall.completion_rate, overall.on_time_rate
            );
            println!(
                "Current streak {}, longest {}",
                report.streaks.current_streak, report.streaks.longest_streak
            );
            println!("Top subjects by completion:");
            for subject in report.by_subject.iter().take(limit) {
                println!(
                    "- {}: {}/{} completed ({}% submitted)",
                    subject.subject,
                    subject.stats.completed,
                    subject.stats.total,
                    subject.stats.completion_rate
                );
            }
        }
        Commands::Report {
            assignments,
            submissions,
            now,
            out,
        } => {
            let report = compute(&assignments, submissions.as_deref(), now)?;
            let markdown = report::render_markdown(&report);
            std::fs::write(&out, markdown)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Json {
            assignments,
            submissions,
            now,
            pretty,
        } => {
            let report = compute(&assignments, submissions.as_deref(), now)?;
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{json}");
        }
    }

    Ok(())
}

// The wall clock is read here and nowhere else; the engine only ever sees
// the instant it is handed.
fn compute(
    assignments_path: &Path,
    submissions_path: Option<&Path>,
    now: Option<DateTime<Utc>>,
) -> anyhow::Result<Report> {
    let assignments = snapshot::load_assignments(assignments_path)?;
    let submissions = match submissions_path {
        Some(path) => snapshot::load_submissions(path)?,
        None => HashMap::new(),
    };
    let now = now.unwrap_or_else(Utc::now);
    let report = progress::build_report(&assignments, &submissions, now)?;
    Ok(report)
}
