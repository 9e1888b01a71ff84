//! Report command
//!
//! Reply engagement for every user in the catalog.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::AppContext;
use forum_core::config::BatchPolicy;
use forum_core::engagement::{required_unique_replies, EngagementAnalyzer};

/// Arguments for the report command
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Forum snapshot file
    #[arg(long, short)]
    pub snapshot: Option<PathBuf>,

    /// Keep going when a user cannot be analyzed
    #[arg(long)]
    pub skip_failures: bool,

    /// Only list users below the requirement
    #[arg(long)]
    pub only_unmet: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the report command
pub fn execute(args: ReportArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let store = ctx.open_store(args.snapshot.as_deref())?;
    let mut analyzer =
        EngagementAnalyzer::from_config(std::sync::Arc::new(store), &ctx.config.engagement);
    if args.skip_failures {
        analyzer.set_batch_policy(BatchPolicy::Skip);
    }

    let report = analyzer.analyze_all()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!(
        "{} (requirement: {} distinct authors)",
        "Reply engagement:".bold().underline(),
        required_unique_replies()
    );
    println!();

    for entry in report
        .iter()
        .filter(|e| !args.only_unmet || !e.stats.requirement_met)
    {
        let marker = if entry.stats.requirement_met {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "  {} {:<20} {}",
            marker,
            entry.username,
            entry.stats.unique_count
        );
    }

    println!();
    println!(
        "{} of {} users meet the requirement",
        report.meeting_requirement().count().to_string().green(),
        report.len()
    );

    if !report.failed().is_empty() {
        eprintln!(
            "{} Skipped {} users: {}",
            "⚠".yellow(),
            report.failed().len(),
            report.failed().join(", ")
        );
    }

    Ok(())
}
