//! Engagement command
//!
//! Show how many distinct authors one user has replied to.

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::AppContext;
use forum_core::engagement::{required_unique_replies, EngagementAnalyzer, EngagementStats};

/// Arguments for the engagement command
#[derive(Debug, Args)]
pub struct EngagementArgs {
    /// Username to analyze
    pub username: String,

    /// Forum snapshot file
    #[arg(long, short)]
    pub snapshot: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EngagementOutput<'a> {
    username: &'a str,
    #[serde(flatten)]
    stats: EngagementStats,
    required: usize,
}

/// Execute the engagement command
pub fn execute(args: EngagementArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let store = ctx.open_store(args.snapshot.as_deref())?;
    let analyzer = EngagementAnalyzer::new(store);
    let stats = analyzer
        .analyze_user(&args.username)
        .with_context(|| format!("Failed to analyze {:?}", args.username))?;

    if args.json {
        let output = EngagementOutput {
            username: &args.username,
            stats,
            required: required_unique_replies(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let status = if stats.requirement_met {
        "✓ requirement met".green()
    } else {
        "✗ requirement not met".red()
    };
    println!(
        "{}: replied to {} of {} required distinct authors  {}",
        args.username.bold(),
        stats.unique_count.to_string().yellow(),
        required_unique_replies(),
        status
    );

    Ok(())
}
