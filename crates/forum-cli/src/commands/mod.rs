//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod digest;
pub mod engagement;
pub mod report;
pub mod validate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use forum_core::config::{Config, DEFAULT_CONFIG_PATH};
use forum_storage::SnapshotStore;

/// forum-insight - input screening and reply engagement for discussion forums
#[derive(Debug, Parser)]
#[command(name = "forum-insight")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FORUM_INSIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Screen text for SQL-injection patterns
    Validate(validate::ValidateArgs),

    /// Show reply engagement for one user
    Engagement(engagement::EngagementArgs),

    /// Show reply engagement for every user
    Report(report::ReportArgs),

    /// Show unread replies and pinned posts for a user
    Digest(digest::DigestArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Settings shared by all commands
pub struct AppContext {
    /// Where the configuration was read from
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: Config,
}

impl AppContext {
    fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let config = Config::load(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;
        Ok(Self {
            config_path,
            config,
        })
    }

    /// Open the snapshot named on the command line, in the config, or the default one
    pub fn open_store(&self, snapshot: Option<&Path>) -> Result<SnapshotStore> {
        let path = snapshot
            .map(Path::to_path_buf)
            .or_else(|| self.config.storage.snapshot_path.clone())
            .unwrap_or_else(SnapshotStore::default_location);
        tracing::debug!("Opening snapshot {:?}", path);

        let store = SnapshotStore::open(&path)
            .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
        Ok(store.with_placeholder(self.config.engagement.placeholder_user.clone()))
    }
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose, cli.no_color);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let ctx = AppContext::load(cli.config)?;

    // Dispatch to command handler
    match cli.command {
        Commands::Validate(args) => validate::execute(args, &ctx),
        Commands::Engagement(args) => engagement::execute(args, &ctx),
        Commands::Report(args) => report::execute(args, &ctx),
        Commands::Digest(args) => digest::execute(args, &ctx),
        Commands::Config(cmd) => config::execute(cmd, &ctx),
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .init();
}
