//! Digest command
//!
//! Unread replies and pinned posts for one user.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::AppContext;
use forum_core::digest::{digest_for, MAX_PINNED_POSTS};

/// Arguments for the digest command
#[derive(Debug, Args)]
pub struct DigestArgs {
    /// Username to summarize
    pub username: String,

    /// Forum snapshot file
    #[arg(long, short)]
    pub snapshot: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the digest command
pub fn execute(args: DigestArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let store = ctx.open_store(args.snapshot.as_deref())?;
    let digest = digest_for(&store, &args.username)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&digest)?);
        return Ok(());
    }

    println!("{}", digest.username.bold().underline());
    if digest.unread_replies == 0 {
        println!("  No unread replies");
    } else {
        println!(
            "  {} posts with unread replies",
            digest.unread_replies.to_string().yellow()
        );
    }
    if let Some(at) = digest.last_reply_at {
        println!("  Last reply: {}", at.format("%Y-%m-%d %H:%M UTC"));
    }

    println!();
    println!("Pinned ({}/{}):", digest.pinned.len(), MAX_PINNED_POSTS);
    for post in &digest.pinned {
        println!("  📌 #{} {} {}", post.id, post.author.cyan(), post.content.dimmed());
    }

    Ok(())
}
