//! Per-user and batch engagement analysis

use super::report::{EngagementReport, UserEngagement};
use super::EngagementStats;
use crate::config::{BatchPolicy, EngagementConfig};
use crate::error::{ForumError, Result};
use crate::store::ForumStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Computes reply engagement from a forum store
pub struct EngagementAnalyzer {
    /// Storage backend
    store: Arc<dyn ForumStore>,
    /// Catalog sentinel skipped in batch mode
    placeholder_user: String,
    /// Failure handling in batch mode
    batch_policy: BatchPolicy,
}

impl EngagementAnalyzer {
    /// Create an analyzer with default settings
    pub fn new(store: impl ForumStore + 'static) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Create an analyzer over shared storage
    pub fn with_store(store: Arc<dyn ForumStore>) -> Self {
        Self::from_config(store, &EngagementConfig::default())
    }

    /// Create an analyzer over shared storage honoring the given configuration
    pub fn from_config(store: Arc<dyn ForumStore>, config: &EngagementConfig) -> Self {
        Self {
            store,
            placeholder_user: config.placeholder_user.clone(),
            batch_policy: config.batch_policy,
        }
    }

    /// Set the batch failure policy
    pub fn set_batch_policy(&mut self, policy: BatchPolicy) {
        self.batch_policy = policy;
    }

    pub fn batch_policy(&self) -> BatchPolicy {
        self.batch_policy
    }

    /// Count distinct authors `username` has replied to
    pub fn analyze_user(&self, username: &str) -> Result<EngagementStats> {
        if username.trim().is_empty() {
            return Err(ForumError::InvalidArgument(
                "Username cannot be empty".to_string(),
            ));
        }

        let replies = self.store.replies()?;
        let mut authors: HashSet<String> = HashSet::new();

        for reply in replies.iter().filter(|r| r.author == username) {
            match self.store.post(reply.post_id)? {
                Some(post) => {
                    authors.insert(post.author);
                }
                None => {
                    warn!(
                        reply = %reply.id,
                        post = %reply.post_id,
                        "Reply references a missing post, skipping"
                    );
                }
            }
        }

        authors.remove(username);

        let stats = EngagementStats::from_count(authors.len());
        debug!(
            user = username,
            unique = stats.unique_count,
            met = stats.requirement_met,
            "Analyzed user"
        );
        Ok(stats)
    }

    /// Like `analyze_user`, for callers whose username may be absent
    pub fn analyze_optional_user(&self, username: Option<&str>) -> Result<EngagementStats> {
        match username {
            Some(username) => self.analyze_user(username),
            None => Err(ForumError::InvalidArgument(
                "Username cannot be null".to_string(),
            )),
        }
    }

    /// Analyze every user in the catalog, in catalog order
    pub fn analyze_all(&self) -> Result<EngagementReport> {
        let usernames = self.store.usernames()?;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut report = EngagementReport::default();

        for username in &usernames {
            if *username == self.placeholder_user || !seen.insert(username.as_str()) {
                continue;
            }

            match self.analyze_user(username) {
                Ok(stats) => report.push(UserEngagement {
                    username: username.clone(),
                    stats,
                }),
                Err(e) if self.batch_policy == BatchPolicy::Skip => {
                    warn!(user = %username, error = %e, "Skipping user");
                    report.record_failure(username.clone());
                }
                Err(e) => {
                    error!(user = %username, error = %e, "Aborting engagement batch");
                    return Err(e);
                }
            }
        }

        info!(
            users = report.len(),
            met = report.meeting_requirement().count(),
            skipped = report.failed().len(),
            "Engagement batch complete"
        );
        Ok(report)
    }
}
