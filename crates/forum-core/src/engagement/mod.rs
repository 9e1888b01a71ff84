//! Reply engagement analytics
//!
//! Treats each reply as an edge from the reply author to the author of the
//! parent post, and counts for a user how many distinct other authors they
//! have replied to. Self-replies never count.
//!
//! # Example
//!
//! ```ignore
//! use forum_core::engagement::EngagementAnalyzer;
//!
//! let analyzer = EngagementAnalyzer::new(store);
//! let stats = analyzer.analyze_user("alice")?;
//! println!("{} of {}", stats.unique_count, forum_core::engagement::required_unique_replies());
//! ```

mod analyzer;
mod report;

pub use analyzer::EngagementAnalyzer;
pub use report::{EngagementReport, UserEngagement};

use serde::{Deserialize, Serialize};

/// Minimum number of distinct authors a user must reply to
pub const REQUIRED_UNIQUE_REPLIES: usize = 3;

/// The fixed requirement threshold
pub const fn required_unique_replies() -> usize {
    REQUIRED_UNIQUE_REPLIES
}

/// Engagement figures for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementStats {
    /// Distinct authors replied to, excluding the user
    pub unique_count: usize,
    /// Whether `unique_count` reaches the threshold
    pub requirement_met: bool,
}

impl EngagementStats {
    pub fn from_count(unique_count: usize) -> Self {
        Self {
            unique_count,
            requirement_met: unique_count >= REQUIRED_UNIQUE_REPLIES,
        }
    }
}
