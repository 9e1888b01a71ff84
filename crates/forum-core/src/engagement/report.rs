//! Batch engagement report

use super::EngagementStats;
use serde::{Deserialize, Serialize};

/// One user's row in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEngagement {
    pub username: String,
    #[serde(flatten)]
    pub stats: EngagementStats,
}

/// Engagement for every analyzed user, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementReport {
    entries: Vec<UserEngagement>,
    /// Users skipped because their analysis failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    failed: Vec<String>,
}

impl EngagementReport {
    pub(crate) fn push(&mut self, entry: UserEngagement) {
        self.entries.push(entry);
    }

    pub(crate) fn record_failure(&mut self, username: String) {
        self.failed.push(username);
    }

    /// Stats for a username
    pub fn get(&self, username: &str) -> Option<&EngagementStats> {
        self.entries
            .iter()
            .find(|e| e.username == username)
            .map(|e| &e.stats)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserEngagement> {
        self.entries.iter()
    }

    /// Entries whose requirement is met
    pub fn meeting_requirement(&self) -> impl Iterator<Item = &UserEngagement> {
        self.entries.iter().filter(|e| e.stats.requirement_met)
    }

    /// Usernames that failed under the skip policy
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a EngagementReport {
    type Item = &'a UserEngagement;
    type IntoIter = std::slice::Iter<'a, UserEngagement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
