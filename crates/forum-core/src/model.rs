//! Forum data models
//!
//! These entities are owned by the storage collaborator. The core only reads them.

use crate::types::{PostId, ReplyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level discussion post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post identifier
    pub id: PostId,
    /// Username of the author
    pub author: String,
    /// Post body
    pub content: String,
    /// Role the author posted under, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_role: Option<String>,
    /// Whether an admin pinned this post
    #[serde(default)]
    pub pinned: bool,
    /// Admin who pinned the post
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_by: Option<String>,
    /// Set when a reply arrives, cleared when the author reads it
    #[serde(default)]
    pub has_unread_replies: bool,
    /// When the most recent reply was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reply_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create an unpinned post with no replies
    pub fn new(id: impl Into<PostId>, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            content: content.into(),
            author_role: None,
            pinned: false,
            pinned_by: None,
            has_unread_replies: false,
            last_reply_at: None,
        }
    }

    /// Mark the post as pinned by `admin`
    pub fn pinned_by(mut self, admin: impl Into<String>) -> Self {
        self.pinned = true;
        self.pinned_by = Some(admin.into());
        self
    }

    /// Record an unread reply at `at`
    pub fn with_unread_reply(mut self, at: DateTime<Utc>) -> Self {
        self.has_unread_replies = true;
        self.last_reply_at = Some(at);
        self
    }
}

/// A reply to a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Reply identifier
    pub id: ReplyId,
    /// Post this reply responds to
    pub post_id: PostId,
    /// Username of the author
    pub author: String,
    /// Reply body
    pub content: String,
    /// Role the author replied under, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_role: Option<String>,
}

impl Reply {
    /// Create a reply
    pub fn new(
        id: impl Into<ReplyId>,
        post_id: impl Into<PostId>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            post_id: post_id.into(),
            author: author.into(),
            content: content.into(),
            author_role: None,
        }
    }
}

/// A registered forum user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, case-sensitive username
    pub username: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub role1: bool,
    #[serde(default)]
    pub role2: bool,
}

impl User {
    /// Create a user with no roles
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            admin: false,
            role1: false,
            role2: false,
        }
    }
}
