//! Read-only thread digests
//!
//! Pin limits, display ordering and unread-reply counts, derived from the
//! posts the store hands back. Storage enforces the pin limit on write;
//! these helpers let callers check it before asking.

use crate::error::{ForumError, Result};
use crate::model::Post;
use crate::store::ForumStore;
use crate::types::PostId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of posts pinned at once, system-wide
pub const MAX_PINNED_POSTS: usize = 3;

/// Whether another post may be pinned
pub fn can_pin(posts: &[Post]) -> bool {
    pinned_count(posts) < MAX_PINNED_POSTS
}

fn pinned_count(posts: &[Post]) -> usize {
    posts.iter().filter(|p| p.pinned).count()
}

/// Pinned posts first, then newest (highest ID) first
pub fn display_order(posts: &[Post]) -> Vec<&Post> {
    let mut ordered: Vec<&Post> = posts.iter().collect();
    ordered.sort_by(|a, b| b.pinned.cmp(&a.pinned).then(b.id.cmp(&a.id)));
    ordered
}

/// Number of `username`'s posts flagged with unread replies
pub fn unread_reply_count(posts: &[Post], username: &str) -> usize {
    posts
        .iter()
        .filter(|p| p.author == username && p.has_unread_replies)
        .count()
}

/// A pinned post as shown in a digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedPost {
    pub id: PostId,
    pub author: String,
    pub content: String,
}

impl From<&Post> for PinnedPost {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            author: post.author.clone(),
            content: post.content.clone(),
        }
    }
}

/// Summary of what a user should see on their home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDigest {
    pub username: String,
    /// Posts by the user with unread replies
    pub unread_replies: usize,
    /// Latest reply to any of the user's posts
    pub last_reply_at: Option<DateTime<Utc>>,
    /// Currently pinned posts, in display order
    pub pinned: Vec<PinnedPost>,
}

/// Build the digest for `username`
pub fn digest_for(store: &dyn ForumStore, username: &str) -> Result<UserDigest> {
    if username.trim().is_empty() {
        return Err(ForumError::InvalidArgument(
            "Username cannot be empty".to_string(),
        ));
    }

    let posts = store.posts()?;
    let last_reply_at = posts
        .iter()
        .filter(|p| p.author == username)
        .filter_map(|p| p.last_reply_at)
        .max();
    let pinned = display_order(&posts)
        .into_iter()
        .filter(|p| p.pinned)
        .map(PinnedPost::from)
        .collect();

    Ok(UserDigest {
        username: username.to_string(),
        unread_replies: unread_reply_count(&posts, username),
        last_reply_at,
        pinned,
    })
}

/// Look up a post that must exist
pub fn require_post(store: &dyn ForumStore, id: PostId) -> Result<Post> {
    store.post(id)?.ok_or(ForumError::PostNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 20, hour, 0, 0).unwrap()
    }

    fn board() -> Vec<Post> {
        vec![
            Post::new(1, "alice", "old").pinned_by("admin"),
            Post::new(2, "alice", "mid").with_unread_reply(at(9)),
            Post::new(3, "bob", "new").pinned_by("admin"),
            Post::new(4, "alice", "newest").with_unread_reply(at(11)),
        ]
    }

    #[test]
    fn test_can_pin_until_limit() {
        let mut posts = board();
        assert!(can_pin(&posts));

        posts.push(Post::new(5, "carol", "x").pinned_by("admin"));
        assert!(!can_pin(&posts));
    }

    #[test]
    fn test_display_order() {
        let posts = board();
        let ids: Vec<i64> = display_order(&posts).iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_unread_reply_count() {
        let posts = board();
        assert_eq!(unread_reply_count(&posts, "alice"), 2);
        assert_eq!(unread_reply_count(&posts, "bob"), 0);
    }

    #[test]
    fn test_digest_for_user() {
        let store = MemoryStore::new();
        for post in board() {
            store.insert_post(post);
        }

        let digest = digest_for(&store, "alice").unwrap();
        assert_eq!(
            digest,
            UserDigest {
                username: "alice".to_string(),
                unread_replies: 2,
                last_reply_at: Some(at(11)),
                pinned: vec![
                    PinnedPost {
                        id: PostId(3),
                        author: "bob".to_string(),
                        content: "new".to_string(),
                    },
                    PinnedPost {
                        id: PostId(1),
                        author: "alice".to_string(),
                        content: "old".to_string(),
                    },
                ],
            }
        );

        let digest = digest_for(&store, "dave").unwrap();
        assert_eq!(digest.unread_replies, 0);
        assert!(digest.last_reply_at.is_none());
    }

    #[test]
    fn test_digest_rejects_blank_user() {
        let store = MemoryStore::new();
        assert!(matches!(
            digest_for(&store, " "),
            Err(ForumError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_require_post() {
        let store = MemoryStore::new();
        let id = store.add_post("alice", "hi");

        assert_eq!(require_post(&store, id).unwrap().author, "alice");
        assert!(matches!(
            require_post(&store, PostId(9)),
            Err(ForumError::PostNotFound(PostId(9)))
        ));
    }
}
