//! Read-only access to forum data
//!
//! The storage collaborator owns users, posts and replies. The core never
//! manages connections, transactions or schema; it only calls these reads.

use crate::error::Result;
use crate::model::{Post, Reply};
use crate::types::PostId;

/// Trait for forum data sources
pub trait ForumStore: Send + Sync {
    /// All replies, in storage order
    fn replies(&self) -> Result<Vec<Reply>>;

    /// Look up a post by ID
    fn post(&self, id: PostId) -> Result<Option<Post>>;

    /// The username catalog, including its placeholder entry
    fn usernames(&self) -> Result<Vec<String>>;

    /// All posts, in storage order
    fn posts(&self) -> Result<Vec<Post>>;
}

/// In-memory store for testing
#[cfg(test)]
pub mod memory {
    use super::*;
    use crate::config::DEFAULT_PLACEHOLDER_USER;
    use crate::error::ForumError;
    use std::sync::RwLock;

    /// In-memory forum store for testing
    pub struct MemoryStore {
        users: RwLock<Vec<String>>,
        posts: RwLock<Vec<Post>>,
        replies: RwLock<Vec<Reply>>,
        fail_with: Option<String>,
    }

    impl MemoryStore {
        /// Create an empty store whose catalog holds only the placeholder
        pub fn new() -> Self {
            Self {
                users: RwLock::new(vec![DEFAULT_PLACEHOLDER_USER.to_string()]),
                posts: RwLock::new(Vec::new()),
                replies: RwLock::new(Vec::new()),
                fail_with: None,
            }
        }

        /// A store whose every read fails with a storage error
        pub fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::new()
            }
        }

        pub fn add_user(&self, username: &str) {
            self.users.write().unwrap().push(username.to_string());
        }

        /// Add a post authored by `author` and return its ID
        pub fn add_post(&self, author: &str, content: &str) -> PostId {
            let mut posts = self.posts.write().unwrap();
            let id = PostId(posts.len() as i64 + 1);
            posts.push(Post::new(id, author, content));
            id
        }

        pub fn insert_post(&self, post: Post) {
            self.posts.write().unwrap().push(post);
        }

        pub fn add_reply(&self, post_id: PostId, author: &str, content: &str) {
            let mut replies = self.replies.write().unwrap();
            let id = replies.len() as i64 + 1;
            replies.push(Reply::new(id, post_id, author, content));
        }

        fn check(&self) -> Result<()> {
            match &self.fail_with {
                Some(message) => Err(ForumError::Storage(message.clone())),
                None => Ok(()),
            }
        }
    }

    impl Default for MemoryStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ForumStore for MemoryStore {
        fn replies(&self) -> Result<Vec<Reply>> {
            self.check()?;
            Ok(self.replies.read().unwrap().clone())
        }

        fn post(&self, id: PostId) -> Result<Option<Post>> {
            self.check()?;
            let posts = self.posts.read().unwrap();
            Ok(posts.iter().find(|p| p.id == id).cloned())
        }

        fn usernames(&self) -> Result<Vec<String>> {
            self.check()?;
            Ok(self.users.read().unwrap().clone())
        }

        fn posts(&self) -> Result<Vec<Post>> {
            self.check()?;
            Ok(self.posts.read().unwrap().clone())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_memory_store_posts() {
            let store = MemoryStore::new();
            let id = store.add_post("alice", "Hello");

            let post = store.post(id).unwrap().unwrap();
            assert_eq!(post.author, "alice");
            assert!(store.post(PostId(99)).unwrap().is_none());
        }

        #[test]
        fn test_memory_store_catalog_starts_with_placeholder() {
            let store = MemoryStore::new();
            store.add_user("alice");

            let users = store.usernames().unwrap();
            assert_eq!(users, vec![DEFAULT_PLACEHOLDER_USER, "alice"]);
        }

        #[test]
        fn test_memory_store_replies_keep_order() {
            let store = MemoryStore::new();
            let id = store.add_post("alice", "Hello");
            store.add_reply(id, "bob", "first");
            store.add_reply(id, "carol", "second");

            let replies = store.replies().unwrap();
            assert_eq!(replies.len(), 2);
            assert_eq!(replies[0].author, "bob");
            assert_eq!(replies[1].author, "carol");
        }

        #[test]
        fn test_failing_store() {
            let store = MemoryStore::failing("database offline");
            assert!(matches!(store.replies(), Err(ForumError::Storage(_))));
            assert!(store.post(PostId(1)).is_err());
        }
    }
}
