//! JSON snapshot storage for forum data

use forum_core::config::DEFAULT_PLACEHOLDER_USER;
use forum_core::error::{ForumError, Result};
use forum_core::model::{Post, Reply, User};
use forum_core::store::ForumStore;
use forum_core::types::PostId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info, warn};

/// Snapshot schema version written by this crate
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    CURRENT_SNAPSHOT_VERSION
}

/// On-disk forum contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumSnapshot {
    #[serde(default = "default_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl ForumSnapshot {
    /// Replies whose parent post is not in the snapshot
    pub fn dangling_replies(&self) -> usize {
        let ids: HashSet<PostId> = self.posts.iter().map(|p| p.id).collect();
        self.replies
            .iter()
            .filter(|r| !ids.contains(&r.post_id))
            .count()
    }
}

/// Read-only forum store backed by a JSON snapshot file
pub struct SnapshotStore {
    /// Snapshot file location
    path: PathBuf,
    /// Catalog sentinel prepended to the username list
    placeholder_user: String,
    /// Loaded contents
    snapshot: RwLock<ForumSnapshot>,
}

impl SnapshotStore {
    /// Load a snapshot from disk
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = Self::read_snapshot(&path)?;

        Ok(Self {
            path,
            placeholder_user: DEFAULT_PLACEHOLDER_USER.to_string(),
            snapshot: RwLock::new(snapshot),
        })
    }

    /// Default snapshot path (platform data dir, or ~/.forum-insight)
    pub fn default_location() -> PathBuf {
        directories::ProjectDirs::from("com", "forum-insight", "forum-insight")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".forum-insight")
            })
            .join("snapshot.json")
    }

    /// Use a different catalog sentinel
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder_user = placeholder.into();
        self
    }

    /// Re-read the snapshot file, replacing the loaded contents
    pub fn reload(&self) -> Result<()> {
        let snapshot = Self::read_snapshot(&self.path)?;
        *self.write_lock()? = snapshot;
        Ok(())
    }

    /// Get the snapshot path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a snapshot atomically (write to temp, then rename)
    pub fn save(path: &Path, snapshot: &ForumSnapshot) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = path.with_extension("json.tmp");
        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            ForumError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ForumError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved snapshot to {:?}", path);
        Ok(())
    }

    fn read_snapshot(path: &Path) -> Result<ForumSnapshot> {
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ForumError::Storage(format!("Snapshot not found: {}", path.display()))
            } else {
                ForumError::Io(e)
            }
        })?;

        let snapshot: ForumSnapshot = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ForumError::from(e).with_context(format!("Invalid snapshot {}", path.display())))?;

        if snapshot.schema_version > CURRENT_SNAPSHOT_VERSION {
            return Err(ForumError::Storage(format!(
                "Unsupported snapshot schema version: {}",
                snapshot.schema_version
            )));
        }

        let dangling = snapshot.dangling_replies();
        if dangling > 0 {
            warn!("{} replies in {:?} reference missing posts", dangling, path);
        }

        info!(
            users = snapshot.users.len(),
            posts = snapshot.posts.len(),
            replies = snapshot.replies.len(),
            "Loaded snapshot {:?}",
            path
        );
        Ok(snapshot)
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, ForumSnapshot>> {
        self.snapshot
            .read()
            .map_err(|_| ForumError::Storage("Snapshot lock poisoned".to_string()))
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, ForumSnapshot>> {
        self.snapshot
            .write()
            .map_err(|_| ForumError::Storage("Snapshot lock poisoned".to_string()))
    }
}

impl ForumStore for SnapshotStore {
    fn replies(&self) -> Result<Vec<Reply>> {
        Ok(self.read_lock()?.replies.clone())
    }

    fn post(&self, id: PostId) -> Result<Option<Post>> {
        let snapshot = self.read_lock()?;
        Ok(snapshot.posts.iter().find(|p| p.id == id).cloned())
    }

    fn usernames(&self) -> Result<Vec<String>> {
        let snapshot = self.read_lock()?;
        let mut names = Vec::with_capacity(snapshot.users.len() + 1);
        names.push(self.placeholder_user.clone());
        names.extend(snapshot.users.iter().map(|u| u.username.clone()));
        Ok(names)
    }

    fn posts(&self) -> Result<Vec<Post>> {
        Ok(self.read_lock()?.posts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::engagement::EngagementAnalyzer;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_snapshot() -> ForumSnapshot {
        ForumSnapshot {
            schema_version: CURRENT_SNAPSHOT_VERSION,
            users: vec![User::new("alice"), User::new("bob"), User::new("carol")],
            posts: vec![
                Post::new(1, "alice", "Alice's question"),
                Post::new(2, "bob", "Bob's question"),
                Post::new(3, "carol", "Carol's question"),
            ],
            replies: vec![
                Reply::new(1, 2, "alice", "to Bob"),
                Reply::new(2, 3, "alice", "to Carol"),
                Reply::new(3, 1, "alice", "to self"),
            ],
        }
    }

    fn create_test_store() -> (SnapshotStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");
        SnapshotStore::save(&path, &sample_snapshot()).unwrap();
        (SnapshotStore::open(&path).unwrap(), temp_dir)
    }

    #[test]
    fn test_save_and_open() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.replies().unwrap().len(), 3);
        assert_eq!(store.posts().unwrap().len(), 3);
        assert_eq!(store.post(PostId(2)).unwrap().unwrap().author, "bob");
        assert!(store.post(PostId(42)).unwrap().is_none());
    }

    #[test]
    fn test_usernames_start_with_placeholder() {
        let (store, _temp) = create_test_store();
        assert_eq!(
            store.usernames().unwrap(),
            vec!["<Select a User>", "alice", "bob", "carol"]
        );

        let store = store.with_placeholder("(none)");
        assert_eq!(store.usernames().unwrap()[0], "(none)");
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = SnapshotStore::open(temp.path().join("missing.json"));
        assert!(matches!(result, Err(ForumError::Storage(_))));
    }

    #[test]
    fn test_open_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SnapshotStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("Invalid snapshot"));
    }

    #[test]
    fn test_rejects_future_schema() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("future.json");
        fs::write(&path, r#"{"schema_version": 99}"#).unwrap();

        let err = SnapshotStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("Unsupported snapshot schema version"));
    }

    #[test]
    fn test_minimal_snapshot_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.json");
        fs::write(&path, "{}").unwrap();

        let store = SnapshotStore::open(&path).unwrap();
        assert!(store.replies().unwrap().is_empty());
        assert_eq!(store.usernames().unwrap().len(), 1);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let (store, temp) = create_test_store();
        assert!(store.path().exists());
        assert!(!temp.path().join("snapshot.json.tmp").exists());

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("schema_version"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("snapshot.json");
        SnapshotStore::save(&path, &ForumSnapshot::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let (store, _temp) = create_test_store();

        let mut snapshot = sample_snapshot();
        snapshot.replies.push(Reply::new(4, 1, "bob", "to Alice"));
        SnapshotStore::save(store.path(), &snapshot).unwrap();

        assert_eq!(store.replies().unwrap().len(), 3);
        store.reload().unwrap();
        assert_eq!(store.replies().unwrap().len(), 4);
    }

    #[test]
    fn test_dangling_replies() {
        let mut snapshot = sample_snapshot();
        assert_eq!(snapshot.dangling_replies(), 0);

        snapshot.replies.push(Reply::new(9, 77, "bob", "lost"));
        assert_eq!(snapshot.dangling_replies(), 1);
    }

    #[test]
    fn test_analyzer_over_snapshot() {
        let (store, _temp) = create_test_store();
        let analyzer = EngagementAnalyzer::new(store);

        let stats = analyzer.analyze_user("alice").unwrap();
        assert_eq!(stats.unique_count, 2);
        assert!(!stats.requirement_met);

        let report = analyzer.analyze_all().unwrap();
        assert_eq!(report.len(), 3);
        assert_eq!(report.get("bob").unwrap().unique_count, 0);
    }

    #[test]
    fn test_default_location_is_json() {
        let path = SnapshotStore::default_location();
        assert!(path.to_string_lossy().ends_with("snapshot.json"));
    }
}
