//! forum-storage - Storage library for forum-insight
//!
//! This crate provides a file-backed implementation of the forum store.

mod snapshot_store;

pub use snapshot_store::{ForumSnapshot, SnapshotStore, CURRENT_SNAPSHOT_VERSION};
