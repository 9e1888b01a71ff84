//! forum-core - Core library for forum-insight
//!
//! This crate provides the non-trivial logic of a small discussion-forum backend:
//! screening free-text input for SQL-injection shaped content, and measuring how
//! many distinct authors each user has replied to.

pub mod config;
pub mod digest;
pub mod engagement;
pub mod error;
pub mod model;
pub mod store;
pub mod types;
pub mod validator;

pub use error::{ForumError, Result};
pub use types::*;
