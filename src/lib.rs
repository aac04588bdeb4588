//! Skysweep - Bluesky account archival and retention sweeps.
//!
//! Archives an account's repository and media blobs locally, then deletes
//! posts and removes likes that exceed configured age or popularity
//! thresholds. Two marks exempt a post from deletion: the account liking
//! its own post, and the post linking to a protected domain.
//!
//! # Architecture
//!
//! The decision core is pure and separated from every network concern:
//!
//! - **`domain::policy`** - validated thresholds and classification rules
//! - **`domain::selection`** - computes the deletion plan from a snapshot
//! - **`account`** - the capability trait a remote account client provides
//! - **`bsky`** - Bluesky XRPC implementation of [`account::AccountClient`]
//! - **`app`** - orchestration: archive, collect, select, execute
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and the environment
//! - [`domain`] - Account-agnostic types: records, policy, plans
//! - [`error`] - Error types for the crate
//! - [`account`] - Trait definitions for account client implementations
//! - [`bsky`] - Bluesky-specific implementation
//! - [`app`] - Application orchestration
//! - [`cli`] - Command definitions and console output
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use skysweep::domain::{build_plan, Did, Like, Post, RetentionPolicy};
//!
//! let policy = RetentionPolicy::try_new(100, 30, Vec::new()).unwrap();
//! let likes: Vec<Like> = Vec::new();
//! let posts: Vec<Post> = Vec::new();
//! let plan = build_plan(&policy, &Did::new("did:plc:alice"), &likes, &posts, Utc::now());
//! assert!(plan.is_empty());
//! ```

pub mod account;
pub mod app;
pub mod bsky;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
