//! # ioc-history
//!
//! Reads the history of the inventory file out of a git repository.
//!
//! Uses `gix` (pure Rust git implementation) for:
//! - Repository discovery from an explicit root directory
//! - Walking every commit reachable from HEAD
//! - Reading the inventory blob and commit metadata per revision
//!
//! This crate isolates the `gix` dependency from the rest of the workspace,
//! so compile time impact is limited to this crate only.

mod git;

pub use git::GitHistory;
