//! Core types, configuration, and error handling for lintcast.
//!
//! This crate provides the shared foundation used by the other lintcast crates:
//! - [`LintcastError`]: unified error type using `thiserror`
//! - [`ActionConfig`]: run parameters read from the CI environment
//! - [`LintcastConfig`]: comment tuning loaded from `.lintcast.toml`
//! - Shared types: [`Category`], [`Tool`], [`FileStatus`], [`LineRange`], [`Finding`]

pub mod config;
mod error;
mod types;

pub use config::{ActionConfig, BudgetScope, CommentConfig, LintcastConfig, PublishPolicy};
pub use error::LintcastError;
pub use types::{Category, FileStatus, Finding, LineRange, Tool};

/// A convenience `Result` type for lintcast operations.
pub type Result<T> = std::result::Result<T, LintcastError>;
