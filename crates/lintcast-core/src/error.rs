use std::path::PathBuf;

/// Errors that can occur while collecting, formatting, or publishing findings.
///
/// Library crates use this type directly; the binary surfaces it as a
/// `miette` diagnostic at the boundary.
///
/// # Examples
///
/// ```
/// use lintcast_core::LintcastError;
///
/// let err = LintcastError::Config("INPUT_PR_NUM is not set".into());
/// assert!(err.to_string().contains("INPUT_PR_NUM"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LintcastError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    #[diagnostic(help("check the action inputs and the GITHUB_* environment"))]
    Config(String),

    /// GitHub API failure.
    #[error("GitHub error: {0}")]
    Github(String),

    /// Malformed hunk header or report line.
    #[error("parse error: {0}")]
    Parse(String),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}
