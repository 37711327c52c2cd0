use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LintcastError;

const DEFAULT_COMMENT_TITLE: &str = "Static analysis result";

/// Run parameters supplied by the CI environment.
///
/// Built once at startup and passed by reference to every stage.
///
/// | Variable                       | Field             |
/// |--------------------------------|-------------------|
/// | `INPUT_GITHUB_TOKEN`           | `token`           |
/// | `INPUT_PR_NUM`                 | `pr_number`       |
/// | `GITHUB_WORKSPACE`             | `workspace`       |
/// | `INPUT_REPO`                   | `owner` / `repo`  |
/// | `GITHUB_SHA`                   | `sha`             |
/// | `INPUT_COMMENT_TITLE`          | `comment_title`   |
/// | `INPUT_REPORT_PR_CHANGES_ONLY` | `only_pr_changes` |
///
/// # Examples
///
/// ```
/// use lintcast_core::ActionConfig;
///
/// let config = ActionConfig::from_lookup(|key| match key {
///     "INPUT_GITHUB_TOKEN" => Some("ghp_xxxx".into()),
///     "INPUT_PR_NUM" => Some("17".into()),
///     "GITHUB_WORKSPACE" => Some("/github/workspace".into()),
///     "INPUT_REPO" => Some("octocat/hello-world".into()),
///     "GITHUB_SHA" => Some("abc123".into()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(config.pr_number, 17);
/// assert_eq!(config.repo_slug(), "octocat/hello-world");
/// assert!(config.only_pr_changes);
/// ```
#[derive(Clone)]
pub struct ActionConfig {
    /// Token used to authenticate against the GitHub API.
    pub token: String,
    /// Pull request the comments are posted to.
    pub pr_number: u64,
    /// Local checkout root; also the prefix stripped from report paths.
    pub workspace: PathBuf,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Commit used for source deep links.
    pub sha: String,
    /// Title rendered in every comment banner.
    pub comment_title: String,
    /// When `false`, every finding is reported regardless of the PR diff.
    pub only_pr_changes: bool,
}

impl ActionConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Config`] if a required variable is missing or
    /// malformed.
    pub fn from_env() -> Result<Self, LintcastError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Config`] if a required variable is missing or
    /// malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LintcastError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, LintcastError> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => Err(LintcastError::Config(format!("{key} is not set"))),
            }
        };

        let token = required("INPUT_GITHUB_TOKEN")?;
        let pr_raw = required("INPUT_PR_NUM")?;
        let pr_number: u64 = pr_raw
            .parse()
            .map_err(|_| LintcastError::Config(format!("invalid INPUT_PR_NUM: {pr_raw}")))?;
        let workspace = PathBuf::from(required("GITHUB_WORKSPACE")?);
        let (owner, repo) = parse_repo_slug(&required("INPUT_REPO")?)?;
        let sha = required("GITHUB_SHA")?;
        let comment_title = lookup("INPUT_COMMENT_TITLE")
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMMENT_TITLE.to_string());
        let only_pr_changes = lookup("INPUT_REPORT_PR_CHANGES_ONLY").as_deref() != Some("false");

        Ok(Self {
            token,
            pr_number,
            workspace,
            owner,
            repo,
            sha,
            comment_title,
            only_pr_changes,
        })
    }

    /// `owner/name` form of the target repository.
    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Prefix the analysis tools print before repository-relative paths.
    pub fn report_prefix(&self) -> String {
        self.workspace.to_string_lossy().into_owned()
    }
}

impl fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("token", &"<redacted>")
            .field("pr_number", &self.pr_number)
            .field("workspace", &self.workspace)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("sha", &self.sha)
            .field("comment_title", &self.comment_title)
            .field("only_pr_changes", &self.only_pr_changes)
            .finish()
    }
}

/// Split an `owner/name` repository identifier.
///
/// # Errors
///
/// Returns [`LintcastError::Config`] unless the value has exactly one `/`
/// with non-empty parts on both sides.
///
/// # Examples
///
/// ```
/// use lintcast_core::config::parse_repo_slug;
///
/// let (owner, repo) = parse_repo_slug("rust-lang/rust").unwrap();
/// assert_eq!(owner, "rust-lang");
/// assert_eq!(repo, "rust");
/// assert!(parse_repo_slug("rust").is_err());
/// ```
pub fn parse_repo_slug(slug: &str) -> Result<(String, String), LintcastError> {
    let invalid =
        || LintcastError::Config(format!("invalid INPUT_REPO '{slug}', expected owner/name"));
    let (owner, repo) = slug.split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(invalid());
    }
    Ok((owner.to_string(), repo.to_string()))
}

/// Tuning loaded from `.lintcast.toml`.
///
/// # Examples
///
/// ```
/// use lintcast_core::LintcastConfig;
///
/// let config = LintcastConfig::default();
/// assert_eq!(config.comment.max_size, 65000);
/// assert_eq!(config.comment.context_lines, 5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintcastConfig {
    /// Comment rendering and publishing settings.
    #[serde(default)]
    pub comment: CommentConfig,
}

impl LintcastConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Io`] if the file cannot be read, or
    /// [`LintcastError::Toml`] if the content is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, LintcastError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintcast_core::{BudgetScope, LintcastConfig};
    ///
    /// let toml = r#"
    /// [comment]
    /// budget_scope = "run"
    /// "#;
    /// let config = LintcastConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.comment.budget_scope, BudgetScope::Run);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, LintcastError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Settings for rendering and publishing comment bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentConfig {
    /// Maximum size in bytes of the findings rendered into one budget (default: 65000).
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Lines after the finding covered by the deep link (default: 5).
    #[serde(default = "default_context_lines")]
    pub context_lines: u32,
    /// Whether the size budget is reset for every category.
    #[serde(default)]
    pub budget_scope: BudgetScope,
    /// Which tool counts decide whether a category comment is posted.
    #[serde(default)]
    pub publish_policy: PublishPolicy,
}

// GitHub caps comments at 65536 characters; leave room for the banners.
fn default_max_size() -> usize {
    65000
}

fn default_context_lines() -> u32 {
    5
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            context_lines: default_context_lines(),
            budget_scope: BudgetScope::default(),
            publish_policy: PublishPolicy::default(),
        }
    }
}

/// Lifetime of the comment size budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetScope {
    /// A fresh budget for each category comment.
    #[default]
    PerCategory,
    /// One budget shared by every category in the run.
    Run,
}

/// Rule selecting which category comments get published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublishPolicy {
    /// Publish categories with Cppcheck findings only.
    #[default]
    Cppcheck,
    /// Publish categories with findings from either tool.
    Any,
}
