use lintcast_core::{FileStatus, LintcastError};
use lintcast_difflens::changeset::ChangeSet;
use serde::{Deserialize, Serialize};

const FILES_PER_PAGE: usize = 100;

/// One entry of `GET /repos/{owner}/{repo}/pulls/{number}/files`.
///
/// # Examples
///
/// ```
/// use lintcast_core::FileStatus;
/// use lintcast_publish::github::PullFile;
///
/// let file: PullFile = serde_json::from_str(
///     r#"{"filename": "src/a.cpp", "status": "modified", "patch": "@@ -1 +1 @@", "additions": 1}"#,
/// )
/// .unwrap();
/// assert_eq!(file.status, FileStatus::Modified);
/// assert!(file.patch.is_some());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PullFile {
    /// Repository-relative path.
    pub filename: String,
    pub status: FileStatus,
    /// Unified diff of the file; absent for binary or oversized diffs.
    #[serde(default)]
    pub patch: Option<String>,
}

#[derive(Serialize)]
struct PageParams {
    per_page: usize,
    page: u32,
}

/// GitHub client for reading pull request changes and posting comments.
pub struct GitHubClient {
    octocrab: octocrab::Octocrab,
}

impl GitHubClient {
    /// Create a client authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Github`] if the client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lintcast_publish::github::GitHubClient;
    ///
    /// let client = GitHubClient::new("ghp_xxxx").unwrap();
    /// ```
    pub fn new(token: &str) -> Result<Self, LintcastError> {
        let octocrab = octocrab::Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(|e| LintcastError::Github(format!("failed to create GitHub client: {e}")))?;

        Ok(Self { octocrab })
    }

    /// Create a client that talks to `base_uri` instead of `api.github.com`,
    /// such as a GitHub Enterprise Server API root.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Github`] if `base_uri` is not a valid URI or
    /// the client cannot be built.
    pub fn with_base_uri(token: &str, base_uri: &str) -> Result<Self, LintcastError> {
        let octocrab = octocrab::Octocrab::builder()
            .base_uri(base_uri)
            .map_err(|e| LintcastError::Github(format!("invalid GitHub API URI '{base_uri}': {e}")))?
            .personal_token(token.to_string())
            .build()
            .map_err(|e| LintcastError::Github(format!("failed to create GitHub client: {e}")))?;

        Ok(Self { octocrab })
    }

    /// List every file changed by a pull request, following pagination.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Github`] on network or API errors, including an
    /// unknown repository or pull request.
    pub async fn list_pull_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<Vec<PullFile>, LintcastError> {
        let route = format!("/repos/{owner}/{repo}/pulls/{pr_number}/files");
        let mut files = Vec::new();
        let mut page = 1;

        loop {
            let params = PageParams {
                per_page: FILES_PER_PAGE,
                page,
            };
            let batch: Vec<PullFile> = self
                .octocrab
                .get(&route, Some(&params))
                .await
                .map_err(|e| {
                    LintcastError::Github(format!(
                        "failed to list files of {owner}/{repo}#{pr_number}: {e}"
                    ))
                })?;
            let done = batch.len() < FILES_PER_PAGE;
            files.extend(batch);
            if done {
                break;
            }
            page += 1;
        }

        Ok(files)
    }

    /// Fetch the pull request's changed files and their changed line ranges.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Github`] on API errors, or
    /// [`LintcastError::Parse`] if a patch has a malformed hunk header.
    pub async fn fetch_change_set(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<ChangeSet, LintcastError> {
        let files = self.list_pull_files(owner, repo, pr_number).await?;
        tracing::info!(count = files.len(), "changed files in pull request");
        ChangeSet::from_entries(
            files
                .into_iter()
                .map(|f| (f.filename, f.status, f.patch)),
        )
    }

    /// Create a new comment on the pull request's conversation.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Github`] on API errors.
    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<(), LintcastError> {
        let route = format!("/repos/{owner}/{repo}/issues/{pr_number}/comments");
        let payload = serde_json::json!({ "body": body });

        let _response: serde_json::Value = self
            .octocrab
            .post(route, Some(&payload))
            .await
            .map_err(|e| LintcastError::Github(format!("failed to post comment: {e}")))?;

        Ok(())
    }
}
