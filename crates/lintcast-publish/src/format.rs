use std::path::PathBuf;

use lintcast_core::{ActionConfig, CommentConfig, Finding, Tool};
use lintcast_difflens::changeset::{is_relevant, ChangeSet};

/// Size budget for the findings rendered into comment bodies.
///
/// `used` only grows. The first fragment that does not fit marks the budget
/// exhausted and pins `used` to `cap`, so every later fragment is refused.
///
/// # Examples
///
/// ```
/// use lintcast_publish::format::CommentBudget;
///
/// let mut budget = CommentBudget::new(10);
/// assert!(budget.try_consume(6));
/// assert!(!budget.try_consume(6));
/// assert!(budget.is_exhausted());
/// assert_eq!(budget.used(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct CommentBudget {
    cap: usize,
    used: usize,
    exhausted: bool,
}

impl CommentBudget {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            used: 0,
            exhausted: false,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.cap - self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Reserve `len` bytes, or exhaust the budget if they do not fit.
    ///
    /// A fragment that fills the budget exactly is accepted and does not
    /// exhaust it; only a refused fragment does.
    pub fn try_consume(&mut self, len: usize) -> bool {
        if len <= self.remaining() {
            self.used += len;
            true
        } else {
            self.used = self.cap;
            self.exhausted = true;
            false
        }
    }
}

/// Renders findings as deep links into the repository at the analysed commit.
#[derive(Debug, Clone)]
pub struct SourceLinker {
    repo_slug: String,
    sha: String,
    workspace: PathBuf,
    context_lines: u32,
}

impl SourceLinker {
    pub fn new(
        repo_slug: impl Into<String>,
        sha: impl Into<String>,
        workspace: impl Into<PathBuf>,
        context_lines: u32,
    ) -> Self {
        Self {
            repo_slug: repo_slug.into(),
            sha: sha.into(),
            workspace: workspace.into(),
            context_lines,
        }
    }

    pub fn from_config(action: &ActionConfig, comment: &CommentConfig) -> Self {
        Self::new(
            action.repo_slug(),
            action.sha.clone(),
            action.workspace.clone(),
            comment.context_lines,
        )
    }

    /// Last line covered by the link for `finding`.
    ///
    /// Clamped to the length of the local file; when the file cannot be read
    /// the unclamped `line + context_lines` is used.
    pub fn end_line(&self, finding: &Finding) -> u32 {
        let wanted = finding.line.saturating_add(self.context_lines);
        match std::fs::read_to_string(self.workspace.join(&finding.file)) {
            Ok(content) => {
                let total = u32::try_from(content.lines().count()).unwrap_or(u32::MAX);
                wanted.min(total)
            }
            Err(e) => {
                tracing::debug!(file = %finding.file, error = %e, "source not readable, using unclamped end line");
                wanted
            }
        }
    }

    /// Markdown fragment for one finding.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintcast_core::Finding;
    /// use lintcast_publish::format::SourceLinker;
    ///
    /// let linker = SourceLinker::new("octocat/demo", "abc123", "/nonexistent", 5);
    /// let finding = Finding { file: "proj/a.cpp".into(), line: 42, message: "boom".into() };
    /// let fragment = linker.render(&finding);
    /// assert!(fragment.contains("https://github.com/octocat/demo/blob/abc123/proj/a.cpp#L42-L47"));
    /// assert!(fragment.contains("!Line: 42 - boom"));
    /// ```
    pub fn render(&self, finding: &Finding) -> String {
        let end = self.end_line(finding);
        format!(
            "\n\nhttps://github.com/{repo}/blob/{sha}/{file}#L{start}-L{end} \n```diff\n!Line: {start} - {message}\n``` \n <br>\n",
            repo = self.repo_slug,
            sha = self.sha,
            file = finding.file,
            start = finding.line,
            message = finding.message,
        )
    }
}

/// Rendered findings of one tool for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSection {
    pub tool: Tool,
    /// Concatenated fragments.
    pub text: String,
    /// Number of findings rendered into `text`.
    pub count: usize,
}

impl ToolSection {
    pub fn empty(tool: Tool) -> Self {
        Self {
            tool,
            text: String::new(),
            count: 0,
        }
    }
}

/// Render the relevant findings of one tool into a section.
///
/// Findings outside the pull request's changes are skipped when
/// `only_pr_changes` is set. Rendering stops at the first fragment that does
/// not fit the budget; the partial section is returned and the budget is left
/// exhausted.
pub fn format_findings(
    tool: Tool,
    findings: &[Finding],
    changes: &ChangeSet,
    only_pr_changes: bool,
    linker: &SourceLinker,
    budget: &mut CommentBudget,
) -> ToolSection {
    let mut section = ToolSection::empty(tool);
    for finding in findings {
        if !is_relevant(finding, changes, only_pr_changes) {
            continue;
        }
        let fragment = linker.render(finding);
        if !budget.try_consume(fragment.len()) {
            tracing::warn!(
                %tool,
                rendered = section.count,
                cap = budget.cap(),
                "comment size budget exhausted, truncating"
            );
            return section;
        }
        section.text.push_str(&fragment);
        section.count += 1;
    }
    section
}
