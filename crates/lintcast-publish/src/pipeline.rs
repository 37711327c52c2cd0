use lintcast_core::{
    ActionConfig, BudgetScope, Category, CommentConfig, LintcastError, PublishPolicy, Tool,
};
use lintcast_difflens::changeset::ChangeSet;

use crate::compose::compose_body;
use crate::format::{format_findings, CommentBudget, SourceLinker, ToolSection};
use crate::github::GitHubClient;
use crate::report::Report;

/// Composed comment for one category.
#[derive(Debug, Clone)]
pub struct CategoryComment {
    pub category: Category,
    pub cppcheck: ToolSection,
    pub clang_tidy: ToolSection,
    /// Whether the size budget ran out while rendering this category.
    pub truncated: bool,
    /// Markdown body ready to post.
    pub body: String,
}

impl CategoryComment {
    pub fn total_count(&self) -> usize {
        self.cppcheck.count + self.clang_tidy.count
    }
}

/// Compose one comment per category, in [`Category::ALL`] order.
///
/// Both reports are parsed for every category before anything is returned,
/// so a malformed report line fails the run before any comment is posted.
///
/// # Errors
///
/// Returns [`LintcastError::Parse`] if a matching report line is malformed.
pub fn build_comments(
    action: &ActionConfig,
    config: &CommentConfig,
    cppcheck: &Report,
    clang_tidy: &Report,
    changes: &ChangeSet,
) -> Result<Vec<CategoryComment>, LintcastError> {
    let prefix = action.report_prefix();
    let linker = SourceLinker::from_config(action, config);
    let mut run_budget = CommentBudget::new(config.max_size);
    let mut comments = Vec::with_capacity(Category::ALL.len());

    for category in Category::ALL {
        let mut category_budget = CommentBudget::new(config.max_size);
        let budget = match config.budget_scope {
            BudgetScope::PerCategory => &mut category_budget,
            BudgetScope::Run => &mut run_budget,
        };

        let render = |report: &Report,
                      budget: &mut CommentBudget|
         -> Result<ToolSection, LintcastError> {
            let findings = report.findings(&prefix, category)?;
            Ok(format_findings(
                report.tool,
                &findings,
                changes,
                action.only_pr_changes,
                &linker,
                budget,
            ))
        };
        let cppcheck_section = render(cppcheck, &mut *budget)?;
        let clang_tidy_section = render(clang_tidy, &mut *budget)?;
        let truncated = budget.is_exhausted();

        tracing::debug!(
            %category,
            cppcheck = cppcheck_section.count,
            clang_tidy = clang_tidy_section.count,
            truncated,
            "composed category comment"
        );

        let body = compose_body(
            &action.comment_title,
            category,
            &cppcheck_section,
            &clang_tidy_section,
            truncated,
        );
        comments.push(CategoryComment {
            category,
            cppcheck: cppcheck_section,
            clang_tidy: clang_tidy_section,
            truncated,
            body,
        });
    }

    Ok(comments)
}

/// Pick the comments to post.
///
/// Categories with findings counted by `policy` are posted. When none
/// qualify, only the first category's comment is posted so the pull request
/// still gets a single "all clear" comment.
pub fn select_for_publishing(
    comments: &[CategoryComment],
    policy: PublishPolicy,
) -> Vec<&CategoryComment> {
    let counted = |c: &CategoryComment| match policy {
        PublishPolicy::Cppcheck => c.cppcheck.count,
        PublishPolicy::Any => c.total_count(),
    };

    let selected: Vec<&CategoryComment> = comments.iter().filter(|&c| counted(c) > 0).collect();
    if selected.is_empty() {
        comments.iter().take(1).collect()
    } else {
        selected
    }
}

/// Post the selected comments in order.
///
/// Stops at the first failure; comments posted before it remain.
///
/// # Errors
///
/// Returns [`LintcastError::Github`] if a comment cannot be created.
pub async fn publish(
    client: &GitHubClient,
    action: &ActionConfig,
    comments: &[&CategoryComment],
) -> Result<usize, LintcastError> {
    for comment in comments {
        client
            .create_issue_comment(&action.owner, &action.repo, action.pr_number, &comment.body)
            .await?;
        tracing::info!(
            category = %comment.category,
            pr = action.pr_number,
            repo = %action.repo_slug(),
            "posted comment"
        );
    }
    Ok(comments.len())
}

/// Counts of one tool across every category.
pub fn tool_total(comments: &[CategoryComment], tool: Tool) -> usize {
    comments
        .iter()
        .map(|c| match tool {
            Tool::Cppcheck => c.cppcheck.count,
            Tool::ClangTidy => c.clang_tidy.count,
        })
        .sum()
}
