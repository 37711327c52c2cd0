use lintcast_core::Category;

use crate::format::ToolSection;

/// Notice appended to a body whose findings were cut by the size budget.
pub const TRUNCATION_NOTICE: &str = "!Maximum character count per GitHub comment has been reached! Not all warnings/errors has been parsed!";

/// Label for `count` findings under the category `tag`.
///
/// Unknown tags fall back to `"issues"`.
///
/// # Examples
///
/// ```
/// use lintcast_publish::compose::category_label;
///
/// assert_eq!(category_label("style:", 2), "style issues");
/// assert_eq!(category_label("error:", 1), "error");
/// assert_eq!(category_label("note:", 1), "issues");
/// ```
pub fn category_label(tag: &str, count: usize) -> String {
    match Category::from_tag(tag) {
        Some(category) if count > 1 => format!("{}s", category.noun()),
        Some(category) => category.noun().to_string(),
        None => "issues".to_string(),
    }
}

/// Banner posted when a category has no findings from either tool.
pub fn no_issues_banner(title: &str) -> String {
    format!(
        "## <p align=\"center\"><b> :white_check_mark: {title} - no issues found! :white_check_mark: </b></p>"
    )
}

/// Compose the comment body for one category.
///
/// The section label is pluralised from the Cppcheck count; the clang-tidy
/// section uses its own `issue`/`issues` wording.
///
/// # Examples
///
/// ```
/// use lintcast_core::{Category, Tool};
/// use lintcast_publish::compose::{compose_body, no_issues_banner};
/// use lintcast_publish::format::ToolSection;
///
/// let body = compose_body(
///     "Static analysis",
///     Category::Error,
///     &ToolSection::empty(Tool::Cppcheck),
///     &ToolSection::empty(Tool::ClangTidy),
///     false,
/// );
/// assert_eq!(body, no_issues_banner("Static analysis"));
/// ```
pub fn compose_body(
    title: &str,
    category: Category,
    cppcheck: &ToolSection,
    clang_tidy: &ToolSection,
    truncated: bool,
) -> String {
    let mut body = if cppcheck.count == 0 && clang_tidy.count == 0 {
        no_issues_banner(title)
    } else {
        let mut body =
            format!("## <p align=\"center\"><b> :zap: {title} :zap: </b></p> \n\n");

        if !cppcheck.text.is_empty() {
            body.push_str(&format!(
                "<details> <summary> <b> :red_circle: {} found {} {}! Click here to see details. </b> </summary> <br>{} </details>",
                cppcheck.tool,
                cppcheck.count,
                category_label(category.tag(), cppcheck.count),
                cppcheck.text,
            ));
        }

        body.push_str("\n\n *** \n");

        if !clang_tidy.text.is_empty() {
            let noun = if clang_tidy.count > 1 { "issues" } else { "issue" };
            body.push_str(&format!(
                "<details> <summary> <b> :red_circle: {} found {} {noun}! Click here to see details. </b> </summary> <br>{} </details><br>\n",
                clang_tidy.tool, clang_tidy.count, clang_tidy.text,
            ));
        }
        body
    };

    if truncated {
        body.push_str(&format!("\n```diff\n{TRUNCATION_NOTICE}\n```"));
    }

    body
}
