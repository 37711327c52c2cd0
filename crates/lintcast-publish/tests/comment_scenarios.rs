use lintcast_core::{ActionConfig, Category, CommentConfig, PublishPolicy, Tool};
use lintcast_difflens::changeset::ChangeSet;
use lintcast_publish::compose::no_issues_banner;
use lintcast_publish::pipeline::{build_comments, select_for_publishing};
use lintcast_publish::report::Report;

fn action(workspace: &str) -> ActionConfig {
    ActionConfig::from_lookup(|key| match key {
        "INPUT_GITHUB_TOKEN" => Some("ghp_test".into()),
        "INPUT_PR_NUM" => Some("3".into()),
        "GITHUB_WORKSPACE" => Some(workspace.into()),
        "INPUT_REPO" => Some("acme/engine".into()),
        "GITHUB_SHA" => Some("0123abcd".into()),
        "INPUT_COMMENT_TITLE" => Some("Static analysis".into()),
        "INPUT_REPORT_PR_CHANGES_ONLY" => Some("false".into()),
        _ => None,
    })
    .unwrap()
}

#[test]
fn clean_run_posts_single_all_clear_comment() {
    let action = action("/github/workspace");
    let comments = build_comments(
        &action,
        &CommentConfig::default(),
        &Report::from_text(Tool::Cppcheck, "Checking src/a.cpp ...\n"),
        &Report::from_text(Tool::ClangTidy, ""),
        &ChangeSet::new(),
    )
    .unwrap();

    let selected = select_for_publishing(&comments, PublishPolicy::Cppcheck);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].body, no_issues_banner("Static analysis"));
}

#[test]
fn error_only_run_posts_error_comment_and_skips_clang_tidy_categories() {
    let action = action("/github/workspace");
    let cppcheck = "\
/github/workspace/src/engine.cpp:88:error: Memory leak: buf [memleak]
";
    let clang_tidy = "\
/github/workspace/src/engine.cpp:12:5: warning: use nullptr [modernize-use-nullptr]
/github/workspace/src/engine.cpp:40:1: style: function too long [readability-function-size]
";
    let comments = build_comments(
        &action,
        &CommentConfig::default(),
        &Report::from_text(Tool::Cppcheck, cppcheck),
        &Report::from_text(Tool::ClangTidy, clang_tidy),
        &ChangeSet::new(),
    )
    .unwrap();

    let warning = comments
        .iter()
        .find(|c| c.category == Category::Warning)
        .unwrap();
    assert_eq!(warning.clang_tidy.count, 1);

    let selected = select_for_publishing(&comments, PublishPolicy::Cppcheck);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].category, Category::Error);
    assert!(selected[0].body.contains("Cppcheck found 1 error!"));
    assert!(selected[0]
        .body
        .contains("https://github.com/acme/engine/blob/0123abcd/src/engine.cpp#L88-L93"));
}

#[test]
fn two_style_findings_use_plural_label() {
    let action = action("/github/workspace");
    let cppcheck = "\
/github/workspace/a.cpp:1:style: The scope of the variable 'i' can be reduced. [variableScope]
/github/workspace/a.cpp:9:style: Parameter 'v' can be declared as const [constParameter]
";
    let comments = build_comments(
        &action,
        &CommentConfig::default(),
        &Report::from_text(Tool::Cppcheck, cppcheck),
        &Report::from_text(Tool::ClangTidy, ""),
        &ChangeSet::new(),
    )
    .unwrap();

    let style = comments
        .iter()
        .find(|c| c.category == Category::Style)
        .unwrap();
    assert!(style.body.contains("found 2 style issues!"));
}
