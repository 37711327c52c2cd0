use std::path::Path;
use std::process::{Command, Output};

fn run(workspace: &Path, args: &[&str], only_pr_changes: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lintcast"))
        .args(args)
        .current_dir(workspace)
        .env_clear()
        .env("INPUT_GITHUB_TOKEN", "ghp_test")
        .env("INPUT_PR_NUM", "12")
        .env("GITHUB_WORKSPACE", workspace)
        .env("INPUT_REPO", "acme/engine")
        .env("GITHUB_SHA", "cafef00d")
        .env("INPUT_COMMENT_TITLE", "Static analysis")
        .env("INPUT_REPORT_PR_CHANGES_ONLY", only_pr_changes)
        .output()
        .unwrap()
}

fn write_reports(workspace: &Path, cppcheck: &str, clang_tidy: &str) {
    std::fs::write(workspace.join("cppcheck.txt"), cppcheck).unwrap();
    std::fs::write(workspace.join("clang_tidy.txt"), clang_tidy).unwrap();
}

#[test]
fn dry_run_prints_style_comment_with_deep_link() {
    let dir = tempfile::tempdir().unwrap();
    let ws = dir.path().to_string_lossy().into_owned();
    std::fs::create_dir_all(dir.path().join("proj")).unwrap();
    std::fs::write(dir.path().join("proj/a.cpp"), "line\n".repeat(44)).unwrap();
    write_reports(
        dir.path(),
        &format!("{ws}/proj/a.cpp:42: style: message text here [someCheckId]\n"),
        "",
    );

    let output = run(
        dir.path(),
        &["--cppcheck", "cppcheck.txt", "--clangtidy", "clang_tidy.txt", "--dry-run"],
        "false",
    );
    assert!(
        output.status.success(),
        "lintcast failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<!-- lintcast: style -->"));
    assert!(stdout.contains("https://github.com/acme/engine/blob/cafef00d/proj/a.cpp#L42-L44"));
    assert!(stdout.contains("Cppcheck found 1 style issue!"));
    assert_eq!(stdout.matches("<!-- lintcast:").count(), 1);
}

#[test]
fn legacy_short_flags_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    write_reports(dir.path(), "", "");

    let output = run(
        dir.path(),
        &["-cc", "cppcheck.txt", "-ct", "clang_tidy.txt", "--dry-run"],
        "false",
    );
    assert!(
        output.status.success(),
        "lintcast failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<!-- lintcast: error -->"));
    assert!(stdout.contains(":white_check_mark: Static analysis - no issues found!"));
}

#[test]
fn missing_report_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(
        dir.path(),
        &["--cppcheck", "nope.txt", "--clangtidy", "nope.txt", "--dry-run"],
        "false",
    );
    assert!(!output.status.success());
}

#[test]
fn missing_environment_fails_before_reading_reports() {
    let dir = tempfile::tempdir().unwrap();
    write_reports(dir.path(), "", "");

    let output = Command::new(env!("CARGO_BIN_EXE_lintcast"))
        .args(["--cppcheck", "cppcheck.txt", "--clangtidy", "clang_tidy.txt", "--dry-run"])
        .current_dir(dir.path())
        .env_clear()
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT_GITHUB_TOKEN"));
}

#[test]
fn config_file_switches_publish_policy() {
    let dir = tempfile::tempdir().unwrap();
    let ws = dir.path().to_string_lossy().into_owned();
    write_reports(
        dir.path(),
        "",
        &format!("{ws}/src/b.cpp:7:3: warning: use nullptr [modernize-use-nullptr]\n"),
    );
    std::fs::write(
        dir.path().join(".lintcast.toml"),
        "[comment]\npublish_policy = \"any\"\n",
    )
    .unwrap();

    let output = run(
        dir.path(),
        &["--cppcheck", "cppcheck.txt", "--clangtidy", "clang_tidy.txt", "--dry-run"],
        "false",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<!-- lintcast: warning -->"));
    assert!(stdout.contains("clang-tidy found 1 issue!"));
}
