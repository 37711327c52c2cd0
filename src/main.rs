use std::path::{Path, PathBuf};

use clap::Parser;
use miette::Result;

use lintcast_core::{ActionConfig, LintcastConfig, Tool};
use lintcast_difflens::changeset::ChangeSet;
use lintcast_publish::github::GitHubClient;
use lintcast_publish::pipeline::{build_comments, publish, select_for_publishing, tool_total};
use lintcast_publish::report::Report;

#[derive(Parser)]
#[command(
    name = "lintcast",
    version,
    about = "Post cppcheck and clang-tidy results as pull request comments",
    long_about = "Post cppcheck and clang-tidy results as pull request comments.\n\n\
                   Reads both text reports, keeps the findings on lines the pull request\n\
                   changed, and posts one collapsible Markdown comment per severity category.\n\n\
                   Run parameters come from the GitHub Actions environment:\n  \
                     INPUT_GITHUB_TOKEN, INPUT_PR_NUM, GITHUB_WORKSPACE, INPUT_REPO,\n  \
                     GITHUB_SHA, INPUT_COMMENT_TITLE, INPUT_REPORT_PR_CHANGES_ONLY\n\n\
                   Examples:\n  \
                     lintcast --cppcheck cppcheck.txt --clangtidy clang_tidy.txt\n  \
                     lintcast -cc cppcheck.txt -ct clang_tidy.txt --dry-run"
)]
struct Cli {
    /// Cppcheck report file
    #[arg(long)]
    cppcheck: PathBuf,

    /// clang-tidy report file
    #[arg(long)]
    clangtidy: PathBuf,

    /// Path to configuration file (default: .lintcast.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the comments instead of posting them
    #[arg(
        long,
        long_help = "Print the comments that would be posted to stdout instead of posting them.\n\n\
                     The pull request's changed files are still fetched unless\n\
                     INPUT_REPORT_PR_CHANGES_ONLY is \"false\"."
    )]
    dry_run: bool,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

/// Rewrite the single-dash `-cc` / `-ct` spellings used by existing workflows.
fn normalize_legacy_flags(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.as_str() {
            "-cc" => "--cppcheck".to_string(),
            "-ct" => "--clangtidy".to_string(),
            _ => match arg.split_once('=') {
                Some(("-cc", value)) => format!("--cppcheck={value}"),
                Some(("-ct", value)) => format!("--clangtidy={value}"),
                _ => arg,
            },
        })
        .collect()
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<LintcastConfig> {
    let config = match path {
        Some(path) => LintcastConfig::from_file(path)?,
        None => {
            let default_path = Path::new(".lintcast.toml");
            if default_path.exists() {
                LintcastConfig::from_file(default_path)?
            } else {
                LintcastConfig::default()
            }
        }
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args()));
    init_tracing(cli.verbose);

    let action = ActionConfig::from_env()?;
    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(?action, ?config, "loaded configuration");

    let cppcheck = Report::from_file(Tool::Cppcheck, &cli.cppcheck)?;
    let clang_tidy = Report::from_file(Tool::ClangTidy, &cli.clangtidy)?;

    let needs_client = action.only_pr_changes || !cli.dry_run;
    let client = if needs_client {
        Some(GitHubClient::new(&action.token)?)
    } else {
        None
    };

    let changes = match &client {
        Some(client) if action.only_pr_changes => {
            client
                .fetch_change_set(&action.owner, &action.repo, action.pr_number)
                .await?
        }
        _ => ChangeSet::new(),
    };

    let comments = build_comments(&action, &config.comment, &cppcheck, &clang_tidy, &changes)?;
    tracing::info!(
        cppcheck = tool_total(&comments, Tool::Cppcheck),
        clang_tidy = tool_total(&comments, Tool::ClangTidy),
        only_pr_changes = action.only_pr_changes,
        "collected findings"
    );

    let selected = select_for_publishing(&comments, config.comment.publish_policy);

    match client {
        Some(client) if !cli.dry_run => {
            let posted = publish(&client, &action, &selected).await?;
            tracing::info!(
                posted,
                "published comments to {}#{}",
                action.repo_slug(),
                action.pr_number
            );
        }
        _ => {
            for comment in &selected {
                println!("<!-- lintcast: {} -->", comment.category);
                println!("{}", comment.body);
            }
        }
    }

    Ok(())
}
