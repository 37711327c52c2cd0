use std::path::Path;

use lintcast_core::{Category, Finding, LintcastError, Tool};

/// Raw text report produced by one analysis tool.
///
/// # Examples
///
/// ```
/// use lintcast_core::{Category, Tool};
/// use lintcast_publish::report::Report;
///
/// let report = Report::from_text(
///     Tool::Cppcheck,
///     "/ws/src/a.cpp:3:style: Variable 'x' is assigned a value that is never used.\n",
/// );
/// let findings = report.findings("/ws", Category::Style).unwrap();
/// assert_eq!(findings[0].file, "src/a.cpp");
/// assert_eq!(findings[0].line, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Report {
    /// Tool that produced the report.
    pub tool: Tool,
    lines: Vec<String>,
}

impl Report {
    /// Read a report file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; compilers echo source
    /// snippets verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::FileNotFound`] if `path` does not exist, or
    /// [`LintcastError::Io`] if it cannot be read.
    pub fn from_file(tool: Tool, path: &Path) -> Result<Self, LintcastError> {
        if !path.exists() {
            return Err(LintcastError::FileNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        Ok(Self::from_text(tool, &String::from_utf8_lossy(&bytes)))
    }

    pub fn from_text(tool: Tool, text: &str) -> Self {
        Self {
            tool,
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Findings of `category`, in report order.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Parse`] for the first matching line that is
    /// not `<path>:<line>:<message>`.
    pub fn findings(&self, prefix: &str, category: Category) -> Result<Vec<Finding>, LintcastError> {
        parse_findings(self.lines(), prefix, category)
    }
}

/// Extract the findings of `category` from report lines.
///
/// A line belongs to the category when it contains the category tag anywhere;
/// the check runs on the raw line before `prefix` is removed.
///
/// # Errors
///
/// Returns [`LintcastError::Parse`] for the first matching line that cannot
/// be split into path, line number, and message.
pub fn parse_findings<'a, I>(
    lines: I,
    prefix: &str,
    category: Category,
) -> Result<Vec<Finding>, LintcastError>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter(|line| line.contains(category.tag()))
        .map(|line| parse_line(line, prefix))
        .collect()
}

/// Split one report line of the form `<prefix><path>:<line>:<message>`.
///
/// `prefix` is removed from the start of the line only, so a message that
/// quotes the workspace path keeps it. A leading `/` left on the path is
/// trimmed. The message is whatever follows the first space after the path.
///
/// # Errors
///
/// Returns [`LintcastError::Parse`] if a separator is missing or the line
/// number is not numeric.
///
/// # Examples
///
/// ```
/// use lintcast_publish::report::parse_line;
///
/// let finding = parse_line("/ws/lib/b.cpp:12:4: warning: unused variable 'y' [clang-diagnostic-unused-variable]", "/ws").unwrap();
/// assert_eq!(finding.file, "lib/b.cpp");
/// assert_eq!(finding.line, 12);
/// assert_eq!(finding.message, "warning: unused variable 'y' [clang-diagnostic-unused-variable]");
/// ```
pub fn parse_line(raw: &str, prefix: &str) -> Result<Finding, LintcastError> {
    let line = raw.strip_prefix(prefix).unwrap_or(raw);

    let (path, rest) = line
        .split_once(':')
        .ok_or_else(|| LintcastError::Parse(format!("missing file separator in report line: {raw}")))?;
    let (number, _) = rest
        .split_once(':')
        .ok_or_else(|| LintcastError::Parse(format!("missing line separator in report line: {raw}")))?;
    let line_number: u32 = number
        .trim()
        .parse()
        .map_err(|_| LintcastError::Parse(format!("invalid line number '{number}' in: {raw}")))?;
    let (_, message) = rest
        .split_once(' ')
        .ok_or_else(|| LintcastError::Parse(format!("missing message in report line: {raw}")))?;

    Ok(Finding {
        file: path.trim_start_matches('/').to_string(),
        line: line_number,
        message: message.to_string(),
    })
}
