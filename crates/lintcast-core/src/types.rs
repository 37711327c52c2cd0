use std::fmt;

use serde::Deserialize;

/// Severity category a report line can be grouped under.
///
/// Each category carries the tag used as a substring filter over raw report
/// lines. The portability tag has no trailing colon, which is how both tools
/// print it.
///
/// # Examples
///
/// ```
/// use lintcast_core::Category;
///
/// assert_eq!(Category::Style.tag(), "style:");
/// assert_eq!(Category::Portability.tag(), "portability");
/// assert_eq!(Category::ALL[0], Category::Error);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Definite defects.
    Error,
    /// Likely defects.
    Warning,
    /// Non-portable constructs.
    Portability,
    /// Avoidable inefficiencies.
    Performance,
    /// Stylistic issues.
    Style,
    /// Informational messages.
    Information,
}

impl Category {
    /// All categories in the order their comments are composed and published.
    pub const ALL: [Category; 6] = [
        Category::Error,
        Category::Warning,
        Category::Portability,
        Category::Performance,
        Category::Style,
        Category::Information,
    ];

    /// Substring a report line must contain to belong to this category.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Error => "error:",
            Category::Warning => "warning:",
            Category::Portability => "portability",
            Category::Performance => "performance:",
            Category::Style => "style:",
            Category::Information => "information:",
        }
    }

    /// Singular noun used in comment section headers.
    pub fn noun(self) -> &'static str {
        match self {
            Category::Error => "error",
            Category::Warning => "warning",
            Category::Portability => "portability issue",
            Category::Performance => "performance issue",
            Category::Style => "style issue",
            Category::Information => "information issue",
        }
    }

    /// Resolve a category from its tag, with or without the trailing colon.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintcast_core::Category;
    ///
    /// assert_eq!(Category::from_tag("style:"), Some(Category::Style));
    /// assert_eq!(Category::from_tag("portability:"), Some(Category::Portability));
    /// assert_eq!(Category::from_tag("note:"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim_end_matches(':') {
            "error" => Some(Category::Error),
            "warning" => Some(Category::Warning),
            "portability" => Some(Category::Portability),
            "performance" => Some(Category::Performance),
            "style" => Some(Category::Style),
            "information" => Some(Category::Information),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().trim_end_matches(':'))
    }
}

/// Static-analysis tool whose report is being published.
///
/// # Examples
///
/// ```
/// use lintcast_core::Tool;
///
/// assert_eq!(Tool::Cppcheck.to_string(), "Cppcheck");
/// assert_eq!(Tool::ClangTidy.to_string(), "clang-tidy");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Cppcheck,
    ClangTidy,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Cppcheck => write!(f, "Cppcheck"),
            Tool::ClangTidy => write!(f, "clang-tidy"),
        }
    }
}

/// Status GitHub reports for a file changed by a pull request.
///
/// # Examples
///
/// ```
/// use lintcast_core::FileStatus;
///
/// let s: FileStatus = serde_json::from_str("\"added\"").unwrap();
/// assert_eq!(s, FileStatus::Added);
/// let unknown: FileStatus = serde_json::from_str("\"exotic\"").unwrap();
/// assert_eq!(unknown, FileStatus::Other);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Other,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "added"),
            FileStatus::Removed => write!(f, "removed"),
            FileStatus::Modified => write!(f, "modified"),
            FileStatus::Renamed => write!(f, "renamed"),
            FileStatus::Copied => write!(f, "copied"),
            FileStatus::Changed => write!(f, "changed"),
            FileStatus::Unchanged => write!(f, "unchanged"),
            FileStatus::Other => write!(f, "other"),
        }
    }
}

/// Inclusive range of lines in the post-change version of a file.
///
/// # Examples
///
/// ```
/// use lintcast_core::LineRange;
///
/// let range = LineRange { start: 10, end: 20 };
/// assert!(range.contains(10));
/// assert!(range.contains(20));
/// assert!(!range.contains(21));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn contains(&self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A single finding extracted from a tool report.
///
/// # Examples
///
/// ```
/// use lintcast_core::Finding;
///
/// let finding = Finding {
///     file: "proj/a.cpp".into(),
///     line: 42,
///     message: "message text here [someCheckId]".into(),
/// };
/// assert_eq!(finding.line, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Repository-relative path as printed by the tool.
    pub file: String,
    /// First line the finding refers to.
    pub line: u32,
    /// Free-text description following the location.
    pub message: String,
}
