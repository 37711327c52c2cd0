use std::fmt;

use lintcast_core::{LineRange, LintcastError};

/// Parsed `@@ -a,b +c,d @@` header of a unified-diff hunk.
///
/// # Examples
///
/// ```
/// use lintcast_difflens::parser::HunkHeader;
///
/// let header = HunkHeader::parse("@@ -43,6 +48,8 @@ fn main() {").unwrap();
/// assert_eq!(header.new_start, 48);
/// assert_eq!(header.new_lines, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    /// Starting line in the old version.
    pub old_start: u32,
    /// Number of lines in the old version.
    pub old_lines: u32,
    /// Starting line in the new version.
    pub new_start: u32,
    /// Number of lines in the new version.
    pub new_lines: u32,
}

impl HunkHeader {
    /// Parse a hunk header line.
    ///
    /// A range without a count (`+5`) has an implicit count of one.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Parse`] if the `@@` delimiters, the `-`/`+`
    /// markers, or the numbers are missing or malformed.
    pub fn parse(line: &str) -> Result<Self, LintcastError> {
        let inner = line
            .strip_prefix("@@ ")
            .and_then(|s| {
                let end = s.find(" @@")?;
                Some(&s[..end])
            })
            .ok_or_else(|| LintcastError::Parse(format!("invalid hunk header: {line}")))?;

        let parts: Vec<&str> = inner.split(' ').collect();
        if parts.len() != 2 {
            return Err(LintcastError::Parse(format!("invalid hunk header: {line}")));
        }

        let old = parts[0]
            .strip_prefix('-')
            .ok_or_else(|| LintcastError::Parse(format!("invalid old range in hunk: {line}")))?;
        let new = parts[1]
            .strip_prefix('+')
            .ok_or_else(|| LintcastError::Parse(format!("invalid new range in hunk: {line}")))?;

        let (old_start, old_lines) = parse_range(old, line)?;
        let (new_start, new_lines) = parse_range(new, line)?;

        Ok(Self {
            old_start,
            old_lines,
            new_start,
            new_lines,
        })
    }

    /// Lines touched in the new version, `[new_start, new_start + new_lines]`.
    ///
    /// The end is inclusive, so the range reaches one line past the hunk.
    /// Findings reported on the line right after an edit still count as part
    /// of the change.
    pub fn new_range(&self) -> LineRange {
        LineRange {
            start: self.new_start,
            end: self.new_start.saturating_add(self.new_lines),
        }
    }
}

impl fmt::Display for HunkHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_lines, self.new_start, self.new_lines
        )
    }
}

/// Collect the new-version line range of every hunk in a per-file patch.
///
/// Only header lines are inspected; hunk bodies are skipped.
///
/// # Errors
///
/// Returns [`LintcastError::Parse`] on the first malformed hunk header.
///
/// # Examples
///
/// ```
/// use lintcast_difflens::parser::changed_ranges;
/// use lintcast_core::LineRange;
///
/// let patch = "@@ -1,3 +1,4 @@\n fn main() {\n+    hello();\n }\n";
/// let ranges = changed_ranges(patch).unwrap();
/// assert_eq!(ranges, vec![LineRange { start: 1, end: 5 }]);
/// ```
pub fn changed_ranges(patch: &str) -> Result<Vec<LineRange>, LintcastError> {
    patch
        .lines()
        .filter(|line| line.starts_with("@@"))
        .map(|line| HunkHeader::parse(line).map(|h| h.new_range()))
        .collect()
}

fn parse_range(range: &str, context: &str) -> Result<(u32, u32), LintcastError> {
    if let Some((start, count)) = range.split_once(',') {
        let s = start
            .parse()
            .map_err(|_| LintcastError::Parse(format!("invalid range number in: {context}")))?;
        let c = count
            .parse()
            .map_err(|_| LintcastError::Parse(format!("invalid range count in: {context}")))?;
        Ok((s, c))
    } else {
        let s = range
            .parse()
            .map_err(|_| LintcastError::Parse(format!("invalid range number in: {context}")))?;
        Ok((s, 1))
    }
}
