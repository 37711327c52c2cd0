use std::collections::HashMap;

use lintcast_core::{FileStatus, Finding, LineRange, LintcastError};

use crate::parser::changed_ranges;

/// A file touched by the pull request together with its changed line ranges.
///
/// # Examples
///
/// ```
/// use lintcast_core::FileStatus;
/// use lintcast_difflens::changeset::ChangedFile;
///
/// let file = ChangedFile::from_patch("src/a.cpp", FileStatus::Modified, "@@ -1,2 +10,10 @@\n").unwrap();
/// assert!(file.covers(15));
/// assert!(!file.covers(21));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Repository-relative path.
    pub path: String,
    /// Status reported by GitHub.
    pub status: FileStatus,
    /// Changed ranges in the new version, in patch order.
    pub ranges: Vec<LineRange>,
}

impl ChangedFile {
    /// Build a changed file from its per-file patch text.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Parse`] if a hunk header is malformed.
    pub fn from_patch(
        path: impl Into<String>,
        status: FileStatus,
        patch: &str,
    ) -> Result<Self, LintcastError> {
        Ok(Self {
            path: path.into(),
            status,
            ranges: changed_ranges(patch)?,
        })
    }

    /// Whether a finding on `line` belongs to this change.
    ///
    /// Added files cover every line.
    pub fn covers(&self, line: u32) -> bool {
        self.status == FileStatus::Added || self.ranges.iter().any(|r| r.contains(line))
    }
}

/// Files changed by a pull request, keyed by repository-relative path.
///
/// Files without a patch (binary, too large) are never inserted, so a missing
/// entry means the line cannot be judged rather than "unchanged".
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    files: HashMap<String, ChangedFile>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a change set from `(path, status, patch)` entries.
    ///
    /// Entries without a patch are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LintcastError::Parse`] on the first malformed hunk header.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintcast_core::FileStatus;
    /// use lintcast_difflens::changeset::ChangeSet;
    ///
    /// let changes = ChangeSet::from_entries(vec![
    ///     ("src/a.cpp".to_string(), FileStatus::Modified, Some("@@ -1,1 +1,2 @@\n".to_string())),
    ///     ("logo.png".to_string(), FileStatus::Added, None),
    /// ])
    /// .unwrap();
    /// assert_eq!(changes.len(), 1);
    /// assert!(changes.get("logo.png").is_none());
    /// ```
    pub fn from_entries<I>(entries: I) -> Result<Self, LintcastError>
    where
        I: IntoIterator<Item = (String, FileStatus, Option<String>)>,
    {
        let mut changes = Self::new();
        for (path, status, patch) in entries {
            if let Some(patch) = patch {
                changes.insert(ChangedFile::from_patch(path, status, &patch)?);
            }
        }
        Ok(changes)
    }

    pub fn insert(&mut self, file: ChangedFile) {
        self.files.insert(file.path.clone(), file);
    }

    pub fn get(&self, path: &str) -> Option<&ChangedFile> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether `line` of `path` falls inside the pull request's changes.
    pub fn covers(&self, path: &str, line: u32) -> bool {
        self.get(path).is_some_and(|file| file.covers(line))
    }
}

/// Decide whether a finding should be reported.
///
/// With `only_pr_changes` off every finding is relevant; otherwise the
/// finding must land on a line the pull request changed.
///
/// # Examples
///
/// ```
/// use lintcast_core::Finding;
/// use lintcast_difflens::changeset::{is_relevant, ChangeSet};
///
/// let finding = Finding { file: "a.cpp".into(), line: 3, message: "m".into() };
/// let empty = ChangeSet::new();
/// assert!(is_relevant(&finding, &empty, false));
/// assert!(!is_relevant(&finding, &empty, true));
/// ```
pub fn is_relevant(finding: &Finding, changes: &ChangeSet, only_pr_changes: bool) -> bool {
    if !only_pr_changes {
        return true;
    }
    let relevant = changes.covers(&finding.file, finding.line);
    tracing::debug!(
        file = %finding.file,
        line = finding.line,
        relevant,
        "checked finding against PR changes"
    );
    relevant
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(file: &str, line: u32) -> Finding {
        Finding {
            file: file.into(),
            line,
            message: "message".into(),
        }
    }

    fn modified(path: &str, ranges: &[(u32, u32)]) -> ChangedFile {
        ChangedFile {
            path: path.into(),
            status: FileStatus::Modified,
            ranges: ranges
                .iter()
                .map(|&(start, end)| LineRange { start, end })
                .collect(),
        }
    }

    #[test]
    fn line_inside_range_is_relevant() {
        let mut changes = ChangeSet::new();
        changes.insert(modified("src/a.cpp", &[(10, 20)]));
        assert!(is_relevant(&finding("src/a.cpp", 15), &changes, true));
        assert!(is_relevant(&finding("src/a.cpp", 10), &changes, true));
        assert!(is_relevant(&finding("src/a.cpp", 20), &changes, true));
    }

    #[test]
    fn line_outside_range_is_not_relevant() {
        let mut changes = ChangeSet::new();
        changes.insert(modified("src/a.cpp", &[(10, 20)]));
        assert!(!is_relevant(&finding("src/a.cpp", 21), &changes, true));
        assert!(!is_relevant(&finding("src/a.cpp", 9), &changes, true));
    }

    #[test]
    fn disabled_filter_includes_everything() {
        let mut changes = ChangeSet::new();
        changes.insert(modified("src/a.cpp", &[(10, 20)]));
        assert!(is_relevant(&finding("src/a.cpp", 21), &changes, false));
        assert!(is_relevant(&finding("untouched.cpp", 1), &changes, false));
    }

    #[test]
    fn added_file_covers_every_line() {
        let mut changes = ChangeSet::new();
        changes.insert(ChangedFile {
            path: "src/new.cpp".into(),
            status: FileStatus::Added,
            ranges: vec![LineRange { start: 1, end: 4 }],
        });
        assert!(is_relevant(&finding("src/new.cpp", 1), &changes, true));
        assert!(is_relevant(&finding("src/new.cpp", 9999), &changes, true));
    }

    #[test]
    fn any_of_several_ranges_matches() {
        let mut changes = ChangeSet::new();
        changes.insert(modified("a.cpp", &[(1, 3), (40, 45)]));
        assert!(changes.covers("a.cpp", 42));
        assert!(!changes.covers("a.cpp", 20));
    }

    #[test]
    fn same_base_name_in_other_directory_does_not_match() {
        let mut changes = ChangeSet::new();
        changes.insert(modified("lib/util.cpp", &[(1, 100)]));
        assert!(!is_relevant(&finding("app/util.cpp", 5), &changes, true));
        assert!(is_relevant(&finding("lib/util.cpp", 5), &changes, true));
    }

    #[test]
    fn file_without_patch_is_absent() {
        let changes = ChangeSet::from_entries(vec![(
            "img/logo.png".to_string(),
            FileStatus::Modified,
            None,
        )])
        .unwrap();
        assert!(changes.is_empty());
        assert!(!changes.covers("img/logo.png", 1));
    }

    #[test]
    fn malformed_patch_fails_whole_set() {
        let result = ChangeSet::from_entries(vec![
            (
                "ok.cpp".to_string(),
                FileStatus::Modified,
                Some("@@ -1,1 +1,2 @@\n".to_string()),
            ),
            (
                "bad.cpp".to_string(),
                FileStatus::Modified,
                Some("@@ -1,1 1,2\n".to_string()),
            ),
        ]);
        assert!(matches!(result, Err(LintcastError::Parse(_))));
    }

    #[test]
    fn from_patch_derives_inclusive_ranges() {
        let file =
            ChangedFile::from_patch("a.cpp", FileStatus::Modified, "@@ -43,6 +48,8 @@\n ctx\n")
                .unwrap();
        assert_eq!(file.ranges, vec![LineRange { start: 48, end: 56 }]);
    }
}
