// FSonar - F# analysis results for SonarQube
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Attaching parsed issues to the host's files.
//!
//! The parser hands back issues keyed by an absolute path string. Reporting
//! resolves that path through a [`FileIndex`], turns the optional position
//! into a [`TextRange`] and passes the result to an [`IssueSink`]. Issues
//! whose file cannot be resolved, or whose range is unusable, are logged and
//! skipped. They never fail the run.

use crate::issue::{Issue, Position};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Fully qualified rule identifier: repository plus rule key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleKey {
    pub repository: String,
    pub rule: String,
}

impl RuleKey {
    pub fn of(repository: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.rule)
    }
}

/// Location granularity of a reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TextRange {
    /// Exact span. Lines are 1-based, columns are 0-based offsets.
    Span {
        start_line: i32,
        start_column: i32,
        end_line: i32,
        end_column: i32,
    },
    /// The whole of one line.
    Line { line: i32 },
    /// No position known; the issue applies to the file.
    WholeFile,
}

impl TextRange {
    /// Derive a range from an analyzer position.
    ///
    /// All four fields present gives a [`TextRange::Span`]; otherwise a start
    /// line gives a [`TextRange::Line`]; otherwise [`TextRange::WholeFile`].
    pub fn from_position(position: &Position) -> Result<Self, String> {
        match (
            position.start_line,
            position.start_column,
            position.end_line,
            position.end_column,
        ) {
            (Some(start_line), Some(start_column), Some(end_line), Some(end_column)) => {
                if start_line < 1 || end_line < 1 {
                    return Err(format!(
                        "line numbers must be 1-based (start {}, end {})",
                        start_line, end_line
                    ));
                }
                if start_column < 0 || end_column < 0 {
                    return Err(format!(
                        "column offsets must not be negative (start {}, end {})",
                        start_column, end_column
                    ));
                }
                if (end_line, end_column) < (start_line, start_column) {
                    return Err(format!(
                        "range end {}:{} is before start {}:{}",
                        end_line, end_column, start_line, start_column
                    ));
                }
                Ok(TextRange::Span {
                    start_line,
                    start_column,
                    end_line,
                    end_column,
                })
            }
            (Some(line), ..) if line < 1 => {
                Err(format!("line numbers must be 1-based (start {})", line))
            }
            (Some(line), ..) => Ok(TextRange::Line { line }),
            (None, ..) => Ok(TextRange::WholeFile),
        }
    }
}

/// A file known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputFile {
    pub path: PathBuf,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Failure of a [`FileIndex`] lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The analyzer reported a path that is not absolute.
    #[error("'{path}' is not an absolute path")]
    NotAbsolute { path: String },

    /// The index could not answer.
    #[error("lookup of '{path}' failed: {message}")]
    Unavailable { path: String, message: String },
}

/// Resolves analyzer paths to host files.
pub trait FileIndex {
    /// Look up a file by absolute path.
    ///
    /// `Ok(None)` means the file is not part of the analysis; `Err` means the
    /// lookup itself failed. Both cause the issue to be skipped.
    fn lookup(&self, absolute_path: &str) -> Result<Option<InputFile>, LookupError>;
}

/// An issue bound to a host file and range, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportedIssue {
    pub rule: RuleKey,
    pub file: InputFile,
    pub range: TextRange,
    pub message: String,
}

/// Receives reported issues in document order.
pub trait IssueSink {
    fn save(&mut self, issue: ReportedIssue);
}

/// Counts of a reporting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportSummary {
    pub saved: usize,
    pub skipped: usize,
}

/// Attach every issue to its file and hand it to `sink`.
///
/// Issues keep their order. Unresolvable issues are logged at `info` level
/// and counted as skipped.
pub fn report_issues<I, S>(
    issues: &[Issue],
    index: &I,
    sink: &mut S,
    repository: &str,
) -> ReportSummary
where
    I: FileIndex + ?Sized,
    S: IssueSink + ?Sized,
{
    let mut summary = ReportSummary::default();

    for issue in issues {
        debug!(
            "Creating issue to save. RuleKey:'{}' File:{}",
            issue.rule_key(),
            issue.absolute_file_path()
        );

        let file = match index.lookup(issue.absolute_file_path()) {
            Ok(Some(file)) => file,
            Ok(None) => {
                log_skipped(issue, "file is not part of the analysis");
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                log_skipped(issue, &format!("failed to find input file: \"{}\"", e));
                summary.skipped += 1;
                continue;
            }
        };

        let range = match TextRange::from_position(&issue.position()) {
            Ok(range) => range,
            Err(e) => {
                log_skipped(issue, &format!("invalid range: {}", e));
                summary.skipped += 1;
                continue;
            }
        };

        sink.save(ReportedIssue {
            rule: RuleKey::of(repository, issue.rule_key()),
            file,
            range,
            message: issue.message().to_string(),
        });
        summary.saved += 1;
    }

    summary
}

fn log_skipped(issue: &Issue, reason: &str) {
    let line = issue
        .start_line()
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());
    info!(
        "Skipping an issue: reason:'{}'. file:'{}' line:{}",
        reason,
        issue.absolute_file_path(),
        line
    );
}

/// A [`FileIndex`] over a fixed set of absolute paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileIndex {
    files: BTreeSet<PathBuf>,
}

impl InMemoryFileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            files: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>) {
        self.files.insert(path.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }
}

impl FileIndex for InMemoryFileIndex {
    fn lookup(&self, absolute_path: &str) -> Result<Option<InputFile>, LookupError> {
        let path = Path::new(absolute_path);
        if !path.is_absolute() {
            return Err(LookupError::NotAbsolute {
                path: absolute_path.to_string(),
            });
        }
        Ok(self.files.get(path).map(|p| InputFile::new(p.clone())))
    }
}

/// An [`IssueSink`] that keeps everything it is given.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub issues: Vec<ReportedIssue>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IssueSink for CollectingSink {
    fn save(&mut self, issue: ReportedIssue) {
        self.issues.push(issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs(name: &str) -> String {
        std::env::temp_dir().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_rule_key_display() {
        assert_eq!(RuleKey::of("fsharpsecurity", "R1").to_string(), "fsharpsecurity:R1");
    }

    #[test]
    fn test_range_full_span() {
        let range = TextRange::from_position(&Position::new(3, 1, 3, 10)).unwrap();
        assert_eq!(
            range,
            TextRange::Span {
                start_line: 3,
                start_column: 1,
                end_line: 3,
                end_column: 10
            }
        );
    }

    #[test]
    fn test_range_falls_back_to_line() {
        let position = Position {
            start_line: Some(4),
            end_column: Some(2),
            ..Position::default()
        };
        assert_eq!(
            TextRange::from_position(&position).unwrap(),
            TextRange::Line { line: 4 }
        );
    }

    #[test]
    fn test_range_falls_back_to_whole_file() {
        assert_eq!(
            TextRange::from_position(&Position::unknown()).unwrap(),
            TextRange::WholeFile
        );
    }

    #[test]
    fn test_range_rejects_reversed_span() {
        assert!(TextRange::from_position(&Position::new(5, 0, 4, 0)).is_err());
        assert!(TextRange::from_position(&Position::new(5, 8, 5, 2)).is_err());
        assert!(TextRange::from_position(&Position::new(0, 0, 1, 0)).is_err());
        assert!(TextRange::from_position(&Position::new(1, -1, 1, 0)).is_err());
    }

    #[test]
    fn test_in_memory_index_lookup() {
        let path = abs("a.fs");
        let index = InMemoryFileIndex::from_paths([path.clone()]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup(&path).unwrap(), Some(InputFile::new(path.clone())));
        assert_eq!(index.lookup(&abs("b.fs")).unwrap(), None);
        assert_eq!(
            index.lookup("relative/a.fs"),
            Err(LookupError::NotAbsolute {
                path: "relative/a.fs".to_string()
            })
        );
    }

    #[test]
    fn test_report_saves_and_skips_in_order() {
        let a = abs("a.fs");
        let index = InMemoryFileIndex::from_paths([a.clone()]);
        let issues = vec![
            Issue::new("R1", "first", a.clone(), Position::new(1, 0, 1, 4)),
            Issue::new("R2", "unknown file", abs("missing.fs"), Position::unknown()),
            Issue::new("R3", "relative", "src/a.fs", Position::unknown()),
            Issue::new("R4", "bad range", a.clone(), Position::new(9, 0, 2, 0)),
            Issue::new("R5", "last", a.clone(), Position::unknown()),
        ];

        let mut sink = CollectingSink::new();
        let summary = report_issues(&issues, &index, &mut sink, "fsharpsecurity");

        assert_eq!(summary, ReportSummary { saved: 2, skipped: 3 });
        assert_eq!(sink.issues.len(), 2);
        assert_eq!(sink.issues[0].rule, RuleKey::of("fsharpsecurity", "R1"));
        assert_eq!(sink.issues[0].message, "first");
        assert_eq!(sink.issues[1].rule.rule, "R5");
        assert_eq!(sink.issues[1].range, TextRange::WholeFile);
        assert_eq!(sink.issues[1].file, InputFile::new(a));
    }

    #[test]
    fn test_report_with_custom_index() {
        struct FailingIndex;

        impl FileIndex for FailingIndex {
            fn lookup(&self, absolute_path: &str) -> Result<Option<InputFile>, LookupError> {
                Err(LookupError::Unavailable {
                    path: absolute_path.to_string(),
                    message: "index unavailable".to_string(),
                })
            }
        }

        let issues = vec![Issue::new("R1", "m", abs("a.fs"), Position::unknown())];
        let mut sink = CollectingSink::new();
        let summary = report_issues(&issues, &FailingIndex, &mut sink, "repo");
        assert_eq!(summary, ReportSummary { saved: 0, skipped: 1 });
        assert!(sink.issues.is_empty());
    }

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::Unavailable {
            path: "/a.fs".to_string(),
            message: "index unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "lookup of '/a.fs' failed: index unavailable");
        assert_eq!(
            LookupError::NotAbsolute {
                path: "a.fs".to_string()
            }
            .to_string(),
            "'a.fs' is not an absolute path"
        );
    }
}
