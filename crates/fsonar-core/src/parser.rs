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

//! Schema parser for analysis result documents.
//!
//! The parser is a recursive state machine over [`ReaderEvent`]s:
//!
//! ```text
//! Root ──<AnalysisOutput>──▶ AnalysisOutput ──<Issues>──▶ Issues ──<Issue>──▶ Issue
//!                                 ▲      │                   ▲  │                │
//!                                 └──────┘</Issues>          └──┘</Issue>         ▼
//!                            </AnalysisOutput> ──▶ Done            RuleKey, Message, AbsoluteFilePath,
//!                                                                  StartLine, StartColumn, EndLine, EndColumn
//! ```
//!
//! All mutable state lives in a [`ParseContext`] that is threaded through the
//! transition functions; the current [`ParserState`] can be inspected at any
//! time. Any event that does not match the expected transition aborts the
//! parse with an [`ImportError`], and no issues are returned.

use crate::error::{ImportError, ImportResult};
use crate::event::{EventKind, ReaderEvent, TokenSource};
use crate::issue::{Issue, Position};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const ANALYSIS_OUTPUT: &str = "AnalysisOutput";
pub const ISSUES: &str = "Issues";
pub const ISSUE: &str = "Issue";
pub const RULE_KEY: &str = "RuleKey";
pub const MESSAGE: &str = "Message";
pub const ABSOLUTE_FILE_PATH: &str = "AbsoluteFilePath";
pub const START_LINE: &str = "StartLine";
pub const START_COLUMN: &str = "StartColumn";
pub const END_LINE: &str = "EndLine";
pub const END_COLUMN: &str = "EndColumn";

/// Leaf elements of an `Issue`, in the only order the schema accepts.
pub const ISSUE_LEAVES: [&str; 7] = [
    RULE_KEY,
    MESSAGE,
    ABSOLUTE_FILE_PATH,
    START_LINE,
    START_COLUMN,
    END_LINE,
    END_COLUMN,
];

/// Where the parser currently is in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Before the top-level element.
    Root,
    /// Inside `<AnalysisOutput>`.
    AnalysisOutput,
    /// Inside `<Issues>`.
    Issues,
    /// Inside the `index`-th `<Issue>` of the document (0-based).
    Issue { index: usize },
    /// Looking for, or reading, a leaf element.
    Leaf { element: &'static str },
    /// The top-level element has been closed.
    Done,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserState::Root => write!(f, "root"),
            ParserState::AnalysisOutput => write!(f, "'{}' node", ANALYSIS_OUTPUT),
            ParserState::Issues => write!(f, "'{}' node", ISSUES),
            ParserState::Issue { index } => write!(f, "'{}' node #{}", ISSUE, index + 1),
            ParserState::Leaf { element } => write!(f, "'{}' element", element),
            ParserState::Done => write!(f, "document end"),
        }
    }
}

/// Mutable state of one parse: the token source, the document path used for
/// diagnostics, the current state and a single event of push-back.
pub struct ParseContext<'a, S: TokenSource> {
    source: &'a mut S,
    path: PathBuf,
    state: ParserState,
    pending: Option<ReaderEvent>,
    line: usize,
}

impl<'a, S: TokenSource> ParseContext<'a, S> {
    /// Create a context positioned at the document root.
    pub fn new(source: &'a mut S, path: impl Into<PathBuf>) -> Self {
        let line = source.line().max(1);
        Self {
            source,
            path: path.into(),
            state: ParserState::Root,
            pending: None,
            line,
        }
    }

    /// The state the machine is in.
    #[inline]
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Line of the most recently consumed event.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn enter(&mut self, state: ParserState) {
        debug!("parser: {} -> {}", self.state, state);
        self.state = state;
    }

    /// Pull the next event, honouring a pushed-back one first.
    fn next_event(&mut self) -> ImportResult<Option<ReaderEvent>> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }
        match self.source.next_event() {
            Ok(Some(event)) => {
                self.line = event.line;
                debug!("{}", event.kind);
                Ok(Some(event))
            }
            Ok(None) => Ok(None),
            Err(fault) => Err(ImportError::stream(
                self.path.clone(),
                fault.line.max(1),
                fault.message,
            )),
        }
    }

    fn push_back(&mut self, event: ReaderEvent) {
        self.pending = Some(event);
    }

    fn unexpected(&self, expected: impl Into<String>, found: &EventKind) -> ImportError {
        ImportError::SchemaViolation {
            path: self.path.clone(),
            line: self.line,
            context: self.state.to_string(),
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    fn premature_end(&self) -> ImportError {
        ImportError::PrematureEnd {
            path: self.path.clone(),
            line: self.line,
            state: self.state.to_string(),
        }
    }
}

/// Parse a complete document from `source` without closing it.
///
/// Returns every issue in document order, or the first error encountered.
pub fn parse_events<S: TokenSource>(
    source: &mut S,
    path: impl Into<PathBuf>,
) -> ImportResult<Vec<Issue>> {
    let mut ctx = ParseContext::new(source, path);
    read_root(&mut ctx)
}

/// Parse a complete document and close the source on every exit path.
///
/// A close failure after a successful parse is reported as a stream failure;
/// after a failed parse it is logged and the parse error is returned.
pub fn parse_source<S: TokenSource>(
    mut source: S,
    path: impl Into<PathBuf>,
) -> ImportResult<Vec<Issue>> {
    let path = path.into();
    info!("Reading analysis file: {}", path.display());

    let outcome = parse_events(&mut source, path.clone());
    let line = source.line();
    let closed = source.close();

    match (outcome, closed) {
        (Ok(issues), Ok(())) => {
            info!("Reading analysis file done. Issues size: {}", issues.len());
            Ok(issues)
        }
        (Ok(_), Err(e)) => Err(ImportError::stream(
            path,
            line.max(1),
            format!("failed to close reader: {}", e),
        )),
        (Err(err), Err(e)) => {
            warn!("Failed to close reader for {}: {}", path.display(), e);
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
    }
}

/// Root state: exactly one `AnalysisOutput` element.
pub fn read_root<S: TokenSource>(ctx: &mut ParseContext<'_, S>) -> ImportResult<Vec<Issue>> {
    ctx.enter(ParserState::Root);
    loop {
        let Some(event) = ctx.next_event()? else {
            return Err(ctx.premature_end());
        };
        match &event.kind {
            EventKind::Start(name) if name == ANALYSIS_OUTPUT => {
                let issues = read_analysis_output(ctx)?;
                read_trailer(ctx)?;
                return Ok(issues);
            }
            EventKind::Text(text) if is_blank(text) => {}
            other => return Err(ctx.unexpected(ANALYSIS_OUTPUT, other)),
        }
    }
}

/// After the root is closed only whitespace may follow.
fn read_trailer<S: TokenSource>(ctx: &mut ParseContext<'_, S>) -> ImportResult<()> {
    ctx.enter(ParserState::Done);
    while let Some(event) = ctx.next_event()? {
        match &event.kind {
            EventKind::Text(text) if is_blank(text) => {}
            other => return Err(ctx.unexpected("end of document", other)),
        }
    }
    Ok(())
}

/// Character data outside the root element must be whitespace.
fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Inside `AnalysisOutput`: any number of `Issues` blocks, then the end tag.
pub fn read_analysis_output<S: TokenSource>(
    ctx: &mut ParseContext<'_, S>,
) -> ImportResult<Vec<Issue>> {
    ctx.enter(ParserState::AnalysisOutput);
    let mut issues = Vec::new();
    loop {
        let Some(event) = ctx.next_event()? else {
            return Err(ctx.premature_end());
        };
        match &event.kind {
            EventKind::Start(name) if name == ISSUES => {
                read_issues(ctx, &mut issues)?;
                ctx.enter(ParserState::AnalysisOutput);
            }
            EventKind::Start(_) => return Err(ctx.unexpected(ISSUES, &event.kind)),
            EventKind::End(name) if name == ANALYSIS_OUTPUT => return Ok(issues),
            EventKind::End(_) => {
                return Err(ctx.unexpected(format!("/{}", ANALYSIS_OUTPUT), &event.kind))
            }
            EventKind::Text(_) => {}
        }
    }
}

/// Inside `Issues`: a sequence of `Issue` elements, appended to `issues`.
pub fn read_issues<S: TokenSource>(
    ctx: &mut ParseContext<'_, S>,
    issues: &mut Vec<Issue>,
) -> ImportResult<()> {
    ctx.enter(ParserState::Issues);
    loop {
        let Some(event) = ctx.next_event()? else {
            return Err(ctx.premature_end());
        };
        match &event.kind {
            EventKind::Start(name) if name == ISSUE => {
                let issue = read_issue(ctx, issues.len())?;
                issues.push(issue);
                ctx.enter(ParserState::Issues);
            }
            EventKind::Start(_) => return Err(ctx.unexpected(ISSUE, &event.kind)),
            EventKind::End(name) if name == ISSUE => {}
            EventKind::End(name) if name == ISSUES => return Ok(()),
            EventKind::End(_) => return Err(ctx.unexpected(format!("/{}", ISSUES), &event.kind)),
            EventKind::Text(_) => {}
        }
    }
}

/// Inside one `Issue`: the seven leaves in fixed order.
///
/// The closing `</Issue>` is left for [`read_issues`].
pub fn read_issue<S: TokenSource>(
    ctx: &mut ParseContext<'_, S>,
    index: usize,
) -> ImportResult<Issue> {
    ctx.enter(ParserState::Issue { index });

    let rule_key = read_required_element(ctx, RULE_KEY)?;
    if rule_key.trim().is_empty() {
        return Err(ImportError::SchemaViolation {
            path: ctx.path.clone(),
            line: ctx.line,
            context: ParserState::Issue { index }.to_string(),
            expected: format!("non-empty '{}'", RULE_KEY),
            found: format!("<{}/>", RULE_KEY),
        });
    }
    let message = read_required_element(ctx, MESSAGE)?;
    let absolute_file_path = read_required_element(ctx, ABSOLUTE_FILE_PATH)?;

    let position = Position {
        start_line: read_int_element(ctx, START_LINE)?,
        start_column: read_int_element(ctx, START_COLUMN)?,
        end_line: read_int_element(ctx, END_LINE)?,
        end_column: read_int_element(ctx, END_COLUMN)?,
    };

    debug!(
        "Issue #{}: rule '{}' in {}",
        index + 1,
        rule_key,
        absolute_file_path
    );
    Ok(Issue::new(rule_key, message, absolute_file_path, position))
}

/// Generic leaf reader.
///
/// Advances to the next start element and returns its text if its name is
/// `expected`. A different name is a schema violation. An end tag met first
/// means the leaf is absent: the tag is pushed back for the enclosing state
/// and `None` is returned.
pub fn read_element<S: TokenSource>(
    ctx: &mut ParseContext<'_, S>,
    expected: &'static str,
) -> ImportResult<Option<String>> {
    ctx.enter(ParserState::Leaf { element: expected });
    loop {
        let Some(event) = ctx.next_event()? else {
            return Err(ctx.premature_end());
        };
        if let EventKind::End(_) = event.kind {
            ctx.push_back(event);
            return Ok(None);
        }
        match &event.kind {
            EventKind::Text(_) | EventKind::End(_) => {}
            EventKind::Start(name) if name == expected => {
                let text = read_element_text(ctx, expected)?;
                debug!("Element text = '{}'", text);
                return Ok(Some(text));
            }
            EventKind::Start(_) => return Err(ctx.unexpected(expected, &event.kind)),
        }
    }
}

/// Accumulate the text of a leaf through its end tag.
fn read_element_text<S: TokenSource>(
    ctx: &mut ParseContext<'_, S>,
    element: &'static str,
) -> ImportResult<String> {
    let mut text = String::new();
    loop {
        let Some(event) = ctx.next_event()? else {
            return Err(ctx.premature_end());
        };
        match &event.kind {
            EventKind::Text(chunk) => text.push_str(chunk),
            EventKind::End(name) if name == element => return Ok(text),
            EventKind::End(_) => return Err(ctx.unexpected(format!("/{}", element), &event.kind)),
            EventKind::Start(_) => {
                return Err(ctx.unexpected(format!("text content of '{}'", element), &event.kind))
            }
        }
    }
}

fn read_required_element<S: TokenSource>(
    ctx: &mut ParseContext<'_, S>,
    expected: &'static str,
) -> ImportResult<String> {
    match read_element(ctx, expected)? {
        Some(text) => Ok(text),
        None => {
            let found = ctx
                .pending
                .as_ref()
                .map(|event| event.kind.clone())
                .unwrap_or_else(|| EventKind::Text(String::new()));
            Err(ctx.unexpected(expected, &found))
        }
    }
}

/// Integer leaf reader.
///
/// Absent, empty or whitespace-only leaves yield `None`.
pub fn read_int_element<S: TokenSource>(
    ctx: &mut ParseContext<'_, S>,
    expected: &'static str,
) -> ImportResult<Option<i32>> {
    let Some(text) = read_element(ctx, expected)? else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ImportError::InvalidInteger {
            path: ctx.path.clone(),
            line: ctx.line,
            element: expected.to_string(),
            value: text.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportErrorKind;
    use crate::event::EventReplay;

    fn leaf(name: &str, text: &str, line: usize) -> Vec<ReaderEvent> {
        let mut events = vec![ReaderEvent::start(name, line)];
        if !text.is_empty() {
            events.push(ReaderEvent::text(text, line));
        }
        events.push(ReaderEvent::end(name, line));
        events
    }

    fn issue_events(values: [&str; 7], line: usize) -> Vec<ReaderEvent> {
        let mut events = vec![ReaderEvent::start(ISSUE, line)];
        for (name, value) in ISSUE_LEAVES.iter().zip(values.iter()) {
            events.extend(leaf(name, value, line));
        }
        events.push(ReaderEvent::end(ISSUE, line));
        events
    }

    fn document(issues: Vec<Vec<ReaderEvent>>) -> Vec<ReaderEvent> {
        let mut events = vec![
            ReaderEvent::start(ANALYSIS_OUTPUT, 1),
            ReaderEvent::start(ISSUES, 1),
        ];
        for issue in issues {
            events.extend(issue);
        }
        events.push(ReaderEvent::end(ISSUES, 9));
        events.push(ReaderEvent::end(ANALYSIS_OUTPUT, 10));
        events
    }

    fn parse(events: Vec<ReaderEvent>) -> ImportResult<Vec<Issue>> {
        parse_source(EventReplay::new(events), "test.xml")
    }

    #[test]
    fn test_empty_issues() {
        let issues = parse(document(vec![])).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_blank_text_around_root_is_ignored() {
        let mut events = vec![ReaderEvent::text("\n  ", 1)];
        events.extend(document(vec![]));
        events.push(ReaderEvent::text("\r\n\t", 10));
        assert!(parse(events).unwrap().is_empty());
    }

    #[test]
    fn test_text_before_root_is_rejected() {
        let mut events = vec![ReaderEvent::text("garbage", 1)];
        events.extend(document(vec![]));
        match parse(events).unwrap_err() {
            ImportError::SchemaViolation {
                expected, found, ..
            } => {
                assert_eq!(expected, ANALYSIS_OUTPUT);
                assert_eq!(found, "text \"garbage\"");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_text_after_root_is_rejected() {
        let mut events = document(vec![]);
        events.push(ReaderEvent::text(" garbage\n", 11));
        let err = parse(events).unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::SchemaViolation);
        assert_eq!(err.line(), Some(11));
        assert!(err.to_string().contains("document end"));
    }

    #[test]
    fn test_single_issue() {
        let events = document(vec![issue_events(
            ["R1", "M1", "/a.fs", "3", "1", "3", "10"],
            2,
        )]);
        let issues = parse(events).unwrap();
        assert_eq!(
            issues,
            vec![Issue::new("R1", "M1", "/a.fs", Position::new(3, 1, 3, 10))]
        );
    }

    #[test]
    fn test_empty_integer_leaves_are_none() {
        let events = document(vec![issue_events(["R1", "M1", "/a.fs", "", " ", "", "\n"], 2)]);
        let issues = parse(events).unwrap();
        assert_eq!(issues[0].position(), Position::unknown());
    }

    #[test]
    fn test_missing_integer_leaves_are_none() {
        let mut issue = vec![ReaderEvent::start(ISSUE, 2)];
        issue.extend(leaf(RULE_KEY, "R1", 2));
        issue.extend(leaf(MESSAGE, "M1", 2));
        issue.extend(leaf(ABSOLUTE_FILE_PATH, "/a.fs", 2));
        issue.extend(leaf(START_LINE, "5", 2));
        issue.push(ReaderEvent::end(ISSUE, 2));

        let issues = parse(document(vec![issue])).unwrap();
        assert_eq!(issues[0].start_line(), Some(5));
        assert_eq!(issues[0].start_column(), None);
        assert_eq!(issues[0].end_line(), None);
        assert_eq!(issues[0].end_column(), None);
    }

    #[test]
    fn test_missing_required_leaf_is_violation() {
        let mut issue = vec![ReaderEvent::start(ISSUE, 2)];
        issue.extend(leaf(RULE_KEY, "R1", 2));
        issue.push(ReaderEvent::end(ISSUE, 3));

        let err = parse(document(vec![issue])).unwrap_err();
        match err {
            ImportError::SchemaViolation {
                expected, found, line, ..
            } => {
                assert_eq!(expected, MESSAGE);
                assert_eq!(found, "</Issue>");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_rule_key_is_violation() {
        let events = document(vec![issue_events(["  ", "M1", "/a.fs", "", "", "", ""], 2)]);
        let err = parse(events).unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::SchemaViolation);
        assert!(err.to_string().contains("non-empty 'RuleKey'"));
    }

    #[test]
    fn test_leaf_order_is_fixed() {
        let mut issue = vec![ReaderEvent::start(ISSUE, 2)];
        issue.extend(leaf(MESSAGE, "M1", 2));
        issue.extend(leaf(RULE_KEY, "R1", 2));

        let err = parse(document(vec![issue])).unwrap_err();
        match err {
            ImportError::SchemaViolation {
                expected, found, ..
            } => {
                assert_eq!(expected, RULE_KEY);
                assert_eq!(found, "<Message>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_root() {
        let err = parse(vec![ReaderEvent::start("Report", 1)]).unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::SchemaViolation);
        assert!(err.to_string().contains("'<Report>'"));
        assert!(err.to_string().contains("in root"));
    }

    #[test]
    fn test_empty_stream_is_premature_end() {
        let err = parse(vec![]).unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::PrematureEnd);
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_missing_root_end_is_premature_end() {
        let mut events = document(vec![]);
        events.pop();
        let err = parse(events).unwrap_err();
        match err {
            ImportError::PrematureEnd { state, line, .. } => {
                assert_eq!(state, "'AnalysisOutput' node");
                assert_eq!(line, 9);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_stream_ends_inside_leaf() {
        let events = vec![
            ReaderEvent::start(ANALYSIS_OUTPUT, 1),
            ReaderEvent::start(ISSUES, 2),
            ReaderEvent::start(ISSUE, 3),
            ReaderEvent::start(RULE_KEY, 4),
            ReaderEvent::text("R1", 4),
        ];
        let err = parse(events).unwrap_err();
        match err {
            ImportError::PrematureEnd { state, line, .. } => {
                assert_eq!(state, "'RuleKey' element");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_integer() {
        let events = document(vec![issue_events(["R1", "M1", "/a.fs", "abc", "", "", ""], 6)]);
        let err = parse(events).unwrap_err();
        match err {
            ImportError::InvalidInteger {
                element,
                value,
                line,
                ..
            } => {
                assert_eq!(element, START_LINE);
                assert_eq!(value, "abc");
                assert_eq!(line, 6);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_integer_with_surrounding_whitespace_and_sign() {
        let events = document(vec![issue_events(["R1", "M1", "/a.fs", " 7 ", "+2", "-1", "0"], 2)]);
        let issues = parse(events).unwrap();
        assert_eq!(
            issues[0].position(),
            Position {
                start_line: Some(7),
                start_column: Some(2),
                end_line: Some(-1),
                end_column: Some(0),
            }
        );
    }

    #[test]
    fn test_child_element_inside_leaf() {
        let events = vec![
            ReaderEvent::start(ANALYSIS_OUTPUT, 1),
            ReaderEvent::start(ISSUES, 1),
            ReaderEvent::start(ISSUE, 1),
            ReaderEvent::start(RULE_KEY, 2),
            ReaderEvent::start("Nested", 2),
        ];
        let err = parse(events).unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::SchemaViolation);
        assert!(err.to_string().contains("text content of 'RuleKey'"));
    }

    #[test]
    fn test_unexpected_element_in_issues() {
        let mut events = vec![
            ReaderEvent::start(ANALYSIS_OUTPUT, 1),
            ReaderEvent::start(ISSUES, 2),
        ];
        events.push(ReaderEvent::start("Warning", 3));
        let err = parse(events).unwrap_err();
        match err {
            ImportError::SchemaViolation {
                context,
                expected,
                found,
                ..
            } => {
                assert_eq!(context, "'Issues' node");
                assert_eq!(expected, ISSUE);
                assert_eq!(found, "<Warning>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_extra_leaf_inside_issue() {
        let mut issue = issue_events(["R1", "M1", "/a.fs", "1", "1", "1", "1"], 2);
        let end = issue.pop().unwrap();
        issue.extend(leaf("Severity", "Major", 2));
        issue.push(end);
        let err = parse(document(vec![issue])).unwrap_err();
        assert!(err.to_string().contains("found '<Severity>'"));
    }

    #[test]
    fn test_multiple_issues_blocks() {
        let events = vec![
            ReaderEvent::start(ANALYSIS_OUTPUT, 1),
            ReaderEvent::start(ISSUES, 1),
        ]
        .into_iter()
        .chain(issue_events(["R1", "M1", "/a.fs", "", "", "", ""], 2))
        .chain([ReaderEvent::end(ISSUES, 3), ReaderEvent::start(ISSUES, 4)])
        .chain(issue_events(["R2", "M2", "/b.fs", "", "", "", ""], 5))
        .chain([
            ReaderEvent::end(ISSUES, 6),
            ReaderEvent::end(ANALYSIS_OUTPUT, 7),
        ])
        .collect::<Vec<_>>();

        let issues = parse(events).unwrap();
        let keys: Vec<_> = issues.iter().map(|i| i.rule_key()).collect();
        assert_eq!(keys, vec!["R1", "R2"]);
    }

    #[test]
    fn test_second_root_is_violation() {
        let mut events = document(vec![]);
        events.push(ReaderEvent::text("\n", 10));
        events.push(ReaderEvent::start(ANALYSIS_OUTPUT, 11));
        let err = parse(events).unwrap_err();
        match err {
            ImportError::SchemaViolation {
                context, line, ..
            } => {
                assert_eq!(context, "document end");
                assert_eq!(line, 11);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_end_in_analysis_output() {
        let events = vec![
            ReaderEvent::start(ANALYSIS_OUTPUT, 1),
            ReaderEvent::end("Other", 2),
        ];
        let err = parse(events).unwrap_err();
        assert!(err.to_string().contains("expected '/AnalysisOutput'"));
    }

    #[test]
    fn test_read_fault_becomes_stream_error() {
        let source = EventReplay::new(vec![ReaderEvent::start(ANALYSIS_OUTPUT, 3)])
            .fail_at_end("unexpected end of file");
        let err = parse_source(source, "test.xml").unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::StreamFailure);
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("unexpected end of file"));
    }

    #[test]
    fn test_close_failure_after_success_is_reported() {
        let source = EventReplay::new(document(vec![])).fail_on_close("close failed");
        let err = parse_source(source, "test.xml").unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::StreamFailure);
        assert!(err.to_string().contains("close failed"));
    }

    #[test]
    fn test_close_failure_does_not_mask_parse_error() {
        let source = EventReplay::new(vec![ReaderEvent::start("Report", 1)]).fail_on_close("close failed");
        let err = parse_source(source, "test.xml").unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::SchemaViolation);
    }

    #[test]
    fn test_context_state_is_inspectable() {
        let mut source = EventReplay::new(vec![
            ReaderEvent::start(ANALYSIS_OUTPUT, 1),
            ReaderEvent::start(ISSUES, 1),
            ReaderEvent::end(ISSUES, 2),
            ReaderEvent::end(ANALYSIS_OUTPUT, 2),
        ]);
        let mut ctx = ParseContext::new(&mut source, "test.xml");
        assert_eq!(ctx.state(), ParserState::Root);
        let issues = read_root(&mut ctx).unwrap();
        assert!(issues.is_empty());
        assert_eq!(ctx.state(), ParserState::Done);
        assert_eq!(ctx.line(), 2);
    }

    #[test]
    fn test_parser_state_display() {
        assert_eq!(ParserState::Root.to_string(), "root");
        assert_eq!(ParserState::Issue { index: 0 }.to_string(), "'Issue' node #1");
        assert_eq!(
            ParserState::Leaf { element: END_LINE }.to_string(),
            "'EndLine' element"
        );
    }
}
