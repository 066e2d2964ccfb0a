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

//! Builders for issues and hand-written XML documents.
//!
//! [`XmlDocumentBuilder`] writes markup directly rather than going through a
//! serializer, so tests can produce layouts a serializer never would:
//! several `Issues` blocks, comments between elements, empty-element syntax.

use fsonar_core::{Issue, Position};

/// Builder for [`Issue`] fixtures.
///
/// # Examples
///
/// ```
/// use fsonar_test::fixtures::builders::IssueBuilder;
///
/// let issue = IssueBuilder::new("FS0001")
///     .message("Avoid mutable state")
///     .file("/src/Program.fs")
///     .span(3, 1, 3, 10)
///     .build();
///
/// assert_eq!(issue.start_line(), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct IssueBuilder {
    rule_key: String,
    message: String,
    path: String,
    position: Position,
}

impl IssueBuilder {
    /// Start from a rule key with a default message and file.
    pub fn new(rule_key: impl Into<String>) -> Self {
        Self {
            rule_key: rule_key.into(),
            message: "Test message".to_string(),
            path: "/src/Test.fs".to_string(),
            position: Position::unknown(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn file(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set all four position fields.
    pub fn span(mut self, start_line: i32, start_column: i32, end_line: i32, end_column: i32) -> Self {
        self.position = Position::new(start_line, start_column, end_line, end_column);
        self
    }

    /// Set only the start line.
    pub fn at_line(mut self, line: i32) -> Self {
        self.position.start_line = Some(line);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn build(self) -> Issue {
        Issue::new(self.rule_key, self.message, self.path, self.position)
    }
}

/// Builder for `AnalysisOutput` markup.
///
/// # Examples
///
/// ```
/// use fsonar_test::fixtures::builders::{IssueBuilder, XmlDocumentBuilder};
///
/// let xml = XmlDocumentBuilder::new()
///     .issue(&IssueBuilder::new("R1").build())
///     .block()
///     .raw("<!-- second block -->")
///     .issue(&IssueBuilder::new("R2").build())
///     .build();
///
/// assert_eq!(xml.matches("<Issues>").count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct XmlDocumentBuilder {
    declaration: bool,
    empty_elements: bool,
    blocks: Vec<Vec<String>>,
}

impl Default for XmlDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlDocumentBuilder {
    /// A document with a declaration and one open `Issues` block.
    pub fn new() -> Self {
        Self {
            declaration: true,
            empty_elements: false,
            blocks: vec![Vec::new()],
        }
    }

    pub fn without_declaration(mut self) -> Self {
        self.declaration = false;
        self
    }

    /// Write absent positions as `<StartLine/>` instead of `<StartLine></StartLine>`.
    pub fn empty_elements(mut self) -> Self {
        self.empty_elements = true;
        self
    }

    /// Start a new `Issues` block.
    pub fn block(mut self) -> Self {
        self.blocks.push(Vec::new());
        self
    }

    /// Append an issue to the current block.
    pub fn issue(mut self, issue: &Issue) -> Self {
        let fragment = self.issue_markup(issue);
        self.current().push(fragment);
        self
    }

    /// Append raw markup to the current block.
    pub fn raw(mut self, markup: impl Into<String>) -> Self {
        self.current().push(markup.into());
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        if self.declaration {
            out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        }
        out.push_str("<AnalysisOutput>\n");
        for block in &self.blocks {
            out.push_str("  <Issues>\n");
            for fragment in block {
                out.push_str(fragment);
                out.push('\n');
            }
            out.push_str("  </Issues>\n");
        }
        out.push_str("</AnalysisOutput>\n");
        out
    }

    fn current(&mut self) -> &mut Vec<String> {
        if self.blocks.is_empty() {
            self.blocks.push(Vec::new());
        }
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    fn issue_markup(&self, issue: &Issue) -> String {
        let mut out = String::from("    <Issue>\n");
        let text_leaves = [
            ("RuleKey", issue.rule_key().to_string()),
            ("Message", issue.message().to_string()),
            ("AbsoluteFilePath", issue.absolute_file_path().to_string()),
        ];
        for (name, value) in text_leaves {
            out.push_str(&format!("      <{0}>{1}</{0}>\n", name, escape(&value)));
        }
        let int_leaves = [
            ("StartLine", issue.start_line()),
            ("StartColumn", issue.start_column()),
            ("EndLine", issue.end_line()),
            ("EndColumn", issue.end_column()),
        ];
        for (name, value) in int_leaves {
            match value {
                Some(v) => out.push_str(&format!("      <{0}>{1}</{0}>\n", name, v)),
                None if self.empty_elements => out.push_str(&format!("      <{}/>\n", name)),
                None => out.push_str(&format!("      <{0}></{0}>\n", name)),
            }
        }
        out.push_str("    </Issue>");
        out
    }
}

/// Minimal XML text escaping.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
