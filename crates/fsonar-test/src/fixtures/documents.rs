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

//! Issue lists and XML documents.

use fsonar_core::{Issue, Position};

/// Two issues: one fully positioned, one with every position leaf empty.
pub const TWO_ISSUES_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<AnalysisOutput>
  <Issues>
    <Issue>
      <RuleKey>R1</RuleKey>
      <Message>M1</Message>
      <AbsoluteFilePath>/a.fs</AbsoluteFilePath>
      <StartLine>3</StartLine>
      <StartColumn>1</StartColumn>
      <EndLine>3</EndLine>
      <EndColumn>10</EndColumn>
    </Issue>
    <Issue>
      <RuleKey>R2</RuleKey>
      <Message>M2</Message>
      <AbsoluteFilePath>/b.fs</AbsoluteFilePath>
      <StartLine></StartLine>
      <StartColumn></StartColumn>
      <EndLine></EndLine>
      <EndColumn></EndColumn>
    </Issue>
  </Issues>
</AnalysisOutput>
"#;

/// A document without findings.
pub const EMPTY_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<AnalysisOutput>
  <Issues>
  </Issues>
</AnalysisOutput>
"#;

/// The issues encoded by [`TWO_ISSUES_XML`].
pub fn two_issues() -> Vec<Issue> {
    vec![
        Issue::new("R1", "M1", "/a.fs", Position::new(3, 1, 3, 10)),
        Issue::new("R2", "M2", "/b.fs", Position::unknown()),
    ]
}

/// No issues at all.
pub fn empty() -> Vec<Issue> {
    Vec::new()
}

/// Messages and paths that need escaping or keep significant whitespace.
pub fn special_characters() -> Vec<Issue> {
    vec![
        Issue::new(
            "FS0003",
            "Use '<>' instead of \"!=\" & friends",
            "/src/My Project/Módulo.fs",
            Position::new(1, 0, 1, 12),
        ),
        Issue::new(
            "FS0004",
            "  leading and trailing spaces  ",
            "/src/a&b.fs",
            Position::new(7, 4, 9, 0),
        ),
        Issue::new("FS0005", "", "/src/empty_message.fs", Position::unknown()),
    ]
}

/// Positions with only some fields known.
pub fn partial_positions() -> Vec<Issue> {
    vec![
        Issue::new(
            "FS0010",
            "Line only",
            "/src/a.fs",
            Position {
                start_line: Some(12),
                ..Position::default()
            },
        ),
        Issue::new(
            "FS0011",
            "Start only",
            "/src/a.fs",
            Position {
                start_line: Some(5),
                start_column: Some(8),
                ..Position::default()
            },
        ),
        Issue::new(
            "FS0012",
            "End column only",
            "/src/b.fs",
            Position {
                end_column: Some(3),
                ..Position::default()
            },
        ),
    ]
}

/// Several rules across several files.
pub fn many_files() -> Vec<Issue> {
    let mut issues = Vec::new();
    for (i, file) in ["Program.fs", "Library.fs", "Script.fsx", "Library.fsi"]
        .iter()
        .enumerate()
    {
        let line = i as i32 + 1;
        issues.push(Issue::new(
            "FS0001",
            format!("Mutable binding in {}", file),
            format!("/project/src/{}", file),
            Position::new(line, 0, line, 20),
        ));
        issues.push(Issue::new(
            "FS0002",
            "Avoid Console.WriteLine",
            format!("/project/src/{}", file),
            Position::new(line + 10, 4, line + 10, 30),
        ));
    }
    issues
}

/// Integer boundaries and negative values.
pub fn extreme_positions() -> Vec<Issue> {
    vec![
        Issue::new("FS0020", "max", "/x.fs", Position::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX)),
        Issue::new("FS0021", "min", "/x.fs", Position::new(i32::MIN, -1, 0, i32::MIN)),
    ]
}
