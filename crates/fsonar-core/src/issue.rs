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

//! Issue data model.

use std::fmt;

/// Source position of an issue as reported by the analyzer.
///
/// Each field is independently optional. `None` means the analyzer left the
/// corresponding element empty, which is not the same as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// First line of the issue (1-based).
    pub start_line: Option<i32>,
    /// Column on the first line.
    pub start_column: Option<i32>,
    /// Last line of the issue (1-based).
    pub end_line: Option<i32>,
    /// Column on the last line.
    pub end_column: Option<i32>,
}

impl Position {
    /// Create a fully populated position.
    pub fn new(start_line: i32, start_column: i32, end_line: i32, end_column: i32) -> Self {
        Self {
            start_line: Some(start_line),
            start_column: Some(start_column),
            end_line: Some(end_line),
            end_column: Some(end_column),
        }
    }

    /// A position with no fields supplied.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Returns `true` if none of the four fields is present.
    pub fn is_unknown(&self) -> bool {
        self.start_line.is_none()
            && self.start_column.is_none()
            && self.end_line.is_none()
            && self.end_column.is_none()
    }
}

/// A single finding reported by the analyzer.
///
/// Issues are plain values: once built they cannot be modified and they hold
/// no reference to the document they were read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Issue {
    rule_key: String,
    message: String,
    absolute_file_path: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    position: Position,
}

impl Issue {
    /// Create a new issue.
    pub fn new(
        rule_key: impl Into<String>,
        message: impl Into<String>,
        absolute_file_path: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            rule_key: rule_key.into(),
            message: message.into(),
            absolute_file_path: absolute_file_path.into(),
            position,
        }
    }

    /// Analyzer rule identifier, e.g. `FS0001`.
    #[inline]
    pub fn rule_key(&self) -> &str {
        &self.rule_key
    }

    /// Human-readable description of the finding.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Path of the offending file, exactly as written by the analyzer.
    #[inline]
    pub fn absolute_file_path(&self) -> &str {
        &self.absolute_file_path
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn start_line(&self) -> Option<i32> {
        self.position.start_line
    }

    #[inline]
    pub fn start_column(&self) -> Option<i32> {
        self.position.start_column
    }

    #[inline]
    pub fn end_line(&self) -> Option<i32> {
        self.position.end_line
    }

    #[inline]
    pub fn end_column(&self) -> Option<i32> {
        self.position.end_column
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.absolute_file_path)?;
        if let Some(line) = self.position.start_line {
            write!(f, ":{}", line)?;
            if let Some(column) = self.position.start_column {
                write!(f, ":{}", column)?;
            }
        }
        write!(f, ": [{}] {}", self.rule_key, self.message)
    }
}
