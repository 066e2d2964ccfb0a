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

//! Error types for importing analyzer result documents.
//!
//! Every failure aborts the whole import; there is no partial result. The
//! first three kinds are raised by the schema parser and always carry the
//! document path and the reader's line. Stream failures come from the token
//! source (I/O, malformed markup) and carry the line when one is known.
//!
//! # Error Handling Example
//!
//! ```rust
//! use fsonar_core::{parse_source, EventReplay, ImportError, ReaderEvent};
//!
//! let source = EventReplay::new(vec![ReaderEvent::start("Report", 1)]);
//! match parse_source(source, "diagnostics.xml") {
//!     Err(ImportError::SchemaViolation { found, line, .. }) => {
//!         assert_eq!(found, "<Report>");
//!         assert_eq!(line, 1);
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The kind of an [`ImportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportErrorKind {
    /// Wrong element name or nesting.
    SchemaViolation,
    /// Stream ended before a required closing tag.
    PrematureEnd,
    /// An integer leaf holds something that is not an integer.
    InvalidInteger,
    /// I/O or decoding failure from the byte source or the token reader.
    StreamFailure,
}

impl fmt::Display for ImportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaViolation => write!(f, "SchemaViolation"),
            Self::PrematureEnd => write!(f, "PrematureEnd"),
            Self::InvalidInteger => write!(f, "InvalidInteger"),
            Self::StreamFailure => write!(f, "StreamFailure"),
        }
    }
}

/// Errors that can occur while importing an analysis result document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// An element did not match the expected schema transition.
    #[error("Unexpected element in {context}: expected '{expected}', found '{found}' in {path} at line {line}")]
    SchemaViolation {
        path: PathBuf,
        line: usize,
        /// Parser state in which the element was encountered.
        context: String,
        expected: String,
        found: String,
    },

    /// The stream was exhausted before the document was complete.
    #[error("Premature end of file in {state} in {path} at line {line}")]
    PrematureEnd {
        path: PathBuf,
        line: usize,
        /// Parser state that was still open.
        state: String,
    },

    /// An integer leaf could not be parsed.
    #[error("Expected an integer instead of \"{value}\" for the element \"{element}\" in {path} at line {line}")]
    InvalidInteger {
        path: PathBuf,
        line: usize,
        element: String,
        value: String,
    },

    /// The byte source or token reader failed.
    #[error("Failed to read {path}{}: {message}", at_line(.line))]
    Stream {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

impl ImportError {
    /// Create a stream failure raised while reading.
    pub fn stream(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Stream {
            path: path.into(),
            line: Some(line),
            message: message.into(),
        }
    }

    /// Create a stream failure from an I/O error that happened outside of
    /// reading, e.g. when opening the file.
    pub fn io(path: impl Into<PathBuf>, source: &std::io::Error) -> Self {
        Self::Stream {
            path: path.into(),
            line: None,
            message: source.to_string(),
        }
    }

    /// Get the kind of this error.
    pub fn kind(&self) -> ImportErrorKind {
        match self {
            Self::SchemaViolation { .. } => ImportErrorKind::SchemaViolation,
            Self::PrematureEnd { .. } => ImportErrorKind::PrematureEnd,
            Self::InvalidInteger { .. } => ImportErrorKind::InvalidInteger,
            Self::Stream { .. } => ImportErrorKind::StreamFailure,
        }
    }

    /// Get the line number if available.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::SchemaViolation { line, .. }
            | Self::PrematureEnd { line, .. }
            | Self::InvalidInteger { line, .. } => Some(*line),
            Self::Stream { line, .. } => *line,
        }
    }

    /// Path of the document being imported.
    pub fn path(&self) -> &Path {
        match self {
            Self::SchemaViolation { path, .. }
            | Self::PrematureEnd { path, .. }
            | Self::InvalidInteger { path, .. }
            | Self::Stream { path, .. } => path,
        }
    }
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;
