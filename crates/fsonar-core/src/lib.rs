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

//! Issue model and schema parser for F# analyzer result documents.
//!
//! The analyzer writes its findings to an `AnalysisOutput` XML document.
//! This crate turns a stream of [`ReaderEvent`]s from such a document into a
//! list of [`Issue`]s, enforcing the document schema strictly: any deviation
//! aborts the import with an [`ImportError`] carrying the file path and line.
//!
//! Tokenizing bytes is left to a [`TokenSource`]; the XML implementation
//! lives in `fsonar-xml`. [`EventReplay`] replays crafted events and is
//! handy for exercising the state machine directly.
//!
//! The [`report`] module attaches parsed issues to host files.
//!
//! # Example
//!
//! ```rust
//! use fsonar_core::{parse_source, EventReplay, ReaderEvent};
//!
//! let events = vec![
//!     ReaderEvent::start("AnalysisOutput", 1),
//!     ReaderEvent::start("Issues", 1),
//!     ReaderEvent::end("Issues", 1),
//!     ReaderEvent::end("AnalysisOutput", 1),
//! ];
//! let issues = parse_source(EventReplay::new(events), "sonarDiagnostics.xml").unwrap();
//! assert!(issues.is_empty());
//! ```

mod error;
mod event;
mod issue;
pub mod parser;
pub mod report;
pub mod settings;

pub use error::{ImportError, ImportErrorKind, ImportResult};
pub use event::{EventKind, EventReplay, ReadFault, ReaderEvent, TokenSource};
pub use issue::{Issue, Position};
pub use parser::{parse_events, parse_source, ParseContext, ParserState};
pub use report::{
    report_issues, CollectingSink, FileIndex, InMemoryFileIndex, InputFile, IssueSink,
    LookupError, ReportSummary, ReportedIssue, RuleKey, TextRange,
};
pub use settings::PluginSettings;
