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

//! XML reading and writing for F# analyzer documents.
//!
//! # Features
//!
//! - Streaming import of `AnalysisOutput` result documents into
//!   [`fsonar_core::Issue`]s, with line-accurate diagnostics
//! - [`XmlTokenReader`], a quick-xml backed [`fsonar_core::TokenSource`]
//! - Serialization of issues back to `AnalysisOutput` ([`to_xml`])
//! - The `AnalysisInput` configuration handed to the analyzer
//!   ([`write_analysis_input`])
//!
//! # Examples
//!
//! ## Reading a result document
//!
//! ```rust
//! use fsonar_xml::parse_str;
//!
//! let xml = r#"<?xml version="1.0" encoding="utf-8"?>
//! <AnalysisOutput>
//!   <Issues>
//!     <Issue>
//!       <RuleKey>R1</RuleKey>
//!       <Message>M1</Message>
//!       <AbsoluteFilePath>/a.fs</AbsoluteFilePath>
//!       <StartLine>3</StartLine>
//!       <StartColumn>1</StartColumn>
//!       <EndLine>3</EndLine>
//!       <EndColumn>10</EndColumn>
//!     </Issue>
//!   </Issues>
//! </AnalysisOutput>"#;
//!
//! let issues = parse_str(xml, "sonarDiagnostics.xml").unwrap();
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].rule_key(), "R1");
//! assert_eq!(issues[0].end_column(), Some(10));
//! ```
//!
//! ## Reading from disk
//!
//! ```rust,no_run
//! use fsonar_xml::parse_file;
//!
//! for issue in parse_file("work/sonarDiagnostics.xml")? {
//!     println!("{}", issue);
//! }
//! # Ok::<(), fsonar_core::ImportError>(())
//! ```

mod analysis_input;
mod error;
mod import;
mod reader;
mod to_xml;

pub use analysis_input::{write_analysis_input, ActiveRule};
pub use error::WriteError;
pub use import::{parse_file, parse_file_with_config, parse_reader, parse_str, ImportConfig};
pub use reader::{LineCounter, XmlTokenReader};
pub use to_xml::{to_xml, ToXmlConfig};
