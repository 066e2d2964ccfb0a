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

//! Issue list to `AnalysisOutput` XML

use crate::error::WriteError;
use fsonar_core::parser::{
    ABSOLUTE_FILE_PATH, ANALYSIS_OUTPUT, END_COLUMN, END_LINE, ISSUE, ISSUES, MESSAGE, RULE_KEY,
    START_COLUMN, START_LINE,
};
use fsonar_core::Issue;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Configuration for XML output
#[derive(Debug, Clone)]
pub struct ToXmlConfig {
    /// Pretty-print with indentation
    pub pretty: bool,
    /// Indentation string (e.g., "  " or "    ")
    pub indent: String,
    /// Emit the `<?xml ...?>` declaration
    pub declaration: bool,
}

impl Default for ToXmlConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            declaration: true,
        }
    }
}

/// Serialize issues as an `AnalysisOutput` document.
///
/// All issues go into a single `Issues` block. Absent positions are written
/// as empty elements, which read back as `None`.
///
/// # Examples
///
/// ```rust
/// use fsonar_core::{Issue, Position};
/// use fsonar_xml::{parse_str, to_xml, ToXmlConfig};
///
/// let issues = vec![Issue::new("R1", "a < b", "/src/a.fs", Position::new(3, 1, 3, 10))];
/// let xml = to_xml(&issues, &ToXmlConfig::default()).unwrap();
/// assert!(xml.contains("<Message>a &lt; b</Message>"));
/// assert_eq!(parse_str(&xml, "roundtrip.xml").unwrap(), issues);
/// ```
pub fn to_xml(issues: &[Issue], config: &ToXmlConfig) -> Result<String, WriteError> {
    let mut writer = new_writer(config);

    if config.declaration {
        write_declaration(&mut writer)?;
    }
    write_start(&mut writer, ANALYSIS_OUTPUT)?;
    write_start(&mut writer, ISSUES)?;
    for issue in issues {
        write_issue(&mut writer, issue)?;
    }
    write_end(&mut writer, ISSUES)?;
    write_end(&mut writer, ANALYSIS_OUTPUT)?;

    finish(writer)
}

fn write_issue<W: std::io::Write>(writer: &mut Writer<W>, issue: &Issue) -> Result<(), WriteError> {
    write_start(writer, ISSUE)?;
    write_leaf(writer, RULE_KEY, issue.rule_key())?;
    write_leaf(writer, MESSAGE, issue.message())?;
    write_leaf(writer, ABSOLUTE_FILE_PATH, issue.absolute_file_path())?;
    write_int_leaf(writer, START_LINE, issue.start_line())?;
    write_int_leaf(writer, START_COLUMN, issue.start_column())?;
    write_int_leaf(writer, END_LINE, issue.end_line())?;
    write_int_leaf(writer, END_COLUMN, issue.end_column())?;
    write_end(writer, ISSUE)
}

fn write_int_leaf<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: Option<i32>,
) -> Result<(), WriteError> {
    match value {
        Some(value) => write_leaf(writer, name, &value.to_string()),
        None => write_leaf(writer, name, ""),
    }
}

// Shared writer plumbing, also used by the AnalysisInput writer.

pub(crate) fn new_writer(config: &ToXmlConfig) -> Writer<Cursor<Vec<u8>>> {
    if config.pretty {
        Writer::new_with_indent(Cursor::new(Vec::new()), b' ', config.indent.len())
    } else {
        Writer::new(Cursor::new(Vec::new()))
    }
}

pub(crate) fn write_declaration<W: std::io::Write>(
    writer: &mut Writer<W>,
) -> Result<(), WriteError> {
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| WriteError::xml("XML declaration", e))
}

pub(crate) fn write_start<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
) -> Result<(), WriteError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| WriteError::xml(format!("'{}' start tag", name), e))
}

pub(crate) fn write_end<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
) -> Result<(), WriteError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| WriteError::xml(format!("'{}' end tag", name), e))
}

/// A text-only element; empty text becomes `<name/>`.
pub(crate) fn write_leaf<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), WriteError> {
    if text.is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(|e| WriteError::xml(format!("'{}' element", name), e));
    }
    write_start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| WriteError::xml(format!("'{}' text", name), e))?;
    write_end(writer, name)
}

pub(crate) fn finish(writer: Writer<Cursor<Vec<u8>>>) -> Result<String, WriteError> {
    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}
