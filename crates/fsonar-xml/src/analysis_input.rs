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

//! `AnalysisInput` configuration document.
//!
//! Before the analyzer runs it is handed a configuration listing the active
//! rules, their parameters and the files to analyze:
//!
//! ```xml
//! <AnalysisInput>
//!   <Settings/>
//!   <Rules>
//!     <Rule>
//!       <Key>FS0001</Key>
//!       <Parameters>
//!         <Parameter>
//!           <Key>maximum</Key>
//!           <Value>10</Value>
//!         </Parameter>
//!       </Parameters>
//!     </Rule>
//!   </Rules>
//!   <Files>
//!     <File>/src/Program.fs</File>
//!   </Files>
//! </AnalysisInput>
//! ```

use crate::error::WriteError;
use crate::to_xml::{
    finish, new_writer, write_declaration, write_end, write_leaf, write_start, ToXmlConfig,
};
use std::path::Path;

const ANALYSIS_INPUT: &str = "AnalysisInput";
const SETTINGS: &str = "Settings";
const RULES: &str = "Rules";
const RULE: &str = "Rule";
const KEY: &str = "Key";
const PARAMETERS: &str = "Parameters";
const PARAMETER: &str = "Parameter";
const VALUE: &str = "Value";
const FILES: &str = "Files";
const FILE: &str = "File";

/// A rule enabled for the analysis, with its parameter overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveRule {
    pub key: String,
    /// Parameters in the order they are written.
    pub params: Vec<(String, String)>,
}

impl ActiveRule {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Write the analyzer configuration for `rules` and `files`.
///
/// A rule's `Parameters` block is only written when it has parameters.
/// Files are written as given; callers pass absolute paths.
pub fn write_analysis_input<P: AsRef<Path>>(
    rules: &[ActiveRule],
    files: &[P],
) -> Result<String, WriteError> {
    let mut writer = new_writer(&ToXmlConfig::default());

    write_declaration(&mut writer)?;
    write_start(&mut writer, ANALYSIS_INPUT)?;
    write_leaf(&mut writer, SETTINGS, "")?;

    write_start(&mut writer, RULES)?;
    for rule in rules {
        write_start(&mut writer, RULE)?;
        write_leaf(&mut writer, KEY, &rule.key)?;
        if !rule.params.is_empty() {
            write_start(&mut writer, PARAMETERS)?;
            for (key, value) in &rule.params {
                write_start(&mut writer, PARAMETER)?;
                write_leaf(&mut writer, KEY, key)?;
                write_leaf(&mut writer, VALUE, value)?;
                write_end(&mut writer, PARAMETER)?;
            }
            write_end(&mut writer, PARAMETERS)?;
        }
        write_end(&mut writer, RULE)?;
    }
    write_end(&mut writer, RULES)?;

    write_start(&mut writer, FILES)?;
    for file in files {
        write_leaf(&mut writer, FILE, &file.as_ref().to_string_lossy())?;
    }
    write_end(&mut writer, FILES)?;

    write_end(&mut writer, ANALYSIS_INPUT)?;
    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_and_files() {
        let rules = vec![
            ActiveRule::new("FS0001"),
            ActiveRule::new("FS0002").with_param("maximum", "10"),
        ];
        let files = ["/src/Program.fs", "/src/Lib.fs"];
        let xml = write_analysis_input(&rules, &files[..]).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<Settings/>"));
        assert!(xml.contains("<Key>FS0001</Key>"));
        assert!(xml.contains("<Key>maximum</Key>"));
        assert!(xml.contains("<Value>10</Value>"));
        assert!(xml.contains("<File>/src/Program.fs</File>"));
        assert!(xml.contains("<File>/src/Lib.fs</File>"));
        // Only the second rule carries parameters.
        assert_eq!(xml.matches("<Parameters>").count(), 1);
    }

    #[test]
    fn test_values_are_escaped() {
        let rules = vec![ActiveRule::new("R").with_param("pattern", "<a & b>")];
        let xml = write_analysis_input::<&str>(&rules, &[]).unwrap();
        assert!(xml.contains("<Value>&lt;a &amp; b&gt;</Value>"));
    }

    #[test]
    fn test_no_rules_no_files() {
        let xml = write_analysis_input::<&str>(&[], &[]).unwrap();
        assert!(xml.contains("<Rules>"));
        assert!(xml.contains("</Rules>"));
        assert!(xml.contains("<Files>"));
        assert!(!xml.contains("<Rule>"));
    }
}
