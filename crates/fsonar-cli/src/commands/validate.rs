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

//! Validate command - check a diagnostics document against the schema

use super::resolve_input;
use crate::error::CliError;
use colored::Colorize;
use fsonar_core::PluginSettings;
use fsonar_xml::parse_file;
use std::collections::BTreeMap;

/// Validate an `AnalysisOutput` document.
///
/// `file` may name the document itself or an analyzer work directory holding
/// `sonarDiagnostics.xml`.
///
/// # Output
///
/// Prints `✓` or `✗` with the file name to stdout, followed on success by the
/// issue count and the number of issues per rule.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, is too large or does not match
/// the schema.
pub fn validate(file: &str) -> Result<(), CliError> {
    let path = resolve_input(file, &PluginSettings::default())?;

    match parse_file(&path) {
        Ok(issues) => {
            println!("{} {}", "✓".green().bold(), path.display());
            println!("  Issues: {}", issues.len());

            let mut by_rule: BTreeMap<&str, usize> = BTreeMap::new();
            for issue in &issues {
                *by_rule.entry(issue.rule_key()).or_default() += 1;
            }
            for (rule, count) in by_rule {
                println!("  {}: {}", rule, count);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), path.display());
            Err(e.into())
        }
    }
}
