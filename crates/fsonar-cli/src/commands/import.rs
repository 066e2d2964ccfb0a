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

//! Import command - read a diagnostics document and report its issues

use super::{collect_source_files, resolve_input};
use crate::error::CliError;
use colored::Colorize;
use fsonar_core::{report_issues, CollectingSink, InMemoryFileIndex, Issue, PluginSettings, TextRange};
use fsonar_xml::parse_file;
use std::str::FromStr;
use tracing::info;

/// Output format of the import command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{}' (expected text or json)", other)),
        }
    }
}

/// Import a diagnostics document and print its issues.
///
/// Without `root` every parsed issue is printed as is. With `root`, issues
/// are attached to the language's files found under that directory, the way
/// the host would save them, and the saved/skipped counts are printed after
/// the issues. `strict` turns skipped issues into an error.
///
/// # Errors
///
/// Returns `Err` if the document cannot be read or parsed, if `root` cannot
/// be walked, or in strict mode if any issue was skipped.
pub fn import(
    file: &str,
    root: Option<&str>,
    format: OutputFormat,
    strict: bool,
) -> Result<(), CliError> {
    let settings = PluginSettings::default();
    let path = resolve_input(file, &settings)?;
    let issues = parse_file(&path)?;

    let root = match root {
        Some(root) => root,
        None => return print_issues(&issues, format),
    };

    let index = InMemoryFileIndex::from_paths(collect_source_files(root, &settings)?);
    let mut sink = CollectingSink::new();
    let summary = report_issues(&issues, &index, &mut sink, &settings.repository_key);
    info!(
        "Reported {} issue(s), skipped {} ({} source file(s))",
        summary.saved,
        summary.skipped,
        index.len()
    );

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "file": path.display().to_string(),
                "issues": sink.issues,
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            for reported in &sink.issues {
                let location = match reported.range {
                    TextRange::Span {
                        start_line,
                        start_column,
                        end_line,
                        end_column,
                    } => format!(
                        "{}:{}-{}:{}",
                        start_line, start_column, end_line, end_column
                    ),
                    TextRange::Line { line } => line.to_string(),
                    TextRange::WholeFile => "-".to_string(),
                };
                println!(
                    "{} {}:{} {}",
                    reported.rule.to_string().cyan(),
                    reported.file.path.display(),
                    location,
                    reported.message
                );
            }
            println!(
                "{} saved, {} skipped",
                summary.saved.to_string().green().bold(),
                summary.skipped.to_string().yellow().bold()
            );
        }
    }

    if strict && summary.skipped > 0 {
        return Err(CliError::Unresolved {
            skipped: summary.skipped,
            total: issues.len(),
        });
    }
    Ok(())
}

fn print_issues(issues: &[Issue], format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(issues)?),
        OutputFormat::Text => {
            for issue in issues {
                println!("{}", issue);
            }
            println!("{} issue(s)", issues.len().to_string().bold());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
