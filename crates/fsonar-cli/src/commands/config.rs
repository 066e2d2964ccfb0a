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

//! Config command - write the analyzer's `AnalysisInput` document

use super::{collect_source_files, write_output};
use crate::error::CliError;
use fsonar_core::settings::FILE_SUFFIXES_KEY;
use fsonar_core::PluginSettings;
use fsonar_xml::{write_analysis_input, ActiveRule};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Parse a rule argument of the form `KEY[:param=value,...]`.
///
/// # Examples
///
/// ```
/// use fsonar_cli::commands::parse_rule;
///
/// let rule = parse_rule("FS0002:maximum=10,pattern=^[A-Z]").unwrap();
/// assert_eq!(rule.key, "FS0002");
/// assert_eq!(rule.params.len(), 2);
/// ```
pub fn parse_rule(arg: &str) -> Result<ActiveRule, CliError> {
    let (key, params) = match arg.split_once(':') {
        Some((key, params)) => (key.trim(), Some(params)),
        None => (arg.trim(), None),
    };
    if key.is_empty() {
        return Err(CliError::invalid_input(format!(
            "rule '{}' has an empty key",
            arg
        )));
    }

    let mut rule = ActiveRule::new(key);
    for param in params.into_iter().flat_map(|p| p.split(',')) {
        if param.trim().is_empty() {
            continue;
        }
        match param.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                rule = rule.with_param(name.trim(), value);
            }
            _ => {
                return Err(CliError::invalid_input(format!(
                    "parameter '{}' of rule '{}' is not of the form name=value",
                    param, key
                )))
            }
        }
    }
    Ok(rule)
}

/// Write an `AnalysisInput` document for `rules` and the language's files
/// under `root`.
///
/// `suffixes` overrides the comma-separated file suffix setting. When
/// `output` is a directory the document is written to
/// `sonarAnalysisConfig.xml` inside it; without `output` it goes to stdout.
///
/// # Errors
///
/// Returns `Err` if a rule argument is malformed, `root` cannot be walked or
/// the document cannot be written.
pub fn config(
    rules: &[String],
    root: &str,
    suffixes: Option<&str>,
    output: Option<&str>,
) -> Result<(), CliError> {
    let mut properties = HashMap::new();
    if let Some(suffixes) = suffixes {
        properties.insert(FILE_SUFFIXES_KEY.to_string(), suffixes.to_string());
    }
    let settings = PluginSettings::from_properties(&properties);

    let rules = rules
        .iter()
        .map(|r| parse_rule(r))
        .collect::<Result<Vec<_>, _>>()?;
    let files = collect_source_files(root, &settings)?;
    let xml = write_analysis_input(&rules, &files)?;

    let target = output.map(|out| {
        let out = Path::new(out);
        if out.is_dir() {
            settings.analysis_config_path(out)
        } else {
            out.to_path_buf()
        }
    });
    if let Some(target) = &target {
        info!(
            "Writing analysis input with {} rule(s) and {} file(s) to {}",
            rules.len(),
            files.len(),
            target.display()
        );
    }
    write_output(&xml, target.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule_key_only() {
        let rule = parse_rule("FS0001").unwrap();
        assert_eq!(rule, ActiveRule::new("FS0001"));
    }

    #[test]
    fn test_parse_rule_with_params() {
        let rule = parse_rule("FS0002:maximum=10,format=a=b").unwrap();
        assert_eq!(
            rule,
            ActiveRule::new("FS0002")
                .with_param("maximum", "10")
                .with_param("format", "a=b")
        );
    }

    #[test]
    fn test_parse_rule_trailing_separators() {
        let rule = parse_rule("FS0003:").unwrap();
        assert!(rule.params.is_empty());

        let rule = parse_rule("FS0003:x=1,").unwrap();
        assert_eq!(rule.params, vec![("x".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_parse_rule_errors() {
        assert!(matches!(parse_rule(""), Err(CliError::InvalidInput(_))));
        assert!(matches!(parse_rule(":x=1"), Err(CliError::InvalidInput(_))));
        assert!(matches!(parse_rule("FS1:x"), Err(CliError::InvalidInput(_))));
        assert!(matches!(parse_rule("FS1:=1"), Err(CliError::InvalidInput(_))));
    }
}
