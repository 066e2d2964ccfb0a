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

//! Language and repository settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Language key used by the host.
pub const LANGUAGE_KEY: &str = "fs";
/// Display name of the language.
pub const LANGUAGE_NAME: &str = "F#";
/// Rule repository the analyzer's issues are reported under.
pub const REPOSITORY_KEY: &str = "fsharpsecurity";
pub const REPOSITORY_NAME: &str = "SonarQube";

/// Property holding the comma-separated list of file suffixes.
pub const FILE_SUFFIXES_KEY: &str = "sonar.fs.file.suffixes";
pub const FILE_SUFFIXES_DEFAULT: &str = ".fs,.fsx,.fsi";

/// Analyzer result document inside a work directory.
pub const DIAGNOSTICS_FILE: &str = "sonarDiagnostics.xml";
/// Analyzer configuration document inside a work directory.
pub const ANALYSIS_CONFIG_FILE: &str = "sonarAnalysisConfig.xml";

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSettings {
    /// Repository key prefixed to every reported rule (default: `fsharpsecurity`).
    pub repository_key: String,
    /// Suffixes of files that belong to the language (default: `.fs`, `.fsx`, `.fsi`).
    pub file_suffixes: Vec<String>,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            repository_key: REPOSITORY_KEY.to_string(),
            file_suffixes: parse_suffixes(FILE_SUFFIXES_DEFAULT),
        }
    }
}

impl PluginSettings {
    /// Build settings from host properties, falling back to defaults for
    /// anything unset.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let mut settings = Self::default();
        if let Some(value) = properties.get(FILE_SUFFIXES_KEY) {
            let suffixes = parse_suffixes(value);
            if !suffixes.is_empty() {
                settings.file_suffixes = suffixes;
            }
        }
        settings
    }

    /// Returns `true` if `path` ends with one of the configured suffixes.
    pub fn matches_file(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        self.file_suffixes
            .iter()
            .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix.as_str()))
    }

    pub fn diagnostics_path(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(DIAGNOSTICS_FILE)
    }

    pub fn analysis_config_path(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(ANALYSIS_CONFIG_FILE)
    }
}

/// Split a comma-separated suffix list, dropping blanks.
pub fn parse_suffixes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PluginSettings::default();
        assert_eq!(settings.repository_key, "fsharpsecurity");
        assert_eq!(settings.file_suffixes, vec![".fs", ".fsx", ".fsi"]);
    }

    #[test]
    fn test_parse_suffixes() {
        assert_eq!(parse_suffixes(" .fs, ,.fsx,"), vec![".fs", ".fsx"]);
        assert!(parse_suffixes("").is_empty());
    }

    #[test]
    fn test_from_properties() {
        let mut props = HashMap::new();
        props.insert(FILE_SUFFIXES_KEY.to_string(), ".fsscript".to_string());
        assert_eq!(
            PluginSettings::from_properties(&props).file_suffixes,
            vec![".fsscript"]
        );

        props.insert(FILE_SUFFIXES_KEY.to_string(), " , ".to_string());
        assert_eq!(
            PluginSettings::from_properties(&props),
            PluginSettings::default()
        );
    }

    #[test]
    fn test_matches_file() {
        let settings = PluginSettings::default();
        assert!(settings.matches_file(Path::new("/src/Program.fs")));
        assert!(settings.matches_file(Path::new("script.fsx")));
        assert!(settings.matches_file(Path::new("Sig.fsi")));
        assert!(!settings.matches_file(Path::new("Program.cs")));
        assert!(!settings.matches_file(Path::new("/src/.fs")));
        assert!(!settings.matches_file(Path::new("/")));
    }

    #[test]
    fn test_work_dir_paths() {
        let settings = PluginSettings::default();
        let dir = Path::new("work");
        assert_eq!(settings.diagnostics_path(dir), dir.join("sonarDiagnostics.xml"));
        assert_eq!(
            settings.analysis_config_path(dir),
            dir.join("sonarAnalysisConfig.xml")
        );
    }
}
