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

//! CLI command implementations

mod config;
mod import;
mod validate;

pub use config::{config, parse_rule};
pub use import::{import, OutputFormat};
pub use validate::validate;

use crate::error::CliError;
use fsonar_core::PluginSettings;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Default maximum diagnostics file size (1 GB)
/// Can be overridden via FSONAR_MAX_FILE_SIZE environment variable
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`], in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "FSONAR_MAX_FILE_SIZE";

fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Resolve the diagnostics document named on the command line.
///
/// A directory is taken to be an analyzer work directory and resolves to the
/// `sonarDiagnostics.xml` inside it. The resolved file must exist and be no
/// larger than the configured maximum.
pub fn resolve_input(file: &str, settings: &PluginSettings) -> Result<PathBuf, CliError> {
    let mut path = PathBuf::from(file);
    if path.is_dir() {
        path = settings.diagnostics_path(&path);
    }

    let metadata = fs::metadata(&path).map_err(|e| CliError::io_error(&path, e))?;
    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(&path, metadata.len(), max_file_size));
    }

    Ok(path)
}

/// Collect every file under `root` that belongs to the language.
///
/// Paths are absolute and sorted. Symlinks in `root` are kept as given, so
/// the paths match the ones the analyzer was handed. Unreadable directory
/// entries fail the walk.
pub fn collect_source_files(root: &str, settings: &PluginSettings) -> Result<Vec<PathBuf>, CliError> {
    let root = absolute(Path::new(root))?;
    let metadata = fs::metadata(&root).map_err(|e| CliError::io_error(&root, e))?;
    if !metadata.is_dir() {
        return Err(CliError::invalid_input(format!(
            "'{}' is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            CliError::Io {
                path,
                message: e.to_string(),
            }
        })?;
        if entry.file_type().is_file() && settings.matches_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    debug!("Found {} source file(s) under {}", files.len(), root.display());
    Ok(files)
}

/// Make `path` absolute against the working directory without resolving
/// symlinks. `.` components are dropped.
fn absolute(path: &Path) -> Result<PathBuf, CliError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| CliError::io_error(path, e))?
            .join(path)
    };
    Ok(joined.components().collect())
}

/// Write content to a file or stdout.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}
