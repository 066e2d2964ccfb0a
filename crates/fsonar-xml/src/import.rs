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

//! Entry points for reading `AnalysisOutput` documents.

use crate::reader::XmlTokenReader;
use fsonar_core::{parse_source, ImportError, ImportResult, Issue};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Configuration for reading documents from disk
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Buffer size for reading chunks (default: 64KB)
    pub buffer_size: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            buffer_size: 65536, // 64KB
        }
    }
}

/// Read every issue from the document at `path`.
///
/// The file is streamed; memory use is bounded by the buffer size plus the
/// issues themselves. The file is closed before this returns, whatever the
/// outcome.
pub fn parse_file(path: impl AsRef<Path>) -> ImportResult<Vec<Issue>> {
    parse_file_with_config(path, &ImportConfig::default())
}

/// [`parse_file`] with an explicit configuration.
pub fn parse_file_with_config(
    path: impl AsRef<Path>,
    config: &ImportConfig,
) -> ImportResult<Vec<Issue>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ImportError::io(path, &e))?;
    let reader = BufReader::with_capacity(config.buffer_size, file);
    parse_source(XmlTokenReader::new(reader), path)
}

/// Read every issue from an already opened byte source.
///
/// `path` is only used in diagnostics.
pub fn parse_reader<R: BufRead>(reader: R, path: impl Into<PathBuf>) -> ImportResult<Vec<Issue>> {
    parse_source(XmlTokenReader::new(reader), path)
}

/// Read every issue from an in-memory document.
pub fn parse_str(xml: &str, path: impl Into<PathBuf>) -> ImportResult<Vec<Issue>> {
    parse_reader(xml.as_bytes(), path)
}
