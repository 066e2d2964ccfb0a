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

//! FSonar CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **import**: Read an analyzer diagnostics document and print its issues,
//!   optionally attaching them to the source files under a root directory
//! - **validate**: Check a diagnostics document against the schema
//! - **config**: Write the `AnalysisInput` document handed to the analyzer
//!
//! # Examples
//!
//! ```no_run
//! use fsonar_cli::commands::{config, import, validate, OutputFormat};
//!
//! # fn main() -> Result<(), fsonar_cli::error::CliError> {
//! validate("work/sonarDiagnostics.xml")?;
//! import("work", Some("src"), OutputFormat::Json, false)?;
//! config(&["FS0001".to_string()], "src", None, Some("work"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Diagnostics files larger than 1 GB are rejected before reading
//! (configurable via `FSONAR_MAX_FILE_SIZE`).

pub mod cli;
pub mod commands;
pub mod error;
