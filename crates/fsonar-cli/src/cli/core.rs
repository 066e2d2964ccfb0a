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

//! Commands operating on analyzer documents.

use crate::commands::{self, OutputFormat};
use crate::error::CliError;
use clap::Subcommand;

/// Core FSonar commands.
///
/// - **Import**: Read a diagnostics document and print or report its issues
/// - **Validate**: Check a diagnostics document against the schema
/// - **Config**: Write the analyzer configuration for a set of rules
#[derive(Subcommand)]
pub enum CoreCommands {
    /// Import an analyzer diagnostics document
    ///
    /// Reads an AnalysisOutput document (or the sonarDiagnostics.xml inside a
    /// work directory) and prints its issues. With --root, issues are attached
    /// to the F# files under that directory and a summary is printed.
    Import {
        /// Diagnostics file or work directory
        #[arg(value_name = "FILE")]
        file: String,

        /// Source root to resolve issue paths against
        #[arg(short, long, value_name = "DIR")]
        root: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Fail if any issue cannot be attached to a source file
        #[arg(short, long, requires = "root")]
        strict: bool,
    },

    /// Validate an analyzer diagnostics document
    Validate {
        /// Diagnostics file or work directory
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Write the analyzer configuration document
    ///
    /// Lists the given rules and every F# file under --root in an
    /// AnalysisInput document.
    Config {
        /// Active rule, as KEY or KEY:param=value,... (repeatable)
        #[arg(long = "rule", value_name = "RULE")]
        rules: Vec<String>,

        /// Directory to collect source files from
        #[arg(short, long, value_name = "DIR")]
        root: String,

        /// Comma-separated file suffixes (default: .fs,.fsx,.fsi)
        #[arg(long)]
        suffixes: Option<String>,

        /// Output file or work directory (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl CoreCommands {
    /// Execute the core command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            CoreCommands::Import {
                file,
                root,
                format,
                strict,
            } => commands::import(&file, root.as_deref(), format, strict),
            CoreCommands::Validate { file } => commands::validate(&file),
            CoreCommands::Config {
                rules,
                root,
                suffixes,
                output,
            } => commands::config(&rules, &root, suffixes.as_deref(), output.as_deref()),
        }
    }
}
