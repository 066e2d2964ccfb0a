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

//! FSonar Command Line Interface

use clap::Parser;
use fsonar_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "fsonar_core=info,fsonar_xml=info,fsonar_cli=info";

/// FSonar - F# analyzer results for SonarQube
///
/// # Examples
///
/// ```bash
/// # Check a diagnostics document
/// fsonar validate work/sonarDiagnostics.xml
///
/// # Attach issues to the sources under src/ and print them as JSON
/// fsonar import work --root src --format json
///
/// # Write the analyzer configuration
/// fsonar config --rule FS0001 --rule FS0002:maximum=10 --root src --output work
/// ```
#[derive(Parser)]
#[command(name = "fsonar")]
#[command(author, version, about = "FSonar - F# analyzer results for SonarQube", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
