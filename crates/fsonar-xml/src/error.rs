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

//! Error types for writing analyzer documents

use thiserror::Error;

/// Errors raised while serializing a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// quick-xml refused or failed to write an event.
    #[error("Failed to write {context}: {message}")]
    Xml {
        /// What was being written
        context: String,
        message: String,
    },

    /// The produced bytes were not valid UTF-8.
    #[error("UTF-8 encoding error: {message}")]
    Encoding { message: String },
}

impl WriteError {
    pub(crate) fn xml(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        WriteError::Xml {
            context: context.into(),
            message: err.to_string(),
        }
    }
}

impl From<std::string::FromUtf8Error> for WriteError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        WriteError::Encoding {
            message: err.to_string(),
        }
    }
}
